//! Parameter injection: descriptors, resolved arguments and the resolver.

use crate::container::Container;
use crate::core::{Key, TypeTag, Value};
use crate::error::{Error, Result};
use crate::hooks::Phase;
use crate::types::TypeRegistry;
use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// A declared parameter of an injectable target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
  name: Cow<'static, str>,
  annotation: Option<TypeTag>,
}

impl Parameter {
  /// An unannotated parameter, resolved by name.
  pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
    Self {
      name: name.into(),
      annotation: None,
    }
  }

  /// A parameter annotated with `T`, resolved by type.
  pub fn typed<T: ?Sized + 'static>(name: impl Into<Cow<'static, str>>) -> Self {
    Self {
      name: name.into(),
      annotation: Some(TypeTag::of::<T>()),
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn annotation(&self) -> Option<TypeTag> {
    self.annotation
  }
}

/// Renders as `name` or `name: Type`. This is also the key resolve hooks
/// are matched against.
impl fmt::Display for Parameter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.annotation {
      Some(annotation) => write!(f, "{}: {}", self.name, annotation),
      None => f.write_str(&self.name),
    }
  }
}

/// The resolved values handed to a target, in declared parameter order.
pub struct Arguments<'c> {
  parameters: Vec<Parameter>,
  values: Vec<Value>,
  types: &'c TypeRegistry,
}

impl<'c> Arguments<'c> {
  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  pub fn value(&self, index: usize) -> Result<&Value> {
    self
      .values
      .get(index)
      .ok_or(Error::ArgumentOutOfRange {
        index,
        len: self.values.len(),
      })
  }

  /// The argument at `index` as a concrete `T`.
  pub fn get<T: Any + Send + Sync>(&self, index: usize) -> Result<Arc<T>> {
    self
      .value(index)?
      .downcast::<T>()
      .ok_or_else(|| self.mismatch(index, std::any::type_name::<T>()))
  }

  /// The argument at `index` viewed through the interface `I`.
  pub fn interface<I: ?Sized + Send + Sync + 'static>(&self, index: usize) -> Result<Arc<I>> {
    let value = self.value(index)?;
    self
      .types
      .view::<I>(value)
      .ok_or_else(|| self.mismatch(index, std::any::type_name::<I>()))
  }

  /// The argument at `index` as a bound class.
  pub fn class(&self, index: usize) -> Result<TypeTag> {
    self
      .value(index)?
      .as_class()
      .ok_or_else(|| self.mismatch(index, "class"))
  }

  pub fn into_values(self) -> Vec<Value> {
    self.values
  }

  fn mismatch(&self, index: usize, expected: &'static str) -> Error {
    let key = self
      .parameters
      .get(index)
      .map(|parameter| parameter.name().to_owned())
      .unwrap_or_else(|| format!("argument #{index}"));
    Error::TypeMismatch { key, expected }
  }
}

impl fmt::Debug for Arguments<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Arguments")
      .field("parameters", &self.parameters)
      .field("values", &self.values)
      .finish()
  }
}

/// Anything the container can call with injected arguments.
pub trait Resolvable {
  type Output;

  /// The declared parameter list, in call order.
  fn parameters(&self) -> Vec<Parameter>;

  fn invoke(&self, arguments: Arguments<'_>) -> Result<Self::Output>;
}

/// A closure paired with its parameter descriptors.
///
/// ```
/// use fibre_container::{Container, Injectable, Value};
///
/// let mut container = Container::builder().resolve_parameters(true).build();
/// container.bind("name", Value::instance(String::from("Alice")))?;
///
/// let greet = Injectable::new(|args| Ok(format!("Hello, {}!", args.get::<String>(0)?)))
///   .param("name");
/// assert_eq!(container.resolve(&greet)?, "Hello, Alice!");
/// # Ok::<(), fibre_container::Error>(())
/// ```
pub struct Injectable<F> {
  parameters: Vec<Parameter>,
  target: F,
}

impl<F> Injectable<F> {
  pub fn new<R>(target: F) -> Self
  where
    F: Fn(Arguments<'_>) -> Result<R>,
  {
    Self {
      parameters: Vec::new(),
      target,
    }
  }

  pub fn with_parameters<R>(parameters: Vec<Parameter>, target: F) -> Self
  where
    F: Fn(Arguments<'_>) -> Result<R>,
  {
    Self { parameters, target }
  }

  /// Appends an unannotated parameter.
  pub fn param(mut self, name: impl Into<Cow<'static, str>>) -> Self {
    self.parameters.push(Parameter::named(name));
    self
  }

  /// Appends a parameter annotated with `T`.
  pub fn typed<T: ?Sized + 'static>(mut self, name: impl Into<Cow<'static, str>>) -> Self {
    self.parameters.push(Parameter::typed::<T>(name));
    self
  }
}

impl<F, R> Resolvable for Injectable<F>
where
  F: Fn(Arguments<'_>) -> Result<R>,
{
  type Output = R;

  fn parameters(&self) -> Vec<Parameter> {
    self.parameters.clone()
  }

  fn invoke(&self, arguments: Arguments<'_>) -> Result<R> {
    (self.target)(arguments)
  }
}

impl<F> fmt::Debug for Injectable<F> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Injectable")
      .field("parameters", &self.parameters)
      .finish_non_exhaustive()
  }
}

impl Container {
  /// Resolves every declared parameter of `target`, then invokes it.
  ///
  /// Annotated parameters go through annotation resolution; unannotated ones
  /// are resolved by name when `resolve_parameters` is enabled and rejected
  /// otherwise. Nothing is memoized. If any parameter fails, the target is
  /// never invoked.
  pub fn resolve<R>(&self, target: &R) -> Result<R::Output>
  where
    R: Resolvable + ?Sized,
  {
    let parameters = target.parameters();
    let values = parameters
      .iter()
      .map(|parameter| self.resolve_parameter(parameter))
      .collect::<Result<Vec<_>>>()?;

    target.invoke(Arguments {
      parameters,
      values,
      types: self.types(),
    })
  }

  /// Resolves a single parameter descriptor.
  pub fn resolve_parameter(&self, parameter: &Parameter) -> Result<Value> {
    match parameter.annotation() {
      Some(annotation) => self.find_annotated(parameter, annotation),
      None if self.config().resolve_parameters => self.find_named(parameter),
      None => Err(Error::ContainerConfiguration(format!(
        "parameter '{}' has no annotation; enable resolve_parameters to resolve it by name",
        parameter.name()
      ))),
    }
  }

  fn find_named(&self, parameter: &Parameter) -> Result<Value> {
    let name = parameter.name();
    let value = match name {
      "self" => None,
      _ => self.lookup(&Key::from(name)),
    }
    .ok_or_else(|| Error::DependencyNotFound(name.to_owned()))?;

    trace!(parameter = name, "resolved by name");
    self.fire_hook(Phase::Resolve, &Key::Name(parameter.to_string()), value)?;
    Ok(value.clone())
  }

  fn find_annotated(&self, parameter: &Parameter, annotation: TypeTag) -> Result<Value> {
    if let Some(swap) = self.swaps.get(&annotation) {
      trace!(%annotation, "resolved by swap");
      return swap.produce(&annotation, self);
    }

    let value = self
      .scan(|value| self.satisfies(value, annotation))
      .ok_or_else(|| Error::AnnotationNotResolved(annotation.to_string()))?;

    trace!(parameter = parameter.name(), %annotation, "resolved by annotation");
    self.fire_hook(Phase::Resolve, &Key::Name(parameter.to_string()), value)?;
    Ok(value.clone())
  }
}
