//! The main `Container` struct: binding, lookup and collection.

use crate::config::{ContainerBuilder, ContainerConfig};
use crate::core::{Key, TypeTag, Value};
use crate::error::{Error, Result};
use crate::hooks::{HookTable, Phase};
use crate::search::{Search, Wildcard};
use crate::swap::Swap;
use crate::types::TypeRegistry;
use indexmap::IndexMap;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// The Inversion of Control (IoC) container.
///
/// Holds bindings in insertion order, the swap table consulted during
/// annotation resolution, the hook table and the registered-type registry.
/// Mutating operations take `&mut self`; lookups take `&self`, which is
/// also what hook listeners and swap factories receive.
#[derive(Debug, Default)]
pub struct Container {
  providers: IndexMap<Key, Value>,
  pub(crate) swaps: HashMap<TypeTag, Swap>,
  pub(crate) hooks: HookTable,
  types: TypeRegistry,
  config: ContainerConfig,
}

impl Container {
  /// Creates a new, empty `Container` with the default configuration.
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_config(config: ContainerConfig) -> Self {
    Self::from_parts(config, TypeRegistry::new())
  }

  pub fn builder() -> ContainerBuilder {
    ContainerBuilder::new()
  }

  pub(crate) fn from_parts(config: ContainerConfig, types: TypeRegistry) -> Self {
    Self {
      providers: IndexMap::new(),
      swaps: HashMap::new(),
      hooks: HookTable::default(),
      types,
      config,
    }
  }

  pub fn config(&self) -> &ContainerConfig {
    &self.config
  }

  /// Toggles rebinding. Has no effect on a strict container, which never rebinds.
  pub fn set_override(&mut self, override_bindings: bool) -> &mut Self {
    self.config.override_bindings = override_bindings;
    self
  }

  pub fn types(&self) -> &TypeRegistry {
    &self.types
  }

  pub fn types_mut(&mut self) -> &mut TypeRegistry {
    &mut self.types
  }

  // --- Binding ---

  /// Binds `value` under `key`.
  ///
  /// On a strict container rebinding fails with `Error::StrictBinding`.
  /// Otherwise a rebind replaces the value only when overriding is enabled;
  /// when it is not, the first binding is kept and this is a no-op. The bind
  /// hook fires before the registry is updated.
  pub fn bind(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Result<&mut Self> {
    let key = key.into();
    let value = value.into();
    let bound = self.providers.contains_key(&key);

    if self.config.strict && bound {
      return Err(Error::StrictBinding(key.to_string()));
    }

    if self.config.override_bindings || !bound {
      self.fire_hook(Phase::Bind, &key, &value)?;
      debug!(%key, rebind = bound, "binding");
      self.providers.insert(key, value);
    } else {
      debug!(%key, "key already bound, keeping first binding");
    }
    Ok(self)
  }

  /// Binds `value` under its own type: the runtime type of an instance, or
  /// the class itself. `Empty` is keyed by `()`.
  pub fn simple(&mut self, value: impl Into<Value>) -> Result<&mut Self> {
    let value = value.into();
    let key = match &value {
      Value::Instance(instance) => Key::Type(instance.tag()),
      Value::Class(tag) => Key::Type(*tag),
      Value::Empty => Key::of::<()>(),
    };
    self.bind(key, value)
  }

  /// Registers a substitution for parameters annotated with `annotation`.
  pub fn swap(&mut self, annotation: TypeTag, swap: impl Into<Swap>) -> &mut Self {
    debug!(%annotation, "registering swap");
    self.swaps.insert(annotation, swap.into());
    self
  }

  // --- Lookup ---

  /// Fetches the value bound to `key`.
  ///
  /// A name must be bound exactly. A type scans every binding in insertion
  /// order for an is-a relation in either direction; the first match wins.
  /// An `Empty` value matches only when it is bound under the type itself.
  pub fn make(&self, key: impl Into<Key>) -> Result<Value> {
    let key = key.into();
    trace!(%key, "make");
    let value = match &key {
      Key::Name(_) => self.providers.get(&key),
      Key::Type(tag) => self.find_type(*tag),
    }
    .ok_or_else(|| Error::BindingNotFound(key.to_string()))?;

    self.fire_hook(Phase::Make, &key, value)?;
    Ok(value.clone())
  }

  /// Makes `key` and downcasts the object to `T`.
  pub fn make_as<T: Any + Send + Sync>(&self, key: impl Into<Key>) -> Result<Arc<T>> {
    let key = key.into();
    self.make(&key)?.downcast::<T>().ok_or_else(|| Error::TypeMismatch {
      key: key.to_string(),
      expected: std::any::type_name::<T>(),
    })
  }

  /// Makes `key` and views the object through the interface `I`.
  pub fn make_interface<I: ?Sized + Send + Sync + 'static>(
    &self,
    key: impl Into<Key>,
  ) -> Result<Arc<I>> {
    let key = key.into();
    let value = self.make(&key)?;
    self.types.view::<I>(&value).ok_or_else(|| Error::TypeMismatch {
      key: key.to_string(),
      expected: std::any::type_name::<I>(),
    })
  }

  /// Reports whether `make(key)` would find a binding. Never fires hooks.
  pub fn has(&self, key: impl Into<Key>) -> bool {
    let key = key.into();
    match &key {
      Key::Name(_) => self.providers.contains_key(&key),
      Key::Type(tag) => self.find_type(*tag).is_some(),
    }
  }

  /// Collects bindings by wildcard pattern over string keys, or by class.
  ///
  /// A pattern must contain exactly one `*` (`Pre*`, `*Suf`, `Pre*Suf`).
  /// A type collects every binding whose value is a class that is-a that
  /// type; instances are skipped. Results keep registry insertion order.
  pub fn collect(&self, search: impl Into<Search>) -> Result<IndexMap<Key, Value>> {
    let collected = match search.into() {
      Search::Pattern(pattern) => {
        let wildcard = Wildcard::parse(&pattern)?;
        self
          .providers
          .iter()
          .filter(|(key, _)| key.as_name().is_some_and(|name| wildcard.matches(name)))
          .map(|(key, value)| (key.clone(), value.clone()))
          .collect()
      }
      Search::Type(tag) => self
        .providers
        .iter()
        .filter(|(_, value)| {
          value
            .as_class()
            .is_some_and(|class| self.types.is_subclass(class, tag))
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect(),
    };
    Ok(collected)
  }

  pub fn keys(&self) -> impl Iterator<Item = &Key> + '_ {
    self.providers.keys()
  }

  pub fn len(&self) -> usize {
    self.providers.len()
  }

  pub fn is_empty(&self) -> bool {
    self.providers.is_empty()
  }

  // --- Matching ---

  /// Exact key lookup without hooks.
  pub(crate) fn lookup(&self, key: &Key) -> Option<&Value> {
    self.providers.get(key)
  }

  pub(crate) fn scan(&self, mut predicate: impl FnMut(&Value) -> bool) -> Option<&Value> {
    self.providers.values().find(|value| predicate(*value))
  }

  /// Annotation match: the value is the class `annotation`, is an instance
  /// of it, or its class / runtime type is a registered subtype of it.
  pub(crate) fn satisfies(&self, value: &Value, annotation: TypeTag) -> bool {
    match value {
      Value::Class(class) => self.types.is_subclass(*class, annotation),
      Value::Instance(instance) => self.types.is_subclass(instance.tag(), annotation),
      Value::Empty => false,
    }
  }

  fn find_type(&self, tag: TypeTag) -> Option<&Value> {
    self
      .providers
      .iter()
      .find(|(key, value)| match value {
        Value::Empty => key.as_type() == Some(tag),
        _ => self.related(value, tag),
      })
      .map(|(_, value)| value)
  }

  /// `satisfies`, or the reverse relation (the requested type is-a the
  /// bound class / runtime type).
  fn related(&self, value: &Value, tag: TypeTag) -> bool {
    if self.satisfies(value, tag) {
      return true;
    }
    match value {
      Value::Class(class) => self.types.is_subclass(tag, *class),
      Value::Instance(instance) => self.types.is_subclass(tag, instance.tag()),
      Value::Empty => false,
    }
  }
}
