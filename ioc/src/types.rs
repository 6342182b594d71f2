//! The registered-type registry that backs every is-a check.
//!
//! Rust has no runtime subclass relation, so the container only knows the
//! relations it is told about. `extends` records a plain tag edge;
//! `implements` also records how to view a concrete object through an
//! interface, which is what lets `Arguments::interface` hand out
//! `Arc<dyn Trait>` values.

use crate::core::{Instance, TypeTag, Value};
use std::any::Any;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use std::sync::Arc;

type Upcast =
  Arc<dyn Fn(Arc<dyn Any + Send + Sync>) -> Option<Box<dyn Any + Send + Sync>> + Send + Sync>;

#[derive(Default, Clone)]
pub struct TypeRegistry {
  parents: HashMap<TypeTag, Vec<TypeTag>>,
  casts: HashMap<(TypeTag, TypeTag), Upcast>,
}

impl TypeRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Declares `Sub` is-a `Super`.
  pub fn extends<Sub: ?Sized + 'static, Super: ?Sized + 'static>(&mut self) -> &mut Self {
    self.relate(TypeTag::of::<Sub>(), TypeTag::of::<Super>())
  }

  pub fn relate(&mut self, sub: TypeTag, sup: TypeTag) -> &mut Self {
    let parents = self.parents.entry(sub).or_default();
    if !parents.contains(&sup) {
      parents.push(sup);
    }
    self
  }

  /// Declares that `C` implements the interface `I`, with the upcast used to
  /// view a stored `C` as an `Arc<I>`.
  pub fn implements<C, I, F>(&mut self, cast: F) -> &mut Self
  where
    C: Any + Send + Sync,
    I: ?Sized + Send + Sync + 'static,
    F: Fn(Arc<C>) -> Arc<I> + Send + Sync + 'static,
  {
    let concrete = TypeTag::of::<C>();
    let interface = TypeTag::of::<I>();
    let upcast: Upcast = Arc::new(move |erased| {
      erased
        .downcast::<C>()
        .ok()
        .map(|object| Box::new(cast(object)) as Box<dyn Any + Send + Sync>)
    });
    self.casts.insert((concrete, interface), upcast);
    self.relate(concrete, interface)
  }

  /// Reflexive, transitive is-a check over the declared edges.
  pub fn is_subclass(&self, sub: TypeTag, sup: TypeTag) -> bool {
    if sub == sup {
      return true;
    }
    let mut seen = HashSet::new();
    let mut queue = VecDeque::from([sub]);
    while let Some(current) = queue.pop_front() {
      if !seen.insert(current) {
        continue;
      }
      for parent in self.parents.get(&current).into_iter().flatten() {
        if *parent == sup {
          return true;
        }
        queue.push_back(*parent);
      }
    }
    false
  }

  /// Views `instance` as an `Arc<I>`, using a registered upcast.
  pub fn cast<I: ?Sized + Send + Sync + 'static>(&self, instance: &Instance) -> Option<Arc<I>> {
    let upcast = self.casts.get(&(instance.tag(), TypeTag::of::<I>()))?;
    upcast(instance.erased())?
      .downcast::<Arc<I>>()
      .ok()
      .map(|boxed| *boxed)
  }

  /// Views a bound value through the interface `I`: either via a registered
  /// upcast, or because the object stored is itself an `Arc<I>`.
  pub fn view<I: ?Sized + Send + Sync + 'static>(&self, value: &Value) -> Option<Arc<I>> {
    let instance = value.as_instance()?;
    self
      .cast::<I>(instance)
      .or_else(|| instance.downcast::<Arc<I>>().map(|outer| Arc::clone(&*outer)))
  }
}

impl fmt::Debug for TypeRegistry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("TypeRegistry")
      .field("parents", &self.parents)
      .field("casts", &self.casts.len())
      .finish()
  }
}
