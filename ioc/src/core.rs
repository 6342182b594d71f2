//! Core data structures: type tags, binding keys and bound values.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A runtime stand-in for a "class object".
///
/// A tag can be taken for any `'static` type, including unsized interface
/// types such as `dyn Logger`. Equality and hashing use the `TypeId` only.
#[derive(Clone, Copy)]
pub struct TypeTag {
  id: TypeId,
  name: &'static str,
}

impl TypeTag {
  pub fn of<T: ?Sized + 'static>() -> Self {
    Self {
      id: TypeId::of::<T>(),
      name: std::any::type_name::<T>(),
    }
  }

  pub fn id(&self) -> TypeId {
    self.id
  }

  /// The fully qualified Rust type name.
  pub fn name(&self) -> &'static str {
    self.name
  }

  pub fn is<T: ?Sized + 'static>(&self) -> bool {
    self.id == TypeId::of::<T>()
  }
}

impl PartialEq for TypeTag {
  fn eq(&self, other: &Self) -> bool {
    self.id == other.id
  }
}

impl Eq for TypeTag {}

impl Hash for TypeTag {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.id.hash(state);
  }
}

impl fmt::Debug for TypeTag {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "TypeTag({})", self.name)
  }
}

impl fmt::Display for TypeTag {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name)
  }
}

/// A binding key: either a string identifier or a type.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Key {
  Name(String),
  Type(TypeTag),
}

impl Key {
  pub fn of<T: ?Sized + 'static>() -> Self {
    Key::Type(TypeTag::of::<T>())
  }

  pub fn as_name(&self) -> Option<&str> {
    match self {
      Key::Name(name) => Some(name),
      Key::Type(_) => None,
    }
  }

  pub fn as_type(&self) -> Option<TypeTag> {
    match self {
      Key::Name(_) => None,
      Key::Type(tag) => Some(*tag),
    }
  }
}

impl fmt::Display for Key {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Key::Name(name) => f.write_str(name),
      Key::Type(tag) => fmt::Display::fmt(tag, f),
    }
  }
}

impl From<&str> for Key {
  fn from(name: &str) -> Self {
    Key::Name(name.to_owned())
  }
}

impl From<String> for Key {
  fn from(name: String) -> Self {
    Key::Name(name)
  }
}

impl From<&String> for Key {
  fn from(name: &String) -> Self {
    Key::Name(name.clone())
  }
}

impl From<TypeTag> for Key {
  fn from(tag: TypeTag) -> Self {
    Key::Type(tag)
  }
}

impl From<&Key> for Key {
  fn from(key: &Key) -> Self {
    key.clone()
  }
}

/// A shared, type-erased object stored in the container.
///
/// Cloning an `Instance` clones the handle, never the object.
#[derive(Clone)]
pub struct Instance {
  tag: TypeTag,
  inner: Arc<dyn Any + Send + Sync>,
}

impl Instance {
  pub fn new<T: Any + Send + Sync>(value: T) -> Self {
    Self::from_arc(Arc::new(value))
  }

  pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
    Self {
      tag: TypeTag::of::<T>(),
      inner: value,
    }
  }

  /// The tag of the object's runtime type.
  pub fn tag(&self) -> TypeTag {
    self.tag
  }

  pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
    Arc::clone(&self.inner).downcast::<T>().ok()
  }

  pub fn ptr_eq(&self, other: &Instance) -> bool {
    Arc::ptr_eq(&self.inner, &other.inner)
  }

  pub(crate) fn erased(&self) -> Arc<dyn Any + Send + Sync> {
    Arc::clone(&self.inner)
  }
}

impl fmt::Debug for Instance {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Instance({})", self.tag.name)
  }
}

/// Anything that can be bound: an object, a type object, or nothing at all.
#[derive(Clone, Debug)]
pub enum Value {
  Instance(Instance),
  Class(TypeTag),
  Empty,
}

impl Value {
  pub fn instance<T: Any + Send + Sync>(value: T) -> Self {
    Value::Instance(Instance::new(value))
  }

  pub fn shared<T: Any + Send + Sync>(value: Arc<T>) -> Self {
    Value::Instance(Instance::from_arc(value))
  }

  pub fn class<T: ?Sized + 'static>() -> Self {
    Value::Class(TypeTag::of::<T>())
  }

  /// The tag of the value's runtime type. Only instances have one; a bound
  /// class is itself a type and `Empty` carries no object.
  pub fn runtime_type(&self) -> Option<TypeTag> {
    match self {
      Value::Instance(instance) => Some(instance.tag()),
      Value::Class(_) | Value::Empty => None,
    }
  }

  pub fn as_class(&self) -> Option<TypeTag> {
    match self {
      Value::Class(tag) => Some(*tag),
      _ => None,
    }
  }

  pub fn as_instance(&self) -> Option<&Instance> {
    match self {
      Value::Instance(instance) => Some(instance),
      _ => None,
    }
  }

  pub fn is_empty(&self) -> bool {
    matches!(self, Value::Empty)
  }

  pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
    self.as_instance().and_then(Instance::downcast::<T>)
  }

  /// Identity comparison: the same object, the same class, or both empty.
  pub fn same(&self, other: &Value) -> bool {
    match (self, other) {
      (Value::Instance(a), Value::Instance(b)) => a.ptr_eq(b),
      (Value::Class(a), Value::Class(b)) => a == b,
      (Value::Empty, Value::Empty) => true,
      _ => false,
    }
  }
}

impl From<Instance> for Value {
  fn from(instance: Instance) -> Self {
    Value::Instance(instance)
  }
}

impl From<TypeTag> for Value {
  fn from(tag: TypeTag) -> Self {
    Value::Class(tag)
  }
}

impl<T: Any + Send + Sync> From<Option<Arc<T>>> for Value {
  fn from(value: Option<Arc<T>>) -> Self {
    match value {
      Some(value) => Value::shared(value),
      None => Value::Empty,
    }
  }
}
