//! Substitutions consulted before annotation-based resolution.

use crate::container::Container;
use crate::core::{TypeTag, Value};
use crate::error::Result;
use std::fmt;
use std::sync::Arc;

pub type SwapFactory = Arc<dyn Fn(&TypeTag, &Container) -> Result<Value> + Send + Sync>;

/// The replacement registered for an annotation: a fixed value or a factory
/// called with the annotation and the container each time it is needed.
#[derive(Clone)]
pub enum Swap {
  Value(Value),
  Factory(SwapFactory),
}

impl Swap {
  pub fn value(value: impl Into<Value>) -> Self {
    Swap::Value(value.into())
  }

  pub fn factory<F>(factory: F) -> Self
  where
    F: Fn(&TypeTag, &Container) -> Result<Value> + Send + Sync + 'static,
  {
    Swap::Factory(Arc::new(factory))
  }

  pub(crate) fn produce(&self, annotation: &TypeTag, container: &Container) -> Result<Value> {
    match self {
      Swap::Value(value) => Ok(value.clone()),
      Swap::Factory(factory) => factory(annotation, container),
    }
  }
}

impl From<Value> for Swap {
  fn from(value: Value) -> Self {
    Swap::Value(value)
  }
}

impl fmt::Debug for Swap {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Swap::Value(value) => f.debug_tuple("Value").field(value).finish(),
      Swap::Factory(_) => write!(f, "Factory(..)"),
    }
  }
}
