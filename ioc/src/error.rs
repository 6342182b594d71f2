use thiserror::Error;

/// Boxed error type carried by [`Error::Custom`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The error type for every fallible container operation.
#[derive(Debug, Error)]
pub enum Error {
  /// `make` (or a type scan) found nothing for the key.
  #[error("{0} key was not found in the container")]
  BindingNotFound(String),

  /// A key was rebound on a strict container.
  #[error("cannot override a key inside a strict container: {0}")]
  StrictBinding(String),

  /// Name-based parameter resolution found no binding with that name.
  #[error("the dependency with the key of {0} could not be found in the container")]
  DependencyNotFound(String),

  /// Annotation-based parameter resolution found no swap and no matching binding.
  #[error("the dependency with the {0} annotation could not be resolved by the container")]
  AnnotationNotResolved(String),

  /// The container is not configured for the requested resolution.
  #[error("container configuration error: {0}")]
  ContainerConfiguration(String),

  /// `collect` was called with a string that is not a single-wildcard pattern.
  #[error("invalid search pattern '{0}': expected exactly one '*'")]
  InvalidSearchPattern(String),

  /// A resolve target read an argument position it did not declare.
  #[error("argument #{index} is out of range: the target declared {len} parameters")]
  ArgumentOutOfRange { index: usize, len: usize },

  /// A bound value was accessed as a Rust type it does not have.
  #[error("value bound to '{key}' is not a {expected}")]
  TypeMismatch { key: String, expected: &'static str },

  /// An error raised by user code: a listener, a swap factory, a provider or a resolve target.
  #[error(transparent)]
  Custom(BoxError),
}

impl Error {
  /// Wraps an arbitrary error raised from user code.
  pub fn custom<E>(error: E) -> Self
  where
    E: Into<BoxError>,
  {
    Error::Custom(error.into())
  }
}

/// A specialized `Result` type for container operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
