//! Public macros for ergonomic typed lookups.

/// Makes a service from a container and downcasts it, panicking on failure.
///
/// Without a name the service is looked up by its type; with a name, by
/// that string key. For a non-panicking version use `Container::make_as`.
///
/// # Panics
///
/// Panics if nothing is bound for the key or the bound object is not a `$type`.
///
/// # Examples
///
/// ```
/// use fibre_container::{make, Container, Value};
///
/// let mut container = Container::new();
/// container.simple(Value::instance(String::from("hello")))?;
/// container.bind("answer", Value::instance(42u32))?;
///
/// let message = make!(container, String);
/// assert_eq!(*message, "hello");
/// assert_eq!(*make!(container, u32, "answer"), 42);
/// # Ok::<(), fibre_container::Error>(())
/// ```
#[macro_export]
macro_rules! make {
  ($container:expr, $type:ty) => {
    $container
      .make_as::<$type>($crate::Key::of::<$type>())
      .unwrap_or_else(|err| {
        panic!(
          "Failed to resolve required service: {}: {}",
          std::any::type_name::<$type>(),
          err
        )
      })
  };

  ($container:expr, $type:ty, $name:expr) => {
    $container
      .make_as::<$type>($name)
      .unwrap_or_else(|err| {
        panic!(
          "Failed to resolve required service with name '{}': {}: {}",
          $name,
          std::any::type_name::<$type>(),
          err
        )
      })
  };
}
