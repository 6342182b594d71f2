use fibre_container::{
  Arguments, Container, Error, Injectable, Parameter, Resolvable, Swap, TypeTag, Value,
};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

// --- Advanced Test Fixtures ---

trait Mailer: Send + Sync {
  fn transport(&self) -> String;
}

struct SmtpMailer;
impl Mailer for SmtpMailer {
  fn transport(&self) -> String {
    "smtp".to_string()
  }
}

struct FakeMailer;
impl Mailer for FakeMailer {
  fn transport(&self) -> String {
    "fake".to_string()
  }
}

struct Request {
  path: String,
}

struct Controller;

fn mail_container() -> Container {
  Container::builder()
    .types(|types| {
      types
        .implements::<SmtpMailer, dyn Mailer, _>(|mailer| mailer as Arc<dyn Mailer>)
        .implements::<FakeMailer, dyn Mailer, _>(|mailer| mailer as Arc<dyn Mailer>);
    })
    .build()
}

// --- Name resolution ---

#[test]
fn test_resolves_unannotated_parameter_by_name() -> fibre_container::Result<()> {
  // Arrange
  let mut container = Container::builder().resolve_parameters(true).build();
  container.bind("name", Value::instance(String::from("Alice")))?;

  let greet =
    Injectable::new(|args| Ok(format!("Hello, {}!", args.get::<String>(0)?))).param("name");

  // Act
  let greeting = container.resolve(&greet)?;

  // Assert
  assert_eq!(greeting, "Hello, Alice!");
  Ok(())
}

#[test]
fn test_unannotated_parameter_requires_opt_in() {
  let mut container = Container::new();
  container
    .bind("name", Value::instance(String::from("Alice")))
    .unwrap();

  let calls = AtomicUsize::new(0);
  let target = Injectable::new(|_args| {
    calls.fetch_add(1, Ordering::SeqCst);
    Ok(())
  })
  .param("name");

  assert!(matches!(
    container.resolve(&target),
    Err(Error::ContainerConfiguration(_))
  ));
  assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_missing_named_dependency_invokes_nothing() {
  let container = Container::builder().resolve_parameters(true).build();

  let calls = AtomicUsize::new(0);
  let target = Injectable::new(|_args| {
    calls.fetch_add(1, Ordering::SeqCst);
    Ok(())
  })
  .param("request");

  match container.resolve(&target) {
    Err(Error::DependencyNotFound(name)) => assert_eq!(name, "request"),
    other => panic!("Should have gotten dependency not found, got {other:?}"),
  }
  assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_self_is_never_resolved_by_name() {
  let mut container = Container::builder().resolve_parameters(true).build();
  container.bind("self", Value::Empty).unwrap();

  let target = Injectable::new(|_args| Ok(())).param("self");

  assert!(matches!(
    container.resolve(&target),
    Err(Error::DependencyNotFound(name)) if name == "self"
  ));
}

// --- Annotation resolution ---

#[test]
fn test_annotation_beats_name_resolution() -> fibre_container::Result<()> {
  // Arrange: a String bound under the parameter's name would be picked by
  // name resolution. The annotation must win.
  let mut container = Container::builder().resolve_parameters(true).build();
  container
    .bind("controller", Value::instance(String::from("by name")))?
    .bind("Controller", Value::class::<Controller>())?;

  let target = Injectable::new(|args| args.class(0)).typed::<Controller>("controller");

  // Act
  let injected = container.resolve(&target)?;

  // Assert
  assert_eq!(injected, TypeTag::of::<Controller>());
  Ok(())
}

#[test]
fn test_injects_instance_by_runtime_type() -> fibre_container::Result<()> {
  let mut container = Container::new();
  container.bind(
    "Request",
    Value::instance(Request {
      path: "/home".to_string(),
    }),
  )?;

  let target = Injectable::new(|args| Ok(args.get::<Request>(0)?.path.clone()))
    .typed::<Request>("request");

  assert_eq!(container.resolve(&target)?, "/home");
  Ok(())
}

#[test]
fn test_injects_interface_through_registered_relation() -> fibre_container::Result<()> {
  let mut container = mail_container();
  container.bind("Mailer", Value::instance(SmtpMailer))?;

  let target =
    Injectable::new(|args| Ok(args.interface::<dyn Mailer>(0)?.transport())).typed::<dyn Mailer>("mailer");

  assert_eq!(container.resolve(&target)?, "smtp");
  Ok(())
}

#[test]
fn test_first_match_in_insertion_order_wins() -> fibre_container::Result<()> {
  let mut container = mail_container();
  container
    .bind("FakeMailer", Value::instance(FakeMailer))?
    .bind("SmtpMailer", Value::instance(SmtpMailer))?;

  let target =
    Injectable::new(|args| Ok(args.interface::<dyn Mailer>(0)?.transport())).typed::<dyn Mailer>("mailer");

  assert_eq!(container.resolve(&target)?, "fake");
  Ok(())
}

#[test]
fn test_unresolved_annotation_is_named() {
  let container = Container::new();
  let target = Injectable::new(|_args| Ok(())).typed::<Request>("request");

  match container.resolve(&target) {
    Err(Error::AnnotationNotResolved(annotation)) => {
      assert!(annotation.contains("Request"));
    }
    other => panic!("Should have gotten annotation error, got {other:?}"),
  }
}

#[test]
fn test_unrelated_instance_does_not_satisfy_annotation() {
  let mut container = Container::new();
  container.bind("Mailer", Value::instance(SmtpMailer)).unwrap();

  // No `implements` declared, so SmtpMailer is not known to be a Mailer.
  let target = Injectable::new(|_args| Ok(())).typed::<dyn Mailer>("mailer");
  assert!(matches!(
    container.resolve(&target),
    Err(Error::AnnotationNotResolved(_))
  ));
}

#[test]
fn test_arguments_are_positional_and_mixed() -> fibre_container::Result<()> {
  let mut container = Container::builder()
    .resolve_parameters(true)
    .types(|types| {
      types.implements::<SmtpMailer, dyn Mailer, _>(|mailer| mailer as Arc<dyn Mailer>);
    })
    .build();
  container
    .bind("subject", Value::instance(String::from("Welcome")))?
    .bind("Mailer", Value::instance(SmtpMailer))?
    .bind("retries", Value::instance(3u8))?;

  let target = Injectable::new(|args| {
    assert_eq!(args.len(), 3);
    Ok(format!(
      "{} via {} x{}",
      args.get::<String>(0)?,
      args.interface::<dyn Mailer>(1)?.transport(),
      args.get::<u8>(2)?
    ))
  })
  .param("subject")
  .typed::<dyn Mailer>("mailer")
  .param("retries");

  assert_eq!(container.resolve(&target)?, "Welcome via smtp x3");
  Ok(())
}

#[test]
fn test_resolution_is_not_memoized() -> fibre_container::Result<()> {
  let mut container = Container::builder().resolve_parameters(true).build();
  container.bind("count", Value::instance(1u32))?;

  let target = Injectable::new(|args| Ok(*args.get::<u32>(0)?)).param("count");
  assert_eq!(container.resolve(&target)?, 1);

  container.bind("count", Value::instance(2u32))?;
  assert_eq!(container.resolve(&target)?, 2);
  Ok(())
}

#[test]
fn test_wrong_downcast_in_target_is_type_mismatch() {
  let mut container = Container::builder().resolve_parameters(true).build();
  container.bind("count", Value::instance(1u32)).unwrap();

  let target = Injectable::new(|args| args.get::<String>(0).map(|_| ())).param("count");
  match container.resolve(&target) {
    Err(Error::TypeMismatch { key, .. }) => assert_eq!(key, "count"),
    other => panic!("Should have gotten type mismatch error, got {other:?}"),
  }
}

#[test]
fn test_reading_undeclared_argument_is_out_of_range() {
  let mut container = Container::builder().resolve_parameters(true).build();
  container.bind("count", Value::instance(1u32)).unwrap();

  let target = Injectable::new(|args| args.get::<u32>(1).map(|_| ())).param("count");
  match container.resolve(&target) {
    Err(Error::ArgumentOutOfRange { index, len }) => {
      assert_eq!(index, 1);
      assert_eq!(len, 1);
    }
    other => panic!("Should have gotten out of range error, got {other:?}"),
  }
}

// --- Swaps ---

#[test]
fn test_swap_value_takes_precedence_over_binding() -> fibre_container::Result<()> {
  let mut container = mail_container();
  container.bind("Mailer", Value::instance(SmtpMailer))?;
  container.swap(TypeTag::of::<dyn Mailer>(), Swap::value(Value::instance(FakeMailer)));

  let target =
    Injectable::new(|args| Ok(args.interface::<dyn Mailer>(0)?.transport())).typed::<dyn Mailer>("mailer");

  assert_eq!(container.resolve(&target)?, "fake");
  Ok(())
}

#[test]
fn test_swap_factory_receives_annotation_and_container() -> fibre_container::Result<()> {
  let mut container = Container::new();
  container.bind("Path", Value::instance(String::from("/swapped")))?;
  container.swap(
    TypeTag::of::<Request>(),
    Swap::factory(|annotation, container| {
      assert_eq!(*annotation, TypeTag::of::<Request>());
      let path = container.make_as::<String>("Path")?;
      Ok(Value::instance(Request {
        path: (*path).clone(),
      }))
    }),
  );

  let target = Injectable::new(|args| Ok(args.get::<Request>(0)?.path.clone()))
    .typed::<Request>("request");

  assert_eq!(container.resolve(&target)?, "/swapped");
  Ok(())
}

#[test]
fn test_swap_factory_runs_on_every_resolve() -> fibre_container::Result<()> {
  static BUILT: AtomicUsize = AtomicUsize::new(0);

  let mut container = Container::new();
  container.swap(
    TypeTag::of::<Controller>(),
    Swap::factory(|_, _| {
      BUILT.fetch_add(1, Ordering::SeqCst);
      Ok(Value::instance(Controller))
    }),
  );

  let target = Injectable::new(|_args| Ok(())).typed::<Controller>("controller");
  container.resolve(&target)?;
  container.resolve(&target)?;

  assert_eq!(BUILT.load(Ordering::SeqCst), 2);
  Ok(())
}

#[test]
fn test_swap_factory_error_propagates() {
  let mut container = Container::new();
  container.swap(
    TypeTag::of::<Controller>(),
    Swap::factory(|_, _| Err(Error::custom("no controller today"))),
  );

  let target = Injectable::new(|_args| Ok(())).typed::<Controller>("controller");
  let err = container.resolve(&target).unwrap_err();
  assert_eq!(err.to_string(), "no controller today");
}

// --- Custom targets ---

struct SendWelcome {
  recipient: &'static str,
}

impl Resolvable for SendWelcome {
  type Output = String;

  fn parameters(&self) -> Vec<Parameter> {
    vec![Parameter::typed::<dyn Mailer>("mailer")]
  }

  fn invoke(&self, arguments: Arguments<'_>) -> fibre_container::Result<String> {
    let mailer = arguments.interface::<dyn Mailer>(0)?;
    Ok(format!("welcome to {} via {}", self.recipient, mailer.transport()))
  }
}

#[test]
fn test_custom_resolvable_target() -> fibre_container::Result<()> {
  let mut container = mail_container();
  container.bind("Mailer", Value::instance(SmtpMailer))?;

  let job = SendWelcome {
    recipient: "alice@example.com",
  };

  assert_eq!(
    container.resolve(&job)?,
    "welcome to alice@example.com via smtp"
  );
  Ok(())
}

#[test]
fn test_stored_trait_object_is_viewable_without_relation() -> fibre_container::Result<()> {
  let mut container = Container::new();
  let mailer: Arc<dyn Mailer> = Arc::new(SmtpMailer);
  container.bind("Mailer", Value::instance(mailer))?;

  assert_eq!(container.make_interface::<dyn Mailer>("Mailer")?.transport(), "smtp");
  Ok(())
}
