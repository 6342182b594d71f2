use fibre_container::{Container, Injectable, Swap, TypeTag, Value};
use std::sync::Arc;

// 1. Define the abstraction (the trait)
trait Logger: Send + Sync {
  fn log(&self, message: &str);
}

// 2. Define concrete implementations
struct ConsoleLogger;
impl Logger for ConsoleLogger {
  fn log(&self, message: &str) {
    println!("[CONSOLE LOG]: {}", message);
  }
}

struct SilentLogger;
impl Logger for SilentLogger {
  fn log(&self, _message: &str) {}
}

// 3. Define a service that depends on the abstraction
struct ReportService {
  logger: Arc<dyn Logger>,
}

impl ReportService {
  fn generate_report(&self) {
    self.logger.log("Starting report generation.");
    // ... logic to generate report ...
    self.logger.log("Finished report generation.");
  }
}

fn main() -> fibre_container::Result<()> {
  // --- Registration ---

  // Rust has no runtime subclass relation, so tell the container that a
  // ConsoleLogger can be served as a `dyn Logger`.
  let mut container = Container::builder()
    .types(|types| {
      types
        .implements::<ConsoleLogger, dyn Logger, _>(|logger| logger as Arc<dyn Logger>)
        .implements::<SilentLogger, dyn Logger, _>(|logger| logger as Arc<dyn Logger>);
    })
    .build();
  container.bind("Logger", Value::instance(ConsoleLogger))?;

  // The report service declares its dependency by annotation. It never creates its logger.
  let build_report = Injectable::new(|args| {
    Ok(ReportService {
      logger: args.interface::<dyn Logger>(0)?,
    })
  })
  .typed::<dyn Logger>("logger");

  // --- Resolution and Usage ---
  println!("Resolving the high-level service...");
  let report_service = container.resolve(&build_report)?;

  println!("Using the service...");
  report_service.generate_report();

  // A swap replaces whatever is bound for the annotation, e.g. in tests.
  container.swap(TypeTag::of::<dyn Logger>(), Swap::value(Value::instance(SilentLogger)));
  println!("Resolving again with the logger swapped out (no output expected)...");
  container.resolve(&build_report)?.generate_report();

  Ok(())
}
