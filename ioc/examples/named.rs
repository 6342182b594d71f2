use fibre_container::{Container, Search, Value};

// --- Abstraction and Implementations ---
struct EmailSender;
struct SmsSender;
struct SlackSender;

fn main() -> fibre_container::Result<()> {
  let mut container = Container::new();

  // --- Registration ---
  // Register implementations under unique string keys.
  container
    .bind("EmailNotifier", Value::class::<EmailSender>())?
    .bind("SmsNotifier", Value::class::<SmsSender>())?
    .bind("SlackNotifier", Value::class::<SlackSender>())?
    .bind("NotifierTimeout", Value::instance(30u64))?;

  // --- Lookup ---
  // A single binding by name.
  let timeout = container.make_as::<u64>("NotifierTimeout")?;
  println!("Notifier timeout: {}s", timeout);

  // Every binding matching a wildcard, in registration order.
  println!("Registered notifiers:");
  for (key, value) in container.collect(Search::from("*Notifier"))? {
    if let Some(class) = value.as_class() {
      println!("  {} => {}", key, class);
    }
  }

  // Asking for something that was never bound is an error, not a panic.
  match container.make("PagerNotifier") {
    Ok(_) => println!("Unexpectedly found a pager notifier."),
    Err(err) => println!("As expected: {}", err),
  }

  Ok(())
}
