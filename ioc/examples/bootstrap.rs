use fibre_container::{make, Container, Injectable, ServiceProvider, Value};

// --- Services ---
struct Database {
  url: String,
}

struct UserRepository {
  table: &'static str,
  database_url: String,
}

// --- Providers ---

/// Binds configuration values. Runs first because it is listed first.
struct ConfigProvider;

impl ServiceProvider for ConfigProvider {
  fn register(&self, container: &mut Container) -> fibre_container::Result<()> {
    container.bind("database_url", Value::instance(String::from("postgres://localhost/app")))?;
    Ok(())
  }
}

/// Builds services out of whatever the other providers registered.
struct RepositoryProvider;

impl ServiceProvider for RepositoryProvider {
  fn register(&self, container: &mut Container) -> fibre_container::Result<()> {
    container.on_bind("Database", |_, _| {
      println!("[hook] a database is being bound");
      Ok(())
    });
    Ok(())
  }

  fn boot(&self, container: &mut Container) -> fibre_container::Result<()> {
    let connect = Injectable::new(|args| {
      Ok(Database {
        url: (*args.get::<String>(0)?).clone(),
      })
    })
    .param("database_url");
    let database = container.resolve(&connect)?;
    container.bind("Database", Value::instance(database))?;

    let users = UserRepository {
      table: "users",
      database_url: make!(container, Database, "Database").url.clone(),
    };
    container.simple(Value::instance(users))?;
    Ok(())
  }
}

fn main() -> fibre_container::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .init();

  let mut container = Container::builder().resolve_parameters(true).build();

  let providers: Vec<Box<dyn ServiceProvider>> = vec![Box::new(ConfigProvider), Box::new(RepositoryProvider)];
  container.load_providers(&providers)?;

  let users = make!(container, UserRepository);
  println!("Repository for '{}' on {}", users.table, users.database_url);
  println!("Bindings: {:?}", container.keys().map(ToString::to_string).collect::<Vec<_>>());
  Ok(())
}
