//! Service providers: units of bootstrap that populate a container.

use crate::container::Container;
use crate::error::Result;
use tracing::debug;

/// A bootstrap unit.
///
/// `register` only binds. `boot` runs after every provider has registered,
/// so it may `make` or `resolve` anything another provider bound.
pub trait ServiceProvider {
  fn register(&self, container: &mut Container) -> Result<()>;

  fn boot(&self, _container: &mut Container) -> Result<()> {
    Ok(())
  }

  fn name(&self) -> &str {
    std::any::type_name::<Self>()
  }
}

impl Container {
  /// Registers every provider in order, then boots them in the same order.
  /// Stops at the first error.
  pub fn load_providers(&mut self, providers: &[Box<dyn ServiceProvider>]) -> Result<&mut Self> {
    for provider in providers {
      debug!(provider = provider.name(), "registering provider");
      provider.register(self)?;
    }
    for provider in providers {
      debug!(provider = provider.name(), "booting provider");
      provider.boot(self)?;
    }
    Ok(self)
  }
}
