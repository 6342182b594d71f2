//! Lifecycle hooks fired on bind, make and resolve.

use crate::config::HookDispatch;
use crate::container::Container;
use crate::core::{Key, Value};
use crate::error::Result;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// A hook listener. Receives the value being bound, made or resolved, and
/// the container that fired it.
pub type Listener = Arc<dyn Fn(&Value, &Container) -> Result<()> + Send + Sync>;

/// The three hook phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
  Bind,
  Make,
  Resolve,
}

impl fmt::Display for Phase {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Phase::Bind => write!(f, "bind"),
      Phase::Make => write!(f, "make"),
      Phase::Resolve => write!(f, "resolve"),
    }
  }
}

#[derive(Default)]
pub(crate) struct HookTable {
  bind: IndexMap<Key, Vec<Listener>>,
  make: IndexMap<Key, Vec<Listener>>,
  resolve: IndexMap<Key, Vec<Listener>>,
}

impl HookTable {
  fn phase(&self, phase: Phase) -> &IndexMap<Key, Vec<Listener>> {
    match phase {
      Phase::Bind => &self.bind,
      Phase::Make => &self.make,
      Phase::Resolve => &self.resolve,
    }
  }

  fn phase_mut(&mut self, phase: Phase) -> &mut IndexMap<Key, Vec<Listener>> {
    match phase {
      Phase::Bind => &mut self.bind,
      Phase::Make => &mut self.make,
      Phase::Resolve => &mut self.resolve,
    }
  }

  pub(crate) fn register(&mut self, phase: Phase, key: Key, listener: Listener) {
    self.phase_mut(phase).entry(key).or_default().push(listener);
  }

  pub(crate) fn listener_count(&self, phase: Phase) -> usize {
    self.phase(phase).values().map(Vec::len).sum()
  }

  /// Collects the listeners that should run for `key`/`value`, in firing order.
  ///
  /// A hook key matches when it equals the stringified `key`, the class
  /// `value` is, or the runtime type of `value`.
  pub(crate) fn eligible(
    &self,
    phase: Phase,
    key: &Key,
    value: &Value,
    dispatch: HookDispatch,
  ) -> Vec<Listener> {
    let table = self.phase(phase);
    if table.is_empty() {
      return Vec::new();
    }

    let name = Key::Name(key.to_string());
    let class = value.as_class().map(Key::Type);
    let runtime = value.runtime_type().map(Key::Type);
    let matches = |hook_key: &Key| {
      *hook_key == name || class.as_ref() == Some(hook_key) || runtime.as_ref() == Some(hook_key)
    };

    match dispatch {
      HookDispatch::FanOut => {
        if !table.keys().any(|hook_key| matches(hook_key)) {
          return Vec::new();
        }
        table.values().flatten().cloned().collect()
      }
      HookDispatch::MatchedOnly => table
        .iter()
        .filter(|(hook_key, _)| matches(*hook_key))
        .flat_map(|(_, listeners)| listeners.iter().cloned())
        .collect(),
    }
  }
}

impl fmt::Debug for HookTable {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("HookTable")
      .field("bind", &self.bind.keys().collect::<Vec<_>>())
      .field("make", &self.make.keys().collect::<Vec<_>>())
      .field("resolve", &self.resolve.keys().collect::<Vec<_>>())
      .finish()
  }
}

impl Container {
  /// Listens for `key` (a name, or a class/type) being bound.
  pub fn on_bind<F>(&mut self, key: impl Into<Key>, listener: F) -> &mut Self
  where
    F: Fn(&Value, &Container) -> Result<()> + Send + Sync + 'static,
  {
    self.on(Phase::Bind, key, listener)
  }

  /// Listens for `key` being made.
  pub fn on_make<F>(&mut self, key: impl Into<Key>, listener: F) -> &mut Self
  where
    F: Fn(&Value, &Container) -> Result<()> + Send + Sync + 'static,
  {
    self.on(Phase::Make, key, listener)
  }

  /// Listens for `key` being injected into a resolved target.
  pub fn on_resolve<F>(&mut self, key: impl Into<Key>, listener: F) -> &mut Self
  where
    F: Fn(&Value, &Container) -> Result<()> + Send + Sync + 'static,
  {
    self.on(Phase::Resolve, key, listener)
  }

  pub fn on<F>(&mut self, phase: Phase, key: impl Into<Key>, listener: F) -> &mut Self
  where
    F: Fn(&Value, &Container) -> Result<()> + Send + Sync + 'static,
  {
    self.hooks.register(phase, key.into(), Arc::new(listener));
    self
  }

  /// Number of listeners registered for a phase, across all keys.
  pub fn listener_count(&self, phase: Phase) -> usize {
    self.hooks.listener_count(phase)
  }

  /// Fires `phase` for `key`/`value`. Listeners run inline, in order; the
  /// first error aborts the remaining listeners and is returned as-is.
  pub fn fire_hook(&self, phase: Phase, key: &Key, value: &Value) -> Result<()> {
    let listeners = self
      .hooks
      .eligible(phase, key, value, self.config().hook_dispatch);
    if listeners.is_empty() {
      return Ok(());
    }

    trace!(%phase, %key, listeners = listeners.len(), "firing hook");
    for listener in listeners {
      listener(value, self)?;
    }
    Ok(())
  }
}
