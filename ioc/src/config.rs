//! Construction-time configuration and the `ContainerBuilder`.

use crate::container::Container;
use crate::types::TypeRegistry;

/// Controls which listeners run once a hook phase is found eligible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HookDispatch {
  /// Any matching key unlocks every listener registered for the phase, in
  /// key registration order and then listener registration order.
  #[default]
  FanOut,
  /// Only the listener lists whose key matched are run.
  MatchedOnly,
}

/// Options recognized when a `Container` is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ContainerConfig {
  /// Forbid rebinding an existing key. Fixed for the container's lifetime.
  pub strict: bool,
  /// When not strict, a rebind replaces the prior value. When false the
  /// first binding for a key wins.
  #[cfg_attr(feature = "serde", serde(alias = "override"))]
  pub override_bindings: bool,
  /// Resolve unannotated parameters by matching their name to a string key.
  pub resolve_parameters: bool,
  pub hook_dispatch: HookDispatch,
}

impl Default for ContainerConfig {
  fn default() -> Self {
    Self {
      strict: false,
      override_bindings: true,
      resolve_parameters: false,
      hook_dispatch: HookDispatch::FanOut,
    }
  }
}

/// A builder for creating `Container` instances.
#[derive(Debug, Default)]
pub struct ContainerBuilder {
  config: ContainerConfig,
  types: TypeRegistry,
}

impl ContainerBuilder {
  pub fn new() -> Self {
    Self::default()
  }

  /// Starts from an existing configuration, e.g. one loaded from a file.
  pub fn from_config(config: ContainerConfig) -> Self {
    Self {
      config,
      types: TypeRegistry::new(),
    }
  }

  pub fn strict(mut self, strict: bool) -> Self {
    self.config.strict = strict;
    self
  }

  pub fn override_bindings(mut self, override_bindings: bool) -> Self {
    self.config.override_bindings = override_bindings;
    self
  }

  pub fn resolve_parameters(mut self, resolve_parameters: bool) -> Self {
    self.config.resolve_parameters = resolve_parameters;
    self
  }

  pub fn hook_dispatch(mut self, dispatch: HookDispatch) -> Self {
    self.config.hook_dispatch = dispatch;
    self
  }

  /// Declares type relations up front, before any binding exists.
  pub fn types(mut self, declare: impl FnOnce(&mut TypeRegistry)) -> Self {
    declare(&mut self.types);
    self
  }

  pub fn build(self) -> Container {
    Container::from_parts(self.config, self.types)
  }
}
