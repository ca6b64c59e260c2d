//! Feature gate for the opt-in `obn` namespace.

use serde::{Deserialize, Serialize};

use crate::error::PackageError;
use crate::namespace::Namespace;

/// Which operations on a gated namespace need the gate enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GatePolicy {
  /// Every operation, including listing, requires the gate.
  #[default]
  Strict,
  /// Only install, remove and update require the gate.
  MutationsOnly,
}

/// Kind of access an operation performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
  Read,
  Mutate,
}

/// Boolean flag unlocking gated namespaces. Starts disabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureGate {
  enabled: bool,
}

impl FeatureGate {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn enable(&mut self) {
    self.enabled = true;
  }

  pub fn disable(&mut self) {
    self.enabled = false;
  }

  pub fn set(&mut self, enabled: bool) {
    self.enabled = enabled;
  }

  pub fn is_enabled(&self) -> bool {
    self.enabled
  }

  /// Decide whether `access` to `namespace` is allowed under `policy`.
  pub fn check(&self, namespace: Namespace, access: Access, policy: GatePolicy) -> Result<(), PackageError> {
    if !namespace.is_gated() || self.enabled {
      return Ok(());
    }
    match (policy, access) {
      (GatePolicy::MutationsOnly, Access::Read) => Ok(()),
      _ => Err(PackageError::GateDisabled { namespace }),
    }
  }
}
