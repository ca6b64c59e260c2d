//! Persistence of the registry and gate between runs.
//!
//! The core keeps everything in memory. Front ends that run one command per
//! process save a [`StateFile`] after each mutation and restore it on start.
//!
//! # State File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "gate_enabled": false,
//!   "packages": [
//!     { "namespace": "standard", "name": "tool-a", "version": "1.0", "installed_at": 0 }
//!   ]
//! }
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::fs::PackageFs;
use crate::hook::HookRunner;
use crate::manager::PackageManager;
use crate::registry::InstalledPackage;

/// Current state file format version.
pub const STATE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateFile {
  pub version: u32,
  pub gate_enabled: bool,
  pub packages: Vec<InstalledPackage>,
}

/// Errors that can occur when working with the state file.
#[derive(Debug, Error)]
pub enum StateError {
  #[error("failed to read state file: {0}")]
  Read(#[source] io::Error),

  #[error("failed to write state file: {0}")]
  Write(#[source] io::Error),

  #[error("failed to parse state file: {0}")]
  Parse(#[source] serde_json::Error),

  #[error("failed to serialize state file: {0}")]
  Serialize(#[source] serde_json::Error),

  #[error("unsupported state file version {0}, expected {STATE_VERSION}")]
  UnsupportedVersion(u32),
}

impl Default for StateFile {
  fn default() -> Self {
    Self::new()
  }
}

impl StateFile {
  pub fn new() -> Self {
    Self {
      version: STATE_VERSION,
      gate_enabled: false,
      packages: Vec::new(),
    }
  }

  /// Snapshot the gate and registry of `manager`.
  pub fn capture<F: PackageFs, H: HookRunner>(manager: &PackageManager<F, H>) -> Self {
    Self {
      version: STATE_VERSION,
      gate_enabled: manager.gate_status(),
      packages: manager.registry().records().cloned().collect(),
    }
  }

  /// Load gate and registry into `manager`, replacing what it held.
  pub fn restore<F: PackageFs, H: HookRunner>(self, manager: PackageManager<F, H>) -> PackageManager<F, H> {
    manager.with_gate(self.gate_enabled).with_records(self.packages)
  }

  /// Load a state file from the given path.
  ///
  /// Returns `Ok(None)` if the file doesn't exist.
  pub fn load(path: &Path) -> Result<Option<Self>, StateError> {
    let content = match fs::read_to_string(path) {
      Ok(content) => content,
      Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
      Err(e) => return Err(StateError::Read(e)),
    };

    let state: StateFile = serde_json::from_str(&content).map_err(StateError::Parse)?;

    if state.version != STATE_VERSION {
      return Err(StateError::UnsupportedVersion(state.version));
    }

    debug!(path = %path.display(), packages = state.packages.len(), "loaded state");
    Ok(Some(state))
  }

  /// Save the state file, replacing any previous one atomically.
  pub fn save(&self, path: &Path) -> Result<(), StateError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).map_err(StateError::Write)?;

    let content = serde_json::to_string_pretty(self).map_err(StateError::Serialize)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(StateError::Write)?;
    tmp.write_all(content.as_bytes()).map_err(StateError::Write)?;
    tmp.persist(path).map_err(|e| StateError::Write(e.error))?;

    debug!(path = %path.display(), packages = self.packages.len(), "saved state");
    Ok(())
  }
}
