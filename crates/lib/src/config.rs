//! User settings loaded from `config.toml`.
//!
//! ```toml
//! packages_root = "/srv/pysys/packages"
//! gate_policy = "strict"          # or "mutations-only"
//! hook_timeout_secs = 60
//! ```
//!
//! Every key is optional. A missing file yields the defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::ROOT_ENV;
use crate::gate::GatePolicy;
use crate::platform::paths;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
  /// Directory holding the `standard` and `obn` namespace directories.
  pub packages_root: Option<PathBuf>,
  pub gate_policy: GatePolicy,
  /// Kill install hooks running longer than this many seconds.
  pub hook_timeout_secs: Option<u64>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read {}: {source}", .path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("invalid settings in {}: {source}", .path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },
}

impl Settings {
  /// Load settings from `path`, falling back to defaults if it is absent.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let content = match fs::read_to_string(path) {
      Ok(content) => content,
      Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
      Err(source) => {
        return Err(ConfigError::Read {
          path: path.to_path_buf(),
          source,
        });
      }
    };

    toml::from_str(&content).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Load settings from the user's config directory.
  pub fn load_default() -> Result<Self, ConfigError> {
    Self::load(&paths::config_file())
  }

  /// `PYSYS_ROOT`, then `packages_root`, then the platform default.
  pub fn packages_root(&self) -> PathBuf {
    if let Some(root) = std::env::var_os(ROOT_ENV) {
      return PathBuf::from(root);
    }
    self
      .packages_root
      .clone()
      .unwrap_or_else(paths::default_packages_root)
  }

  pub fn hook_timeout(&self) -> Option<Duration> {
    self.hook_timeout_secs.map(Duration::from_secs)
  }
}
