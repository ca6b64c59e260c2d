//! Package namespaces and their directory layout.
//!
//! Every package lives in exactly one namespace. Each namespace has its own
//! root directory holding one subdirectory per package:
//!
//! ```text
//! <packages_root>/
//! ├── standard/
//! │   └── tool-a/
//! │       ├── metadata
//! │       └── install-hook   (optional)
//! └── obn/
//!     └── net-tool/
//!         └── metadata
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{INSTALL_HOOK_FILENAME, METADATA_FILENAME};

/// An independent package-installation domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
  /// The always-available namespace.
  Standard,
  /// The opt-in namespace guarded by the feature gate.
  Obn,
}

impl Namespace {
  pub const ALL: [Namespace; 2] = [Namespace::Standard, Namespace::Obn];

  pub fn as_str(self) -> &'static str {
    match self {
      Namespace::Standard => "standard",
      Namespace::Obn => "obn",
    }
  }

  /// Whether operations on this namespace require the feature gate.
  pub fn is_gated(self) -> bool {
    matches!(self, Namespace::Obn)
  }
}

impl fmt::Display for Namespace {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown namespace '{0}', expected 'standard' or 'obn'")]
pub struct ParseNamespaceError(String);

impl FromStr for Namespace {
  type Err = ParseNamespaceError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "standard" | "std" => Ok(Namespace::Standard),
      "obn" => Ok(Namespace::Obn),
      _ => Err(ParseNamespaceError(s.to_string())),
    }
  }
}

/// Root directories of both namespaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceRoots {
  standard: PathBuf,
  obn: PathBuf,
}

impl NamespaceRoots {
  /// Lay out both namespaces under a common packages root.
  pub fn from_base(base: impl AsRef<Path>) -> Self {
    let base = base.as_ref();
    Self {
      standard: base.join(Namespace::Standard.as_str()),
      obn: base.join(Namespace::Obn.as_str()),
    }
  }

  /// Use explicit, possibly unrelated, directories for each namespace.
  pub fn new(standard: impl Into<PathBuf>, obn: impl Into<PathBuf>) -> Self {
    Self {
      standard: standard.into(),
      obn: obn.into(),
    }
  }

  pub fn root(&self, namespace: Namespace) -> &Path {
    match namespace {
      Namespace::Standard => &self.standard,
      Namespace::Obn => &self.obn,
    }
  }

  pub fn package_dir(&self, namespace: Namespace, name: &str) -> PathBuf {
    self.root(namespace).join(name)
  }

  pub fn metadata_path(&self, namespace: Namespace, name: &str) -> PathBuf {
    self.package_dir(namespace, name).join(METADATA_FILENAME)
  }

  pub fn hook_path(&self, namespace: Namespace, name: &str) -> PathBuf {
    self.package_dir(namespace, name).join(INSTALL_HOOK_FILENAME)
  }
}
