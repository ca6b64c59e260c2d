//! Errors reported by the package lifecycle operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::hook::HookError;
use crate::metadata::DescriptorError;
use crate::namespace::Namespace;

/// Errors that can occur while managing packages.
#[derive(Debug, Error)]
pub enum PackageError {
  /// An operation on a gated namespace was attempted while the gate is off.
  #[error("the '{namespace}' namespace is disabled; enable the gate first")]
  GateDisabled { namespace: Namespace },

  /// The package directory has no descriptor file.
  #[error("no metadata for {namespace}/{name} (expected {})", .path.display())]
  MetadataMissing {
    namespace: Namespace,
    name: String,
    path: PathBuf,
  },

  /// The descriptor exists but `name` and `version` could not be extracted.
  #[error("malformed metadata at {}: {source}", .path.display())]
  MetadataMalformed {
    path: PathBuf,
    #[source]
    source: DescriptorError,
  },

  /// The package is already present in the namespace.
  #[error("{name} is already installed in '{namespace}'")]
  AlreadyInstalled { namespace: Namespace, name: String },

  /// The package is not present in the namespace.
  #[error("{name} is not installed in '{namespace}'")]
  PackageNotFound { namespace: Namespace, name: String },

  /// The install hook failed. Only ever reported as a warning on an install.
  #[error("install hook for {namespace}/{name} failed: {source}")]
  InstallHookFailed {
    namespace: Namespace,
    name: String,
    #[source]
    source: HookError,
  },

  /// The package name cannot be used as a directory name.
  #[error("invalid package name {0:?}")]
  InvalidPackageName(String),

  /// Reading package files failed for a reason other than absence.
  #[error("failed to read {}: {source}", .path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}
