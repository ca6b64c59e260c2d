//! Package descriptor parsing.
//!
//! Each package directory carries a `metadata` file in TOML form:
//!
//! ```toml
//! name = "net-tool"
//! version = "1.0"
//! description = "optional, ignored"
//! ```
//!
//! Only `name` and `version` are required. Both must be non-blank strings and
//! are stored exactly as written; versions are opaque.
//! Descriptors are read fresh on every call so out-of-band edits are seen.

use std::io;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::error::PackageError;
use crate::fs::PackageFs;
use crate::namespace::{Namespace, NamespaceRoots};

/// Name and version of a package as declared by its descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageDescriptor {
  pub name: String,
  pub version: String,
}

/// Why a descriptor could not be turned into a [`PackageDescriptor`].
#[derive(Debug, Error)]
pub enum DescriptorError {
  #[error("descriptor is not valid UTF-8")]
  NotUtf8,

  #[error("invalid TOML: {0}")]
  Syntax(#[source] toml::de::Error),

  #[error("missing required field '{0}'")]
  MissingField(&'static str),

  #[error("field '{field}' {reason}")]
  InvalidField { field: &'static str, reason: &'static str },

  #[error("descriptor names '{found}' but the package directory is '{expected}'")]
  NameMismatch { expected: String, found: String },
}

impl PackageDescriptor {
  /// Parse raw descriptor bytes.
  pub fn parse(bytes: &[u8]) -> Result<Self, DescriptorError> {
    let text = std::str::from_utf8(bytes).map_err(|_| DescriptorError::NotUtf8)?;
    let table: toml::Table = toml::from_str(text).map_err(DescriptorError::Syntax)?;

    Ok(Self {
      name: required_string(&table, "name")?,
      version: required_string(&table, "version")?,
    })
  }
}

fn required_string(table: &toml::Table, field: &'static str) -> Result<String, DescriptorError> {
  let value = table.get(field).ok_or(DescriptorError::MissingField(field))?;
  let text = value.as_str().ok_or(DescriptorError::InvalidField {
    field,
    reason: "must be a string",
  })?;
  if text.trim().is_empty() {
    return Err(DescriptorError::InvalidField {
      field,
      reason: "must not be empty",
    });
  }
  Ok(text.to_string())
}

/// Reject names that would escape the namespace root or name no directory.
pub fn validate_package_name(name: &str) -> Result<(), PackageError> {
  let invalid = name.is_empty()
    || name == "."
    || name == ".."
    || name.contains(['/', '\\'])
    || name.chars().any(char::is_control);
  if invalid {
    return Err(PackageError::InvalidPackageName(name.to_string()));
  }
  Ok(())
}

/// Loads descriptors from `<namespace_root>/<package>/metadata`.
#[derive(Debug, Clone)]
pub struct MetadataReader<F> {
  fs: F,
  roots: NamespaceRoots,
}

impl<F: PackageFs> MetadataReader<F> {
  pub fn new(fs: F, roots: NamespaceRoots) -> Self {
    Self { fs, roots }
  }

  pub fn fs(&self) -> &F {
    &self.fs
  }

  pub fn roots(&self) -> &NamespaceRoots {
    &self.roots
  }

  /// Read and validate the descriptor of `name` in `namespace`.
  pub fn read(&self, namespace: Namespace, name: &str) -> Result<PackageDescriptor, PackageError> {
    validate_package_name(name)?;
    let path = self.roots.metadata_path(namespace, name);
    debug!(path = %path.display(), "reading package metadata");

    let bytes = match self.fs.read(&path) {
      Ok(bytes) => bytes,
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        return Err(PackageError::MetadataMissing {
          namespace,
          name: name.to_string(),
          path,
        });
      }
      Err(e) => return Err(PackageError::Io { path, source: e }),
    };

    let descriptor = PackageDescriptor::parse(&bytes).map_err(|source| malformed(&path, source))?;

    if descriptor.name != name {
      return Err(malformed(
        &path,
        DescriptorError::NameMismatch {
          expected: name.to_string(),
          found: descriptor.name,
        },
      ));
    }

    Ok(descriptor)
  }
}

fn malformed(path: &Path, source: DescriptorError) -> PackageError {
  PackageError::MetadataMalformed {
    path: path.to_path_buf(),
    source,
  }
}
