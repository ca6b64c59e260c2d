//! Test utilities for pysys-lib.
//!
//! Helpers for laying out package directories under a temporary root.

use std::path::{Path, PathBuf};

use crate::consts::{INSTALL_HOOK_FILENAME, METADATA_FILENAME};
use crate::namespace::Namespace;

/// Write a raw descriptor for `name` under `base/<namespace>/<name>/metadata`.
pub fn write_package_file(base: &Path, namespace: Namespace, name: &str, content: &str) -> PathBuf {
  let dir = base.join(namespace.as_str()).join(name);
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join(METADATA_FILENAME);
  std::fs::write(&path, content).unwrap();
  path
}

/// Write a well-formed descriptor.
pub fn write_package(base: &Path, namespace: Namespace, name: &str, version: &str) -> PathBuf {
  write_package_file(
    base,
    namespace,
    name,
    &format!("name = \"{}\"\nversion = \"{}\"\n", name, version),
  )
}

/// Write an executable shell script as the package's install hook.
#[cfg(unix)]
pub fn write_hook(base: &Path, namespace: Namespace, name: &str, script: &str) -> PathBuf {
  use std::os::unix::fs::PermissionsExt;

  let dir = base.join(namespace.as_str()).join(name);
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join(INSTALL_HOOK_FILENAME);
  std::fs::write(&path, format!("#!/bin/sh\n{}\n", script)).unwrap();
  std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
  path
}
