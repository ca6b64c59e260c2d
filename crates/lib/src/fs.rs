//! Filesystem access used by the metadata reader and hook lookup.
//!
//! The manager only needs three questions answered about package files, so
//! they sit behind a small trait that tests and embedders can replace.

use std::io;
use std::path::Path;

pub trait PackageFs {
  /// Whether anything exists at `path`.
  fn exists(&self, path: &Path) -> bool;

  /// Read the whole file at `path`.
  fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

  /// Whether `path` is a regular file the current user may execute.
  fn is_executable(&self, path: &Path) -> bool;
}

/// [`PackageFs`] backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl PackageFs for LocalFs {
  fn exists(&self, path: &Path) -> bool {
    path.exists()
  }

  fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
    std::fs::read(path)
  }

  #[cfg(unix)]
  fn is_executable(&self, path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
      .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
      .unwrap_or(false)
  }

  #[cfg(not(unix))]
  fn is_executable(&self, path: &Path) -> bool {
    path.is_file()
  }
}
