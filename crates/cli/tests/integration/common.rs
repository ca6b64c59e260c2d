//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Isolated test environment.
///
/// Each test gets its own temporary directory with isolated packages root,
/// data directory and config directory.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  pub fn new() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  /// Packages root holding `standard/` and `obn/`.
  pub fn packages_path(&self) -> PathBuf {
    let p = self.temp.path().join("packages");
    std::fs::create_dir_all(&p).unwrap();
    dunce::canonicalize(&p).unwrap_or(p)
  }

  /// Data directory for the state file and lock.
  pub fn data_path(&self) -> PathBuf {
    self.temp.path().join("data")
  }

  /// Config home; settings live in `<config>/pysys/config.toml`.
  pub fn config_path(&self) -> PathBuf {
    self.temp.path().join("config")
  }

  /// Write a descriptor for `name` in `namespace`.
  pub fn publish(&self, namespace: &str, name: &str, version: &str) {
    let dir = self.packages_path().join(namespace).join(name);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
      dir.join("metadata"),
      format!("name = \"{}\"\nversion = \"{}\"\n", name, version),
    )
    .unwrap();
  }

  /// Write an executable install hook for `name` in `namespace`.
  #[cfg(unix)]
  pub fn hook(&self, namespace: &str, name: &str, script: &str) {
    use std::os::unix::fs::PermissionsExt;

    let path = self.packages_path().join(namespace).join(name).join("install-hook");
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", script)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
  }

  /// Write `config.toml`.
  pub fn write_config(&self, content: &str) {
    let dir = self.config_path().join("pysys");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), content).unwrap();
  }

  /// Parsed contents of the state file.
  pub fn state(&self) -> serde_json::Value {
    let content = std::fs::read_to_string(self.data_path().join("state.json")).unwrap();
    serde_json::from_str(&content).unwrap()
  }

  /// Get a pre-configured Command for the pysys binary.
  ///
  /// Sets environment variables for isolated testing:
  /// - `PYSYS_ROOT`: Isolated packages root
  /// - `PYSYS_DATA_DIR`: Isolated state and lock directory
  /// - `XDG_CONFIG_HOME` / `APPDATA`: Isolated settings
  pub fn pysys_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("pysys");
    cmd.env("PYSYS_ROOT", self.packages_path());
    cmd.env("PYSYS_DATA_DIR", self.data_path());
    cmd.env("XDG_CONFIG_HOME", self.config_path());
    cmd.env("APPDATA", self.config_path()); // For Windows
    cmd.env_remove("RUST_LOG");
    cmd
  }
}
