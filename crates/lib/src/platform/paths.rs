use crate::consts::{APP_NAME, CONFIG_FILENAME, DATA_DIR_ENV, STATE_FILENAME};
use std::path::PathBuf;

/// Returns the user's home directory
#[cfg(windows)]
pub fn home_dir() -> PathBuf {
  std::env::var_os("USERPROFILE")
    .map(PathBuf::from)
    .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns the user's home directory
#[cfg(not(windows))]
pub fn home_dir() -> PathBuf {
  std::env::var_os("HOME")
    .map(PathBuf::from)
    .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns the directory for configuration files for the application
#[cfg(windows)]
pub fn config_dir() -> PathBuf {
  std::env::var_os("APPDATA")
    .map(PathBuf::from)
    .unwrap_or_else(home_dir)
    .join(APP_NAME)
}

/// Returns the directory for configuration files for the application
#[cfg(not(windows))]
pub fn config_dir() -> PathBuf {
  let config_home = std::env::var("XDG_CONFIG_HOME")
    .map(PathBuf::from)
    .unwrap_or_else(|_| home_dir().join(".config"));
  config_home.join(APP_NAME)
}

/// Returns the directory for data files for the application.
///
/// `PYSYS_DATA_DIR` takes precedence over the platform default.
#[cfg(windows)]
pub fn data_dir() -> PathBuf {
  if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
    return PathBuf::from(dir);
  }
  std::env::var_os("LOCALAPPDATA")
    .map(PathBuf::from)
    .unwrap_or_else(home_dir)
    .join(APP_NAME)
}

/// Returns the directory for data files for the application.
///
/// `PYSYS_DATA_DIR` takes precedence over the platform default.
#[cfg(not(windows))]
pub fn data_dir() -> PathBuf {
  if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
    return PathBuf::from(dir);
  }
  let data_home = std::env::var("XDG_DATA_HOME")
    .map(PathBuf::from)
    .unwrap_or_else(|_| home_dir().join(".local").join("share"));
  data_home.join(APP_NAME)
}

/// Default location of the namespace directories when nothing overrides it.
pub fn default_packages_root() -> PathBuf {
  data_dir().join("packages")
}

pub fn config_file() -> PathBuf {
  config_dir().join(CONFIG_FILENAME)
}

pub fn state_file() -> PathBuf {
  data_dir().join(STATE_FILENAME)
}
