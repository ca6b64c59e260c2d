/// Application name, used for config and data directories.
pub const APP_NAME: &str = "pysys";

/// Name of the descriptor file inside each package directory.
pub const METADATA_FILENAME: &str = "metadata";

/// Name of the optional install hook inside each package directory.
pub const INSTALL_HOOK_FILENAME: &str = "install-hook";

/// Overrides the packages root directory.
pub const ROOT_ENV: &str = "PYSYS_ROOT";

/// Overrides the data directory holding the state file and lock.
pub const DATA_DIR_ENV: &str = "PYSYS_DATA_DIR";

/// Name of the settings file inside the config directory.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Name of the state file inside the data directory.
pub const STATE_FILENAME: &str = "state.json";
