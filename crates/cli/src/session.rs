//! Per-process session: settings, state file and lock around one manager.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use tracing::debug;

use pysys_lib::config::Settings;
use pysys_lib::fs::LocalFs;
use pysys_lib::hook::ProcessHookRunner;
use pysys_lib::platform::paths;
use pysys_lib::state::StateFile;
use pysys_lib::state_lock::{LockMode, StateLock};
use pysys_lib::{NamespaceRoots, PackageManager};

/// Overrides given on the command line.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
  pub root: Option<PathBuf>,
  pub hook_timeout: Option<Duration>,
}

pub struct Session {
  manager: PackageManager,
  state_path: PathBuf,
  _lock: StateLock,
}

impl Session {
  /// Lock the state file and restore the manager from the state file.
  ///
  /// Flags win over `PYSYS_ROOT`, which wins over `config.toml`.
  pub fn open(options: &SessionOptions, mode: LockMode, command: &str) -> Result<Self> {
    let settings = Settings::load_default()?;

    let root = options.root.clone().unwrap_or_else(|| settings.packages_root());
    let root = dunce::canonicalize(&root).unwrap_or(root);
    let timeout = options.hook_timeout.or(settings.hook_timeout());

    let state_path = paths::state_file();
    let lock = StateLock::acquire(&state_path, mode, command)?;
    let state = StateFile::load(&state_path)?.unwrap_or_default();

    debug!(
      root = %root.display(),
      state = %state_path.display(),
      policy = ?settings.gate_policy,
      "opened session"
    );

    let manager = PackageManager::new(
      NamespaceRoots::from_base(&root),
      LocalFs,
      ProcessHookRunner::with_timeout(timeout),
    )
    .with_policy(settings.gate_policy);

    Ok(Self {
      manager: state.restore(manager),
      state_path,
      _lock: lock,
    })
  }

  pub fn manager(&self) -> &PackageManager {
    &self.manager
  }

  pub fn manager_mut(&mut self) -> &mut PackageManager {
    &mut self.manager
  }

  pub fn save(&self) -> Result<()> {
    StateFile::capture(&self.manager).save(&self.state_path)?;
    Ok(())
  }
}
