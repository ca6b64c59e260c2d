//! Install hook execution.
//!
//! A package may ship an executable `install-hook` next to its descriptor.
//! The manager runs it during install; a failure is downgraded to a warning
//! on the install result.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info};

use crate::metadata::PackageDescriptor;
use crate::namespace::Namespace;

/// What the hook is being run for.
#[derive(Debug, Clone, Copy)]
pub struct HookContext<'a> {
  pub namespace: Namespace,
  pub package: &'a PackageDescriptor,
  pub package_dir: &'a Path,
}

/// Errors that can occur while running an install hook.
#[derive(Debug, Error)]
pub enum HookError {
  /// The hook file exists but cannot be executed.
  #[error("{} is not executable", .path.display())]
  NotExecutable { path: PathBuf },

  /// The hook process could not be started.
  #[error("failed to spawn {}: {source}", .path.display())]
  Spawn {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// The hook ran but did not exit successfully.
  #[error("{} exited with code {code:?}", .path.display())]
  Exited { path: PathBuf, code: Option<i32> },

  /// The hook did not finish within the configured timeout.
  #[error("{} timed out after {timeout:?}", .path.display())]
  TimedOut { path: PathBuf, timeout: Duration },

  /// The async runtime driving the hook could not be created.
  #[error("failed to start hook runtime: {0}")]
  Runtime(#[source] io::Error),
}

/// Runs install hooks. Implementations block until the hook finishes.
pub trait HookRunner {
  fn run(&self, hook: &Path, ctx: &HookContext<'_>) -> Result<(), HookError>;
}

/// [`HookRunner`] that spawns the hook as a child process.
///
/// The hook runs with the package directory as its working directory and
/// `PYSYS_NAMESPACE`, `PYSYS_PACKAGE` and `PYSYS_VERSION` set. With a timeout
/// configured, an overrunning hook is killed and reported as timed out.
///
/// `run` drives its own single-threaded runtime, so it must not be called
/// from inside another tokio runtime.
#[derive(Debug, Clone, Default)]
pub struct ProcessHookRunner {
  timeout: Option<Duration>,
}

impl ProcessHookRunner {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_timeout(timeout: Option<Duration>) -> Self {
    Self { timeout }
  }

  pub fn timeout(&self) -> Option<Duration> {
    self.timeout
  }
}

impl HookRunner for ProcessHookRunner {
  fn run(&self, hook: &Path, ctx: &HookContext<'_>) -> Result<(), HookError> {
    let rt = tokio::runtime::Builder::new_current_thread()
      .enable_all()
      .build()
      .map_err(HookError::Runtime)?;
    rt.block_on(run_hook(hook, ctx, self.timeout))
  }
}

async fn run_hook(hook: &Path, ctx: &HookContext<'_>, timeout: Option<Duration>) -> Result<(), HookError> {
  info!(hook = %hook.display(), package = %ctx.package.name, "running install hook");

  let mut command = Command::new(hook);
  command
    .current_dir(ctx.package_dir)
    .env("PYSYS_NAMESPACE", ctx.namespace.as_str())
    .env("PYSYS_PACKAGE", &ctx.package.name)
    .env("PYSYS_VERSION", &ctx.package.version)
    .stdin(Stdio::null())
    .stdout(Stdio::piped())
    .stderr(Stdio::piped())
    .kill_on_drop(true);

  let spawn_err = |source| HookError::Spawn {
    path: hook.to_path_buf(),
    source,
  };

  let output = match timeout {
    Some(limit) => match tokio::time::timeout(limit, command.output()).await {
      Ok(result) => result.map_err(spawn_err)?,
      Err(_) => {
        return Err(HookError::TimedOut {
          path: hook.to_path_buf(),
          timeout: limit,
        });
      }
    },
    None => command.output().await.map_err(spawn_err)?,
  };

  let stdout = String::from_utf8_lossy(&output.stdout);
  let stderr = String::from_utf8_lossy(&output.stderr);
  if !stdout.trim().is_empty() {
    debug!(stdout = %stdout.trim(), "hook stdout");
  }
  if !stderr.trim().is_empty() {
    debug!(stderr = %stderr.trim(), "hook stderr");
  }

  if !output.status.success() {
    return Err(HookError::Exited {
      path: hook.to_path_buf(),
      code: output.status.code(),
    });
  }

  Ok(())
}
