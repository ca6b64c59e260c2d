//! Advisory lock guarding the state file.
//!
//! The lock lives next to the state file as `.lock`. Readers take it shared
//! and writers exclusive, so two `pysys` processes never interleave updates
//! to the same state. An exclusive holder records who it is so a blocked
//! process can say what it is waiting for.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const LOCK_FILENAME: &str = ".lock";
const HOLDER_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
  Shared,
  Exclusive,
}

/// Who holds the exclusive lock, as written into the lock file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockHolder {
  pub version: u32,
  pub pid: u32,
  pub started_at_unix: u64,
  /// Operation being run, e.g. `install tool-a` or `shell`.
  pub command: String,
  pub state_file: PathBuf,
}

/// Holder of a contended lock, if it could be identified.
#[derive(Debug)]
pub enum Holder {
  Known(LockHolder),
  Unknown,
}

impl fmt::Display for Holder {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Holder::Known(h) => write!(
        f,
        "'{}' (PID {}, started at Unix time {})",
        h.command, h.pid, h.started_at_unix
      ),
      Holder::Unknown => f.write_str("another process"),
    }
  }
}

#[derive(Debug, Error)]
pub enum StateLockError {
  #[error(
    "package state {} is in use by {holder}\n\
     If no other pysys process is running, delete the lock file:\n  {}",
    .state_file.display(),
    .lock_path.display()
  )]
  Busy {
    state_file: PathBuf,
    lock_path: PathBuf,
    holder: Holder,
  },

  #[error("cannot open state lock {}: {source}", .lock_path.display())]
  Open {
    lock_path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("cannot lock package state {}: {source}", .lock_path.display())]
  Lock {
    lock_path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("cannot record lock holder in {}: {source}", .lock_path.display())]
  RecordHolder {
    lock_path: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// Held lock on a state file. Released on drop.
#[derive(Debug)]
pub struct StateLock {
  file: File,
  lock_path: PathBuf,
  mode: LockMode,
}

impl StateLock {
  /// Lock the state file at `state_file` for `command`.
  ///
  /// The state file itself need not exist yet; its directory is created.
  /// Fails immediately with [`StateLockError::Busy`] instead of waiting.
  pub fn acquire(state_file: &Path, mode: LockMode, command: &str) -> Result<Self, StateLockError> {
    let dir = state_file.parent().unwrap_or_else(|| Path::new("."));
    let lock_path = dir.join(LOCK_FILENAME);
    let open_err = |source| StateLockError::Open {
      lock_path: lock_path.clone(),
      source,
    };

    std::fs::create_dir_all(dir).map_err(open_err)?;
    let file = OpenOptions::new()
      .read(true)
      .write(true)
      .create(true)
      .truncate(false)
      .open(&lock_path)
      .map_err(open_err)?;

    match try_lock(&file, mode) {
      Ok(()) => {}
      Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
        return Err(StateLockError::Busy {
          state_file: state_file.to_path_buf(),
          holder: current_holder(&lock_path),
          lock_path,
        });
      }
      Err(source) => return Err(StateLockError::Lock { lock_path, source }),
    }
    debug!(lock = %lock_path.display(), ?mode, command, "acquired state lock");

    let lock = StateLock { file, lock_path, mode };
    if mode == LockMode::Exclusive {
      lock.record_holder(state_file, command)?;
    }
    Ok(lock)
  }

  /// The recorded holder, read through the held handle.
  pub fn holder(&self) -> io::Result<LockHolder> {
    let mut file = &self.file;
    file.seek(SeekFrom::Start(0))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    serde_json::from_str(&contents).map_err(io::Error::other)
  }

  pub fn lock_path(&self) -> &Path {
    &self.lock_path
  }

  pub fn mode(&self) -> LockMode {
    self.mode
  }

  fn record_holder(&self, state_file: &Path, command: &str) -> Result<(), StateLockError> {
    let holder = LockHolder {
      version: HOLDER_VERSION,
      pid: std::process::id(),
      started_at_unix: SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs(),
      command: command.to_string(),
      state_file: state_file.to_path_buf(),
    };
    let record_err = |source| StateLockError::RecordHolder {
      lock_path: self.lock_path.clone(),
      source,
    };

    self.file.set_len(0).map_err(record_err)?;
    let mut writer = io::BufWriter::new(&self.file);
    serde_json::to_writer_pretty(&mut writer, &holder).map_err(|e| record_err(io::Error::other(e)))?;
    writer.flush().map_err(record_err)
  }
}

/// Best effort: a shared holder records nothing, and a crashed writer may
/// have left a truncated file behind.
fn current_holder(lock_path: &Path) -> Holder {
  std::fs::read_to_string(lock_path)
    .ok()
    .and_then(|contents| serde_json::from_str::<LockHolder>(&contents).ok())
    .map_or(Holder::Unknown, Holder::Known)
}

#[cfg(unix)]
fn try_lock(file: &File, mode: LockMode) -> io::Result<()> {
  use rustix::fs::{FlockOperation, flock};
  use std::os::unix::io::AsFd;

  let operation = match mode {
    LockMode::Shared => FlockOperation::NonBlockingLockShared,
    LockMode::Exclusive => FlockOperation::NonBlockingLockExclusive,
  };

  flock(file.as_fd(), operation).map_err(|e| io::Error::from_raw_os_error(e.raw_os_error()))
}

#[cfg(windows)]
fn try_lock(file: &File, mode: LockMode) -> io::Result<()> {
  use std::os::windows::io::AsRawHandle;
  use windows_sys::Win32::Foundation::HANDLE;
  use windows_sys::Win32::Storage::FileSystem::{LOCKFILE_EXCLUSIVE_LOCK, LOCKFILE_FAIL_IMMEDIATELY, LockFileEx};

  let handle = file.as_raw_handle() as HANDLE;
  let flags = match mode {
    LockMode::Shared => LOCKFILE_FAIL_IMMEDIATELY,
    LockMode::Exclusive => LOCKFILE_FAIL_IMMEDIATELY | LOCKFILE_EXCLUSIVE_LOCK,
  };

  // SAFETY: OVERLAPPED is valid when zero-initialized and the handle is open.
  let result = unsafe {
    let mut overlapped = std::mem::zeroed();
    LockFileEx(handle, flags, 0, 1, 0, &mut overlapped)
  };

  if result == 0 {
    Err(io::Error::last_os_error())
  } else {
    Ok(())
  }
}
