//! # File Lock Implementation
//!
//! Uses `fs2` for cross-platform file locking (flock on Unix, LockFile on Windows).

use super::error::LockError;
use super::security::{is_process_running, read_holder_pid, MAX_STALE_RECLAIMS};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Exclusive lock on an installation's data directory.
///
/// Held for the lifetime of a file-backed journal, released on drop.
#[derive(Debug)]
pub struct DataDirLock {
    /// Kept open to maintain the lock.
    file: File,
    path: PathBuf,
    pid: u32,
}

impl DataDirLock {
    /// Lock file name
    pub const LOCK_FILE: &'static str = "LOCK";

    /// Acquire the lock without waiting.
    ///
    /// A lock whose recorded holder is no longer running is reclaimed.
    ///
    /// # Errors
    ///
    /// `LockError::AlreadyLocked` if a live process holds the directory.
    pub fn acquire(data_dir: &Path) -> Result<Self, LockError> {
        let lock_path = data_dir.join(Self::LOCK_FILE);
        let mut reclaims = 0;

        loop {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(false)
                .open(&lock_path)
                .map_err(LockError::CreateFailed)?;

            match file.try_lock_exclusive() {
                Ok(()) => {
                    let pid = std::process::id();
                    let mut locked = file;
                    locked.set_len(0).map_err(LockError::WriteFailed)?;
                    writeln!(locked, "{}", pid).map_err(LockError::WriteFailed)?;
                    locked.sync_all().map_err(LockError::WriteFailed)?;
                    debug!(path = %lock_path.display(), pid, "Data directory locked");

                    return Ok(Self {
                        file: locked,
                        path: lock_path,
                        pid,
                    });
                }
                Err(_) => {
                    let holder = read_holder_pid(&lock_path);
                    drop(file);

                    if let Some(pid) = holder {
                        if reclaims < MAX_STALE_RECLAIMS && !is_process_running(pid) {
                            warn!(path = %lock_path.display(), pid, "Reclaiming stale lock");
                            let _ = std::fs::remove_file(&lock_path);
                            reclaims += 1;
                            continue;
                        }
                    }

                    return Err(LockError::AlreadyLocked {
                        pid: holder,
                        path: lock_path,
                    });
                }
            }
        }
    }

    /// PID of the process holding the lock.
    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for DataDirLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
        let _ = std::fs::remove_file(&self.path);
    }
}
