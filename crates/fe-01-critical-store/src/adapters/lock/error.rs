use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from data directory locking
#[derive(Debug, Error)]
pub enum LockError {
    #[error("Failed to create lock file: {0}")]
    CreateFailed(#[source] io::Error),

    #[error("Data directory {} already in use (holder pid {:?})", .path.display(), .pid)]
    AlreadyLocked { pid: Option<u32>, path: PathBuf },

    #[error("Failed to write PID to lock file: {0}")]
    WriteFailed(#[source] io::Error),
}
