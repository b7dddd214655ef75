//! # Domain Errors
//!
//! Error types for the critical data store.

use crate::adapters::lock::LockError;
use crate::domain::snapshot::{SnapshotDecodeError, SnapshotEncodeError};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the journal and its snapshot media.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The committed snapshot exists but does not verify. Fatal at startup.
    #[error("Committed snapshot at {location} is corrupt: {source}")]
    StoreCorrupt {
        location: String,
        #[source]
        source: SnapshotDecodeError,
    },

    /// The in-memory store could not be framed for commit.
    #[error("Failed to encode snapshot: {0}")]
    Encode(#[from] SnapshotEncodeError),

    /// A media operation failed.
    #[error("I/O error while {operation} {}: {source}", .path.display())]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The data directory is held by another process.
    #[error(transparent)]
    Lock(#[from] LockError),
}

impl StoreError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    /// Whether this error means the committed snapshot cannot be trusted.
    pub fn is_corruption(&self) -> bool {
        matches!(self, StoreError::StoreCorrupt { .. })
    }
}
