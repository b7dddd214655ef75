//! # File Medium
//!
//! Modifier/committed file pair in a data directory.
//!
//! ```text
//! commit:  frame ──write+fsync──→ critical.modifier ──rename──→ critical.committed
//!                                                              └─ fsync(dir)
//! load:    critical.modifier present? → discard (interrupted commit)
//!          critical.committed present? → warm start, else cold start
//! ```
//!
//! `rename` within one directory is atomic, so a crash at any point leaves
//! `critical.committed` holding either the previous or the new snapshot.

#[cfg(feature = "locking")]
use crate::adapters::lock::DataDirLock;
use crate::domain::config::{COMMITTED_FILE, MODIFIER_FILE};
use crate::domain::errors::StoreError;
use crate::ports::outbound::SnapshotMedium;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// File-backed snapshot medium.
#[derive(Debug)]
pub struct FileMedium {
    data_dir: PathBuf,
    modifier: PathBuf,
    committed: PathBuf,
    staged: bool,
    #[cfg(feature = "locking")]
    _lock: Option<DataDirLock>,
}

impl FileMedium {
    /// Open (creating if needed) a data directory.
    ///
    /// With `lock` set, an exclusive lock on the directory is held until the
    /// medium is dropped.
    pub fn open(data_dir: impl Into<PathBuf>, lock: bool) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)
            .map_err(|e| StoreError::io("creating data directory", &data_dir, e))?;

        #[cfg(feature = "locking")]
        let _lock = if lock {
            Some(DataDirLock::acquire(&data_dir)?)
        } else {
            None
        };
        #[cfg(not(feature = "locking"))]
        warn_unlocked(&data_dir, lock);

        Ok(Self {
            modifier: data_dir.join(MODIFIER_FILE),
            committed: data_dir.join(COMMITTED_FILE),
            data_dir,
            staged: false,
            #[cfg(feature = "locking")]
            _lock,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn committed_path(&self) -> &Path {
        &self.committed
    }

    pub fn modifier_path(&self) -> &Path {
        &self.modifier
    }

    /// Read the committed snapshot of `data_dir` without locking or
    /// touching the modifier file.
    pub fn read_committed(data_dir: &Path) -> Result<Option<Vec<u8>>, StoreError> {
        let committed = data_dir.join(COMMITTED_FILE);
        match fs::read(&committed) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io("reading", committed, e)),
        }
    }

    fn sync_dir(&self) {
        // Persists the rename itself. Not supported everywhere.
        if let Err(e) = File::open(&self.data_dir).and_then(|dir| dir.sync_all()) {
            debug!(dir = %self.data_dir.display(), error = %e, "Directory fsync skipped");
        }
    }
}

#[cfg(not(feature = "locking"))]
fn warn_unlocked(data_dir: &Path, lock: bool) {
    if lock {
        warn!(dir = %data_dir.display(), "Locking not compiled in; data directory is unguarded");
    }
}

impl SnapshotMedium for FileMedium {
    fn load(&mut self) -> Result<Option<Vec<u8>>, StoreError> {
        if self.modifier.exists() {
            warn!(
                path = %self.modifier.display(),
                "Discarding snapshot from an interrupted commit"
            );
            fs::remove_file(&self.modifier)
                .map_err(|e| StoreError::io("removing stale", &self.modifier, e))?;
        }
        self.staged = false;

        let bytes = Self::read_committed(&self.data_dir)?;
        match &bytes {
            Some(b) => info!(path = %self.committed.display(), bytes = b.len(), "Found committed snapshot"),
            None => info!(dir = %self.data_dir.display(), "No committed snapshot"),
        }
        Ok(bytes)
    }

    fn stage(&mut self, frame: &[u8]) -> Result<(), StoreError> {
        self.staged = false;
        let mut file = File::create(&self.modifier)
            .map_err(|e| StoreError::io("creating", &self.modifier, e))?;
        file.write_all(frame)
            .map_err(|e| StoreError::io("writing", &self.modifier, e))?;
        file.sync_all()
            .map_err(|e| StoreError::io("syncing", &self.modifier, e))?;
        self.staged = true;
        Ok(())
    }

    fn promote(&mut self) -> Result<(), StoreError> {
        if !self.staged {
            return Err(StoreError::io(
                "promoting",
                &self.modifier,
                std::io::Error::new(ErrorKind::NotFound, "nothing staged"),
            ));
        }
        fs::rename(&self.modifier, &self.committed)
            .map_err(|e| StoreError::io("promoting", &self.modifier, e))?;
        self.staged = false;
        self.sync_dir();
        Ok(())
    }

    fn is_durable(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        self.data_dir.display().to_string()
    }
}
