//! # Journal Configuration
//!
//! Construction-time choices for a [`crate::DurableJournal`]: where committed
//! snapshots live and how they are encoded. These are configuration, not
//! protocol; a journal reads snapshots written under any compression setting.

use crate::domain::compression::CompressionConfig;
use std::path::{Path, PathBuf};

/// Staging file written before promotion.
pub const MODIFIER_FILE: &str = "critical.modifier";

/// Stable file holding the last committed snapshot.
pub const COMMITTED_FILE: &str = "critical.committed";

/// Where committed snapshots go.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DurabilityMode {
    /// Nothing is persisted; every open is a cold start.
    #[default]
    MemoryOnly,
    /// Modifier/committed file pair inside `data_dir`.
    FileBacked { data_dir: PathBuf },
}

/// Configuration for the durable journal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalConfig {
    pub durability: DurabilityMode,

    /// Payload compression for newly committed snapshots.
    pub compression: CompressionConfig,

    /// Take an exclusive `LOCK` file in the data directory (default: true).
    ///
    /// Ignored for memory-only journals.
    pub lock_data_dir: bool,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            durability: DurabilityMode::MemoryOnly,
            compression: CompressionConfig::default(),
            lock_data_dir: true,
        }
    }
}

impl JournalConfig {
    /// Throwaway session.
    pub fn memory_only() -> Self {
        Self::default()
    }

    /// Persist to `data_dir`.
    pub fn file_backed(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            durability: DurabilityMode::FileBacked {
                data_dir: data_dir.into(),
            },
            ..Self::default()
        }
    }

    pub fn with_compression(mut self, compression: CompressionConfig) -> Self {
        self.compression = compression;
        self
    }

    pub fn with_lock(mut self, lock_data_dir: bool) -> Self {
        self.lock_data_dir = lock_data_dir;
        self
    }

    /// Data directory, if file-backed.
    pub fn data_dir(&self) -> Option<&Path> {
        match &self.durability {
            DurabilityMode::MemoryOnly => None,
            DurabilityMode::FileBacked { data_dir } => Some(data_dir),
        }
    }
}
