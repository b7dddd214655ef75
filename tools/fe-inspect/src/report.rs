//! Snapshot loading and the reports printed by the CLI.

use fe_01_critical_store::{AddressedStore, FileMedium, SnapshotCodec, SnapshotDecodeError, StoreError};
use serde::Serialize;
use shared_types::{Address, AddressError, LifecycleScope, Scope, ScopeKey, Section};
use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum InspectError {
    #[error("No committed snapshot in {}", .0.display())]
    NoSnapshot(PathBuf),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Committed snapshot does not verify: {0}")]
    Decode(#[from] SnapshotDecodeError),

    #[error(transparent)]
    Address(#[from] AddressError),

    #[error("Unknown scope '{0}': expected a lifecycle name or an index")]
    UnknownScope(String),
}

/// Interpret a scope argument: a lifecycle name (case-insensitive) or a raw index.
pub fn parse_scope(raw: &str) -> Result<Scope, InspectError> {
    if let Ok(index) = raw.parse::<u32>() {
        return Ok(Scope::index(index));
    }
    LifecycleScope::ALL
        .iter()
        .find(|lifecycle| format!("{lifecycle:?}").eq_ignore_ascii_case(raw))
        .map(|lifecycle| Scope::from(*lifecycle))
        .ok_or_else(|| InspectError::UnknownScope(raw.to_string()))
}

/// Lower-case hex without separators.
pub fn hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopeUsage {
    pub scope: String,
    pub entries: usize,
    pub bytes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotSummary {
    pub sequence: u64,
    pub compressed: bool,
    pub payload_bytes: u64,
    pub total_entries: usize,
    pub scopes: Vec<ScopeUsage>,
}

/// A verified committed snapshot.
#[derive(Debug)]
pub struct CommittedSnapshot {
    sequence: u64,
    compressed: bool,
    payload_bytes: u64,
    store: AddressedStore,
}

impl CommittedSnapshot {
    /// Load and verify the committed snapshot of `data_dir`.
    pub fn load(data_dir: &Path) -> Result<Self, InspectError> {
        let bytes = FileMedium::read_committed(data_dir)?
            .ok_or_else(|| InspectError::NoSnapshot(data_dir.to_path_buf()))?;
        let decoded = SnapshotCodec::decode(&bytes)?;
        debug!(
            dir = %data_dir.display(),
            sequence = decoded.header.sequence,
            "Loaded committed snapshot"
        );
        Ok(Self {
            sequence: decoded.header.sequence,
            compressed: decoded.header.is_compressed(),
            payload_bytes: decoded.header.payload_len,
            store: decoded.store,
        })
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn store(&self) -> &AddressedStore {
        &self.store
    }

    pub fn summary(&self) -> SnapshotSummary {
        let scopes = Section::ALL
            .iter()
            .flat_map(|section| {
                self.store
                    .scopes(*section)
                    .into_iter()
                    .map(move |scope| ScopeKey::new(*section, scope))
            })
            .map(|key| ScopeUsage {
                scope: key.to_string(),
                entries: self.store.manifest(key).len(),
                bytes: self.store.usage(key),
            })
            .collect();
        SnapshotSummary {
            sequence: self.sequence,
            compressed: self.compressed,
            payload_bytes: self.payload_bytes,
            total_entries: self.store.entry_count(),
            scopes,
        }
    }

    pub fn manifest(&self, key: ScopeKey) -> BTreeSet<String> {
        self.store.manifest(key)
    }

    pub fn get(&self, section: Section, scope: Scope, path: &str) -> Result<Option<&[u8]>, InspectError> {
        let address = Address::new(section, scope, path)?;
        Ok(self.store.read(&address))
    }
}
