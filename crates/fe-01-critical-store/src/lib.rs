//! # Critical Data Store (fe-01)
//!
//! Crash-tolerant, address-scoped persistent store for game critical data.
//!
//! ## Architecture
//!
//! ```text
//! caller ──write(addr, bytes)──→ AddressedStore (in memory)
//!                                      │
//!                       commit(seq)    ▼
//!                  DurableJournal ── SnapshotCodec ──→ SnapshotMedium
//!                                                      ├─ VolatileMedium (memory only)
//!                                                      └─ FileMedium (modifier → committed)
//! ```
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Lazy materialization | Reads of never-written addresses are absent, never errors |
//! | 2 | Stage then promote | A commit never overwrites the committed snapshot in place |
//! | 3 | All or nothing | A restart observes the previous or the new snapshot in full |
//! | 4 | Verified load | A committed snapshot that fails verification is fatal |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Store, snapshot codec, compression, configuration, errors
//! - `ports/` - `SnapshotMedium` driven port
//! - `adapters/` - Volatile and file media, data directory lock
//! - `service/` - `DurableJournal`
//!
//! ## Usage
//!
//! ```ignore
//! use fe_01_critical_store::{DurableJournal, JournalConfig};
//!
//! let mut journal = DurableJournal::open(&JournalConfig::file_backed("/var/fe"))?;
//! journal.store_mut().write(&address, bytes);
//! journal.commit(next_sequence)?;
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export key types for convenience
pub use adapters::lock::LockError;
pub use adapters::media::{FileMedium, VolatileMedium};
pub use domain::compression::{CompressionConfig, CompressionError};
pub use domain::config::{DurabilityMode, JournalConfig, COMMITTED_FILE, MODIFIER_FILE};
pub use domain::errors::StoreError;
pub use domain::snapshot::{DecodedSnapshot, SnapshotCodec, SnapshotDecodeError, SnapshotHeader};
pub use domain::store::{AddressedStore, StorageScope, StorageSection};
pub use ports::outbound::SnapshotMedium;
pub use service::{CommitReceipt, DurableJournal, StartKind};
