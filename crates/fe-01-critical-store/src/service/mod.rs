//! # Durable Journal Service
//!
//! Owns the in-memory [`crate::AddressedStore`] and commits it through a
//! [`crate::SnapshotMedium`] as one atomic unit.
//!
//! ## Commit protocol
//!
//! 1. Frame the entire store (image → bincode → optional zstd → header).
//! 2. `stage` the frame on the medium (modifier location, fsync).
//! 3. `promote` it over the committed snapshot (rename).
//!
//! A failure in 1 or 2 leaves the committed snapshot untouched. The
//! in-memory store is never rolled back; the caller keeps its transaction
//! open and may retry.

mod journal;

pub use journal::{CommitReceipt, DurableJournal, StartKind};
