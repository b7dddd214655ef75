//! # Outbound Ports (Driven Ports)
//!
//! The journal never touches storage media directly; it stages and promotes
//! framed snapshots through a [`SnapshotMedium`].
//!
//! Production: `FileMedium` (modifier/committed file pair)
//! Throwaway sessions: `VolatileMedium`

use crate::domain::errors::StoreError;

/// Storage for framed snapshots with a two-step commit.
///
/// ## Atomicity
///
/// `stage` must never disturb what `load` returns. Only a successful
/// `promote` replaces the committed snapshot, and it does so in one step:
/// a crash at any point leaves either the old or the new snapshot committed.
pub trait SnapshotMedium: Send {
    /// Bytes of the committed snapshot, or `None` on a cold start.
    ///
    /// Any leftover staged snapshot from an interrupted commit is discarded.
    fn load(&mut self) -> Result<Option<Vec<u8>>, StoreError>;

    /// Write `frame` to the staging location and make it durable.
    fn stage(&mut self, frame: &[u8]) -> Result<(), StoreError>;

    /// Atomically replace the committed snapshot with the staged one.
    fn promote(&mut self) -> Result<(), StoreError>;

    /// Whether committed snapshots outlive the process.
    fn is_durable(&self) -> bool;

    /// Human-readable location for logs and errors.
    fn describe(&self) -> String;
}
