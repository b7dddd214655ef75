//! # fe-inspect
//!
//! Read-only view of a data directory's committed snapshot.
//!
//! The inspector reads `critical.committed` directly. It never takes the
//! data directory lock and never looks at (or removes) the modifier file,
//! so it is safe to run next to a live emulator.

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod report;

pub use report::{
    hex, parse_scope, CommittedSnapshot, InspectError, ScopeUsage, SnapshotSummary,
};
