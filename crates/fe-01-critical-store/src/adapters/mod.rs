//! # Adapters
//!
//! - `media` - SnapshotMedium implementations
//! - `lock` - process-level lock on a data directory

pub mod lock;
pub mod media;

pub use media::{FileMedium, VolatileMedium};
