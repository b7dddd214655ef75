//! # Snapshot Module
//!
//! On-media representation of a committed store.
//!
//! - `image` - ordered, serializable rendering of the store
//! - `header` - fixed frame header (magic, version, flags, sequence, crc32)
//! - `codec` - store ⇄ frame

mod codec;
mod header;
mod image;


// Re-export public types
pub use codec::{DecodedSnapshot, SnapshotCodec, SnapshotDecodeError, SnapshotEncodeError};
pub use header::{FrameError, SnapshotHeader};
pub use image::{ScopeImage, SectionImage, SnapshotImage};
