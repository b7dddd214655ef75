//! # Compression Security
//!
//! Bounds applied when inflating a stored snapshot.

/// Largest payload a snapshot may inflate to (256MB).
pub const MAX_DECOMPRESSED_SIZE: usize = 256 * 1024 * 1024;

/// Highest accepted Zstd level.
pub const MAX_COMPRESSION_LEVEL: i32 = 22;

/// Clamp a configured level into Zstd's accepted range.
pub fn clamp_level(level: i32) -> i32 {
    level.clamp(1, MAX_COMPRESSION_LEVEL)
}
