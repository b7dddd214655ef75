//! # Compression Module
//!
//! Optional Zstd compression of snapshot payloads.

mod compressor;
pub mod security;

#[cfg(test)]
mod tests;

// Re-export public types
#[cfg(feature = "compression")]
pub use compressor::ZstdCompressor;
pub use compressor::{
    compressor_for, inflate, CompressionConfig, CompressionError, NoOpCompressor, SnapshotCompressor,
};
