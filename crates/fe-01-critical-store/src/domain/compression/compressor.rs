//! # Snapshot Compression
//!
//! Compression is a size/latency tradeoff only; the frame records whether
//! the stored payload is compressed, so a journal can always read snapshots
//! written under a different setting.

use super::security::clamp_level;
#[cfg(feature = "compression")]
use super::security::MAX_DECOMPRESSED_SIZE;
use std::io;
use thiserror::Error;

// =============================================================================
// COMPRESSION CONFIGURATION
// =============================================================================

/// Configuration for snapshot compression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionConfig {
    /// Compression level (1-22, default 3)
    pub level: i32,
    /// Compress newly committed snapshots
    pub enabled: bool,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            level: 3,
            enabled: false,
        }
    }
}

impl CompressionConfig {
    /// Compressed snapshots at the given level.
    pub fn zstd(level: i32) -> Self {
        Self {
            level: clamp_level(level),
            enabled: true,
        }
    }

    /// Uncompressed snapshots.
    pub fn disabled() -> Self {
        Self::default()
    }
}

// =============================================================================
// COMPRESSION ERROR
// =============================================================================

/// Errors during compression/decompression
#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("Compression failed: {0}")]
    CompressFailed(io::Error),

    #[error("Decompression failed: {0}")]
    DecompressFailed(io::Error),

    /// Payload is flagged compressed but this build cannot inflate it.
    #[error("Compressed snapshot requires the `compression` feature")]
    Unsupported,
}

// =============================================================================
// COMPRESSOR TRAIT
// =============================================================================

/// Payload compression used by the snapshot codec.
pub trait SnapshotCompressor: Send + Sync {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError>;

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError>;

    /// Whether `compress` actually transforms the payload.
    fn is_enabled(&self) -> bool;
}

/// Pick the compressor a configuration asks for.
pub fn compressor_for(config: &CompressionConfig) -> Box<dyn SnapshotCompressor> {
    if config.enabled {
        return zstd_compressor(config.level);
    }
    Box::new(NoOpCompressor)
}

#[cfg(feature = "compression")]
fn zstd_compressor(level: i32) -> Box<dyn SnapshotCompressor> {
    Box::new(ZstdCompressor::new(level))
}

#[cfg(not(feature = "compression"))]
fn zstd_compressor(_level: i32) -> Box<dyn SnapshotCompressor> {
    tracing::warn!("Snapshot compression requested but not compiled in; storing uncompressed");
    Box::new(NoOpCompressor)
}

/// Inflate a payload stored compressed, whatever the current configuration.
#[cfg(feature = "compression")]
pub fn inflate(data: &[u8]) -> Result<Vec<u8>, CompressionError> {
    ZstdCompressor::new(1).decompress(data)
}

#[cfg(not(feature = "compression"))]
pub fn inflate(_data: &[u8]) -> Result<Vec<u8>, CompressionError> {
    Err(CompressionError::Unsupported)
}

// =============================================================================
// ZSTD COMPRESSOR
// =============================================================================

#[cfg(feature = "compression")]
pub struct ZstdCompressor {
    level: i32,
}

#[cfg(feature = "compression")]
impl ZstdCompressor {
    pub fn new(level: i32) -> Self {
        Self {
            level: clamp_level(level),
        }
    }
}

#[cfg(feature = "compression")]
impl SnapshotCompressor for ZstdCompressor {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError> {
        zstd::bulk::compress(data, self.level).map_err(CompressionError::CompressFailed)
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError> {
        zstd::bulk::decompress(data, MAX_DECOMPRESSED_SIZE)
            .map_err(CompressionError::DecompressFailed)
    }

    fn is_enabled(&self) -> bool {
        true
    }
}

// =============================================================================
// NO-OP COMPRESSOR
// =============================================================================

/// Stores payloads unchanged.
pub struct NoOpCompressor;

impl SnapshotCompressor for NoOpCompressor {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError> {
        Ok(data.to_vec())
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, CompressionError> {
        Ok(data.to_vec())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}
