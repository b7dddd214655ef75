//! # Snapshot Frame Header
//!
//! Fixed little-endian header written in front of every committed snapshot:
//!
//! ```text
//! ┌───────┬─────────┬───────┬──────────┬──────────┬─────────────┬─────────┐
//! │ magic │ version │ flags │ sequence │ checksum │ payload_len │ payload │
//! │  4B   │  u32    │  u8   │   u64    │ u32 crc  │    u64      │   ...   │
//! └───────┴─────────┴───────┴──────────┴──────────┴─────────────┴─────────┘
//! ```
//!
//! The checksum covers the payload exactly as stored (after compression).

use thiserror::Error;

/// Errors found while parsing or verifying a frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("Snapshot truncated: {len} bytes, header needs {needed}")]
    Truncated { len: usize, needed: usize },

    #[error("Invalid magic bytes {0:02x?}")]
    BadMagic([u8; 4]),

    #[error("Snapshot version mismatch: expected {expected}, found {found}")]
    UnsupportedVersion { expected: u32, found: u32 },

    #[error("Unknown snapshot flags {0:#04x}")]
    UnknownFlags(u8),

    #[error("Payload length mismatch: header says {declared}, found {actual}")]
    LengthMismatch { declared: u64, actual: u64 },

    #[error("Payload checksum mismatch: expected {expected:#010x}, computed {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },
}

/// Snapshot file header (stored at beginning of file)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotHeader {
    pub magic: [u8; 4],
    pub version: u32,
    pub flags: u8,
    /// Transaction sequence number of the commit that wrote this snapshot.
    pub sequence: u64,
    pub checksum: u32,
    pub payload_len: u64,
}

impl SnapshotHeader {
    /// Magic bytes: "FECD" (Foundation Emulator Critical Data)
    pub const MAGIC: [u8; 4] = *b"FECD";
    /// Current version
    pub const VERSION: u32 = 1;
    /// Encoded header size in bytes.
    pub const LEN: usize = 4 + 4 + 1 + 8 + 4 + 8;
    /// Payload is Zstd-compressed.
    pub const FLAG_ZSTD: u8 = 0b0000_0001;

    const KNOWN_FLAGS: u8 = Self::FLAG_ZSTD;

    /// Header describing `payload` as it will be stored.
    pub fn new(sequence: u64, payload: &[u8], compressed: bool) -> Self {
        Self {
            magic: Self::MAGIC,
            version: Self::VERSION,
            flags: if compressed { Self::FLAG_ZSTD } else { 0 },
            sequence,
            checksum: crc32fast::hash(payload),
            payload_len: payload.len() as u64,
        }
    }

    pub fn is_compressed(&self) -> bool {
        self.flags & Self::FLAG_ZSTD != 0
    }

    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        let mut out = [0u8; Self::LEN];
        out[0..4].copy_from_slice(&self.magic);
        out[4..8].copy_from_slice(&self.version.to_le_bytes());
        out[8] = self.flags;
        out[9..17].copy_from_slice(&self.sequence.to_le_bytes());
        out[17..21].copy_from_slice(&self.checksum.to_le_bytes());
        out[21..29].copy_from_slice(&self.payload_len.to_le_bytes());
        out
    }

    /// Parse the header at the front of `bytes` without validating it.
    pub fn parse(bytes: &[u8]) -> Result<Self, FrameError> {
        let head: &[u8; Self::LEN] = bytes
            .get(..Self::LEN)
            .and_then(|h| h.try_into().ok())
            .ok_or(FrameError::Truncated {
                len: bytes.len(),
                needed: Self::LEN,
            })?;

        let mut magic = [0u8; 4];
        magic.copy_from_slice(&head[0..4]);
        let mut u32_buf = [0u8; 4];
        let mut u64_buf = [0u8; 8];

        u32_buf.copy_from_slice(&head[4..8]);
        let version = u32::from_le_bytes(u32_buf);
        let flags = head[8];
        u64_buf.copy_from_slice(&head[9..17]);
        let sequence = u64::from_le_bytes(u64_buf);
        u32_buf.copy_from_slice(&head[17..21]);
        let checksum = u32::from_le_bytes(u32_buf);
        u64_buf.copy_from_slice(&head[21..29]);
        let payload_len = u64::from_le_bytes(u64_buf);

        Ok(Self {
            magic,
            version,
            flags,
            sequence,
            checksum,
            payload_len,
        })
    }

    /// Validate header magic, version and flags
    pub fn validate(&self) -> Result<(), FrameError> {
        if self.magic != Self::MAGIC {
            return Err(FrameError::BadMagic(self.magic));
        }
        if self.version != Self::VERSION {
            return Err(FrameError::UnsupportedVersion {
                expected: Self::VERSION,
                found: self.version,
            });
        }
        if self.flags & !Self::KNOWN_FLAGS != 0 {
            return Err(FrameError::UnknownFlags(self.flags));
        }
        Ok(())
    }

    /// Check that `payload` is exactly what this header describes.
    pub fn verify_payload(&self, payload: &[u8]) -> Result<(), FrameError> {
        let actual_len = payload.len() as u64;
        if actual_len != self.payload_len {
            return Err(FrameError::LengthMismatch {
                declared: self.payload_len,
                actual: actual_len,
            });
        }
        let actual = crc32fast::hash(payload);
        if actual != self.checksum {
            return Err(FrameError::ChecksumMismatch {
                expected: self.checksum,
                actual,
            });
        }
        Ok(())
    }
}
