//! # Snapshot Codec
//!
//! Store ⇄ framed bytes. Encoding: capture image → bincode → optional
//! compression → header. Decoding reverses it and rejects anything that does
//! not verify.

use super::header::{FrameError, SnapshotHeader};
use super::image::SnapshotImage;
use crate::domain::compression::{
    compressor_for, inflate, security::MAX_DECOMPRESSED_SIZE, CompressionConfig,
    CompressionError, SnapshotCompressor,
};
use crate::domain::store::AddressedStore;
use bincode::Options;
use shared_types::AddressError;
use thiserror::Error;

/// Why a stored snapshot could not be turned back into a store.
#[derive(Debug, Error)]
pub enum SnapshotDecodeError {
    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error("Payload decompression failed: {0}")]
    Decompress(#[source] CompressionError),

    #[error("Snapshot image malformed: {0}")]
    Image(#[source] bincode::Error),

    #[error("Snapshot contains an invalid path: {0}")]
    InvalidPath(#[from] AddressError),
}

/// Errors while producing a frame.
#[derive(Debug, Error)]
pub enum SnapshotEncodeError {
    #[error("Snapshot image could not be serialized: {0}")]
    Image(#[source] bincode::Error),

    #[error(transparent)]
    Compress(#[from] CompressionError),
}

/// A verified snapshot read back from a medium.
#[derive(Debug)]
pub struct DecodedSnapshot {
    pub header: SnapshotHeader,
    pub store: AddressedStore,
}

fn image_options() -> impl Options {
    bincode::DefaultOptions::new().with_limit(MAX_DECOMPRESSED_SIZE as u64)
}

/// Frames store images for a journal.
pub struct SnapshotCodec {
    compressor: Box<dyn SnapshotCompressor>,
}

impl SnapshotCodec {
    pub fn new(config: &CompressionConfig) -> Self {
        Self {
            compressor: compressor_for(config),
        }
    }

    pub fn compresses(&self) -> bool {
        self.compressor.is_enabled()
    }

    /// Encode the whole store as one frame tagged with `sequence`.
    pub fn encode(
        &self,
        store: &AddressedStore,
        sequence: u64,
    ) -> Result<Vec<u8>, SnapshotEncodeError> {
        let raw = image_options()
            .serialize(&SnapshotImage::capture(store))
            .map_err(SnapshotEncodeError::Image)?;
        let payload = self.compressor.compress(&raw)?;
        let header = SnapshotHeader::new(sequence, &payload, self.compressor.is_enabled());

        let mut frame = Vec::with_capacity(SnapshotHeader::LEN + payload.len());
        frame.extend_from_slice(&header.to_bytes());
        frame.extend_from_slice(&payload);
        Ok(frame)
    }

    /// Decode and verify a frame. Compression is taken from the frame
    /// flags, not from this codec's configuration.
    pub fn decode(bytes: &[u8]) -> Result<DecodedSnapshot, SnapshotDecodeError> {
        let header = SnapshotHeader::parse(bytes)?;
        header.validate()?;
        let payload = &bytes[SnapshotHeader::LEN..];
        header.verify_payload(payload)?;

        let inflated;
        let raw = if header.is_compressed() {
            inflated = inflate(payload).map_err(SnapshotDecodeError::Decompress)?;
            inflated.as_slice()
        } else {
            payload
        };

        let image: SnapshotImage = image_options()
            .deserialize(raw)
            .map_err(SnapshotDecodeError::Image)?;
        let store = image.into_store()?;
        Ok(DecodedSnapshot { header, store })
    }
}
