//! # Compression Tests

#[cfg(test)]
mod tests {
    use crate::domain::compression::*;

    #[test]
    fn test_default_config_is_uncompressed() {
        let compressor = compressor_for(&CompressionConfig::default());
        assert!(!compressor.is_enabled());

        let data = b"Bank=1000";
        assert_eq!(compressor.compress(data).unwrap(), data);
    }

    #[cfg(feature = "compression")]
    #[test]
    fn test_zstd_roundtrip_shrinks_repetitive_payload() {
        let compressor = compressor_for(&CompressionConfig::zstd(1));
        assert!(compressor.is_enabled());

        let original: Vec<u8> = (0..4096).map(|i| (i % 16) as u8).collect();
        let compressed = compressor.compress(&original).expect("compress");
        assert!(compressed.len() < original.len());
        assert_eq!(compressor.decompress(&compressed).expect("decompress"), original);
    }

    #[cfg(feature = "compression")]
    #[test]
    fn test_zstd_rejects_garbage() {
        let compressor = ZstdCompressor::new(3);
        assert!(matches!(
            compressor.decompress(b"definitely not zstd"),
            Err(CompressionError::DecompressFailed(_))
        ));
    }

    #[test]
    fn test_zstd_config_clamps_level() {
        assert_eq!(CompressionConfig::zstd(99).level, 22);
        assert!(CompressionConfig::zstd(3).enabled);
    }
}
