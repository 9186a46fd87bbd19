use std::io::{Read, Write};

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;

use crate::errors::Result;

/// Compresses a string using gzip.
pub fn compress_string(input: &str) -> Result<Vec<u8>> {
    compress(input.as_bytes())
}

/// Compresses a byte slice using gzip.
pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(input)?;
    let compressed = encoder.finish()?;
    Ok(compressed)
}

/// Decompress gzip-compressed data as a string.
pub fn decompress_to_string(compressed: &[u8]) -> Result<String> {
    let mut decoder = GzDecoder::new(compressed);
    let mut result = String::new();
    decoder.read_to_string(&mut result)?;
    Ok(result)
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_compress_roundtrip() {
        let input = r#"<?xml version="1.0" encoding="UTF-8"?><urlset></urlset>"#;
        let compressed = compress_string(input).unwrap();
        assert_eq!(&compressed[..2], &[0x1f, 0x8b]);
        let decompressed = decompress_to_string(&compressed).unwrap();
        assert_eq!(input, decompressed);
    }

    #[test]
    fn test_decompress_garbage_fails() {
        assert!(decompress_to_string(b"not gzip").is_err());
    }
}
