//! lzhuff - LZ77 + canonical Huffman compression codec
//!
//! This crate implements a DEFLATE-style lossless codec for buffers held
//! in memory: a greedy hash-chain LZ77 matcher produces literals and
//! (length, distance) matches, and two canonical Huffman tables code them
//! into a single block behind a self-describing header.
//!
//! # Features
//!
//! - LSB-first bit packing ([`bitstream`])
//! - Canonical Huffman codes rebuilt from stored frequencies ([`huffman`])
//! - Hash-chain match search over windows up to 32 KiB ([`lz77`])
//! - Header with magic, version, window size, original size and
//!   frequency tables; decoded size is verified ([`container`])
//! - Streaming API via Read/Write traits
//!
//! # Example
//!
//! ```
//! use lzhuff::{compress_bytes, decompress_bytes, CompressOptions};
//!
//! let data = b"Hello, World! Hello, World! Hello, World!";
//! let compressed = compress_bytes(data, &CompressOptions::default())?;
//! let decompressed = decompress_bytes(&compressed)?;
//! assert_eq!(&decompressed[..], &data[..]);
//! # Ok::<(), lzhuff::LzhError>(())
//! ```
//!
//! # Example - Streaming
//!
//! ```
//! use lzhuff::{CompressOptions, CompressWriter, DecompressReader};
//! use std::io::{Read, Write};
//!
//! let mut writer = CompressWriter::new(Vec::new(), CompressOptions::default())?;
//! writer.write_all(b"streamed input")?;
//! let compressed = writer.finish()?;
//!
//! let mut reader = DecompressReader::new(&compressed[..]);
//! let mut output = Vec::new();
//! reader.read_to_end(&mut output)?;
//! assert_eq!(output, b"streamed input");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

// Public modules
pub mod bitstream;
pub mod common;
pub mod container;
pub mod error;
pub mod huffman;
pub mod lz77;
pub mod tables;

// Re-export commonly used types
pub use common::{
    CompressOptions, CompressionStats, LzhError, Result, DEFAULT_MAX_CHAIN, DEFAULT_WINDOW_SIZE,
    MAGIC, MAX_MATCH, MAX_WINDOW_SIZE, MIN_MATCH,
};
pub use container::{read_header, CompressWriter, DecompressReader, FileHeader};
pub use huffman::{Code, HuffmanCodec};
pub use lz77::{Matcher, Token};

use std::io::{Read, Write};

// Convenience functions

/// Compress a buffer into a container
///
/// # Arguments
/// * `data` - The data to compress
/// * `options` - Window size and match search depth
///
/// # Returns
/// A vector containing the complete container
pub fn compress_bytes(data: &[u8], options: &CompressOptions) -> Result<Vec<u8>> {
    container::compress_bytes(data, options)
}

/// Decompress a container held in memory
///
/// # Arguments
/// * `data` - The container bytes
///
/// # Returns
/// A vector containing the original data
pub fn decompress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    container::decompress_bytes(data)
}

/// Compress everything from `input` into `output`
pub fn compress<R: Read, W: Write>(
    input: R,
    output: W,
    options: &CompressOptions,
) -> Result<CompressionStats> {
    container::compress(input, output, options)
}

/// Decompress a container from `input` into `output`
pub fn decompress<R: Read, W: Write>(input: R, output: W) -> Result<CompressionStats> {
    container::decompress(input, output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reexports() {
        let options = CompressOptions::default();
        assert_eq!(options.window_size, DEFAULT_WINDOW_SIZE);
        assert_eq!(MAX_WINDOW_SIZE, 32768);

        let compressed = compress_bytes(b"test", &options).unwrap();
        assert_eq!(&compressed[..4], &MAGIC);
        assert_eq!(decompress_bytes(&compressed).unwrap(), b"test");
    }

    #[test]
    fn test_stream_entry_points() {
        let data = b"stream entry points, stream entry points".to_vec();
        let mut compressed = Vec::new();
        let stats = compress(&data[..], &mut compressed, &CompressOptions::default()).unwrap();
        assert_eq!(stats.input_bytes, data.len() as u64);
        assert_eq!(stats.output_bytes, compressed.len() as u64);

        let mut output = Vec::new();
        let stats = decompress(&compressed[..], &mut output).unwrap();
        assert_eq!(output, data);
        assert_eq!(stats.output_bytes, data.len() as u64);
        assert_eq!(stats.input_bytes, compressed.len() as u64);
    }
}
