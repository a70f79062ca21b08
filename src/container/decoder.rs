//! Decompression direction of the container codec
//!
//! The header is parsed and validated, both Huffman tables are rebuilt
//! from the stored frequencies, and symbols are decoded until the
//! end-of-block symbol. The reconstructed size must equal the size the
//! header declares.

use super::header::FileHeader;
use crate::bitstream::BitReader;
use crate::common::{CompressionStats, END_OF_BLOCK};
use crate::huffman::HuffmanCodec;
use crate::lz77::copy_match;
use crate::tables::{distance_base, length_base};
use crate::{LzhError, Result};
use std::io::{Read, Write};

/// Cap on the up-front output allocation, whatever the header claims
const MAX_PREALLOC: u64 = 1 << 24;

/// Decode a complete container from `reader`
pub fn read_container<R: Read>(
    reader: &mut BitReader<R>,
) -> Result<(Vec<u8>, CompressionStats)> {
    let header = FileHeader::read_from(reader)?;
    let litlen_codec = HuffmanCodec::build(&header.litlen_freqs)?;
    let distance_codec = if header.has_distances() {
        Some(HuffmanCodec::build(&header.distance_freqs)?)
    } else {
        None
    };

    let expected = header.original_size;
    let window = header.window_size as usize;
    let mut output = Vec::with_capacity(expected.min(MAX_PREALLOC) as usize);
    let mut stats = CompressionStats::default();

    loop {
        let symbol = litlen_codec.decode(reader)?;
        match symbol {
            0..=255 => {
                if output.len() as u64 >= expected {
                    return Err(LzhError::SizeMismatch {
                        expected,
                        actual: output.len() as u64 + 1,
                    });
                }
                output.push(symbol as u8);
                stats.literal_count += 1;
            }
            END_OF_BLOCK => break,
            _ => {
                let (base, extra_bits) =
                    length_base(symbol).ok_or(LzhError::InvalidSymbol(symbol))?;
                let length = base as usize + reader.read_bits(extra_bits as u32)? as usize;

                let distance_codec = distance_codec
                    .as_ref()
                    .ok_or(LzhError::MissingDistanceTable)?;
                let distance_symbol = distance_codec.decode(reader)?;
                let (base, extra_bits) = distance_base(distance_symbol)
                    .ok_or(LzhError::InvalidSymbol(distance_symbol))?;
                let distance = base as usize + reader.read_bits(extra_bits as u32)? as usize;

                if distance > window {
                    return Err(LzhError::InvalidDistance {
                        distance: distance as u32,
                        available: window.min(output.len()) as u64,
                    });
                }
                let produced = output.len() as u64 + length as u64;
                if produced > expected {
                    return Err(LzhError::SizeMismatch {
                        expected,
                        actual: produced,
                    });
                }

                copy_match(&mut output, length, distance)?;
                stats.match_count += 1;
                stats.longest_match = stats.longest_match.max(length);
            }
        }
    }

    if output.len() as u64 != expected {
        return Err(LzhError::SizeMismatch {
            expected,
            actual: output.len() as u64,
        });
    }

    stats.input_bytes = reader.bytes_consumed();
    stats.output_bytes = output.len() as u64;
    log::debug!(
        "decompressed {} bytes into {} ({} literals, {} matches)",
        stats.input_bytes,
        stats.output_bytes,
        stats.literal_count,
        stats.match_count
    );
    Ok((output, stats))
}

/// Decompress a container from `reader` into `writer`
///
/// Nothing is written unless the whole container decodes cleanly.
pub fn decompress<R: Read, W: Write>(reader: R, mut writer: W) -> Result<CompressionStats> {
    let mut bit_reader = BitReader::new(reader);
    let (output, stats) = read_container(&mut bit_reader)?;
    writer.write_all(&output)?;
    writer.flush()?;
    Ok(stats)
}

/// Decompress an in-memory container
pub fn decompress_bytes(data: &[u8]) -> Result<Vec<u8>> {
    let mut reader = BitReader::new(data);
    let (output, _) = read_container(&mut reader)?;
    Ok(output)
}

/// Decompressing reader implementing `Read`
///
/// The container is decoded in full on the first read; later reads are
/// served from memory. A failed decode fails every later read as well.
#[derive(Debug)]
pub struct DecompressReader<R: Read> {
    reader: Option<BitReader<R>>,
    output_buffer: Vec<u8>,
    output_pos: usize,
    stats: Option<CompressionStats>,
    failure: Option<String>,
}

impl<R: Read> DecompressReader<R> {
    /// Create a new DecompressReader
    pub fn new(reader: R) -> Self {
        Self {
            reader: Some(BitReader::new(reader)),
            output_buffer: Vec::new(),
            output_pos: 0,
            stats: None,
            failure: None,
        }
    }

    /// Statistics of the decode, once it has happened
    pub fn stats(&self) -> Option<&CompressionStats> {
        self.stats.as_ref()
    }

    fn decode(&mut self) -> Result<()> {
        if let Some(mut reader) = self.reader.take() {
            let (output, stats) = read_container(&mut reader)?;
            self.output_buffer = output;
            self.stats = Some(stats);
        }
        Ok(())
    }
}

impl<R: Read> Read for DecompressReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if let Some(message) = &self.failure {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                message.clone(),
            ));
        }
        if let Err(e) = self.decode() {
            self.failure = Some(e.to_string());
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidData, e));
        }

        let available = &self.output_buffer[self.output_pos..];
        let to_copy = buf.len().min(available.len());
        buf[..to_copy].copy_from_slice(&available[..to_copy]);
        self.output_pos += to_copy;
        Ok(to_copy)
    }
}
