//! Compression direction of the container codec
//!
//! The whole input is tokenized in one pass, symbol frequencies are
//! tallied, both Huffman tables are built, and the header is written
//! followed by the coded token stream and an end-of-block symbol.

use super::header::FileHeader;
use crate::bitstream::BitWriter;
use crate::common::{
    CompressOptions, CompressionStats, DISTANCE_ALPHABET_SIZE, END_OF_BLOCK, LITLEN_ALPHABET_SIZE,
};
use crate::huffman::HuffmanCodec;
use crate::lz77::{Matcher, Token};
use crate::tables::{distance_symbol, length_symbol, SymbolCode};
use crate::{LzhError, Result};
use std::io::{Read, Write};

/// Frequency tables tallied from a token stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolFrequencies {
    /// Literal/length alphabet counts, end-of-block included
    pub litlen: Vec<u32>,
    /// Distance alphabet counts
    pub distance: Vec<u32>,
}

impl SymbolFrequencies {
    /// Count every symbol the token stream will emit
    pub fn tally(tokens: &[Token]) -> Result<Self> {
        let mut litlen = vec![0u32; LITLEN_ALPHABET_SIZE];
        let mut distance = vec![0u32; DISTANCE_ALPHABET_SIZE];

        for token in tokens {
            match *token {
                Token::Literal(byte) => bump(&mut litlen, byte as u16),
                Token::Match {
                    length,
                    distance: dist,
                } => {
                    let (length_code, distance_code) = match_codes(length, dist)?;
                    bump(&mut litlen, length_code.symbol);
                    bump(&mut distance, distance_code.symbol);
                }
            }
        }
        bump(&mut litlen, END_OF_BLOCK);

        Ok(Self { litlen, distance })
    }
}

// Saturating keeps the table writable; the encoder builds its codes from
// the same saturated counts the decoder will read.
fn bump(freqs: &mut [u32], symbol: u16) {
    let slot = &mut freqs[symbol as usize];
    *slot = slot.saturating_add(1);
}

fn match_codes(length: u16, distance: u16) -> Result<(SymbolCode, SymbolCode)> {
    let length_code =
        length_symbol(length as usize).ok_or(LzhError::InvalidLength(length as u32))?;
    let distance_code = distance_symbol(distance as usize).ok_or(LzhError::InvalidDistance {
        distance: distance as u32,
        available: 0,
    })?;
    Ok((length_code, distance_code))
}

/// Compress `data` into a complete container on `writer`
///
/// The writer is flushed before returning.
pub fn write_container<W: Write>(
    data: &[u8],
    options: &CompressOptions,
    writer: &mut BitWriter<W>,
) -> Result<CompressionStats> {
    options.validate()?;

    let mut matcher = Matcher::new(options);
    let tokens = matcher.tokenize(data);
    let freqs = SymbolFrequencies::tally(&tokens)?;
    let header = FileHeader::new(
        matcher.window_size(),
        data.len() as u64,
        freqs.litlen,
        freqs.distance,
    );

    let litlen_codec = HuffmanCodec::build(&header.litlen_freqs)?;
    let distance_codec = if header.has_distances() {
        Some(HuffmanCodec::build(&header.distance_freqs)?)
    } else {
        None
    };

    let start = writer.bytes_written();
    header.write_to(writer)?;

    let mut stats = CompressionStats {
        input_bytes: data.len() as u64,
        ..Default::default()
    };

    for token in &tokens {
        match *token {
            Token::Literal(byte) => {
                litlen_codec.encode(byte as u16, writer)?;
                stats.literal_count += 1;
            }
            Token::Match { length, distance } => {
                let (length_code, distance_code) = match_codes(length, distance)?;
                let distance_codec = distance_codec
                    .as_ref()
                    .ok_or(LzhError::MissingDistanceTable)?;

                litlen_codec.encode(length_code.symbol, writer)?;
                writer.write_bits(length_code.extra_value, length_code.extra_bits as u32)?;
                distance_codec.encode(distance_code.symbol, writer)?;
                writer.write_bits(distance_code.extra_value, distance_code.extra_bits as u32)?;

                stats.match_count += 1;
                stats.longest_match = stats.longest_match.max(length as usize);
            }
        }
    }
    litlen_codec.encode(END_OF_BLOCK, writer)?;
    writer.flush()?;

    stats.output_bytes = writer.bytes_written() - start;
    log::debug!(
        "compressed {} bytes into {} ({} literals, {} matches, longest {})",
        stats.input_bytes,
        stats.output_bytes,
        stats.literal_count,
        stats.match_count,
        stats.longest_match
    );
    Ok(stats)
}

/// Compress everything readable from `reader` into `writer`
///
/// The input is buffered in memory in full before matching starts.
pub fn compress<R: Read, W: Write>(
    mut reader: R,
    writer: W,
    options: &CompressOptions,
) -> Result<CompressionStats> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;

    let mut bit_writer = BitWriter::new(writer);
    write_container(&data, options, &mut bit_writer)
}

/// Compress an in-memory buffer
pub fn compress_bytes(data: &[u8], options: &CompressOptions) -> Result<Vec<u8>> {
    let mut writer = BitWriter::new(Vec::new());
    write_container(data, options, &mut writer)?;
    writer.finish()
}

/// Compressing writer implementing `Write`
///
/// Written bytes are collected in memory; the container is produced by
/// [`CompressWriter::finish`].
#[derive(Debug)]
pub struct CompressWriter<W: Write> {
    writer: W,
    options: CompressOptions,
    input_buffer: Vec<u8>,
}

impl<W: Write> CompressWriter<W> {
    /// Create a new CompressWriter
    pub fn new(writer: W, options: CompressOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            writer,
            options,
            input_buffer: Vec::new(),
        })
    }

    /// Number of input bytes collected so far
    pub fn buffered_len(&self) -> usize {
        self.input_buffer.len()
    }

    /// Compress the collected input and return the underlying writer
    pub fn finish(self) -> Result<W> {
        self.finish_with_stats().map(|(writer, _)| writer)
    }

    /// Like [`CompressWriter::finish`], also returning statistics
    pub fn finish_with_stats(self) -> Result<(W, CompressionStats)> {
        let Self {
            writer,
            options,
            input_buffer,
        } = self;
        let mut bit_writer = BitWriter::new(writer);
        let stats = write_container(&input_buffer, &options, &mut bit_writer)?;
        Ok((bit_writer.finish()?, stats))
    }
}

impl<W: Write> Write for CompressWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.input_buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        // Nothing can be emitted before the frequency tables are known
        Ok(())
    }
}
