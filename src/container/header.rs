//! Container header
//!
//! Layout, all integers little-endian:
//!
//! | Field          | Size            |
//! |----------------|-----------------|
//! | magic          | 4               |
//! | version        | 2               |
//! | window size    | 4               |
//! | original size  | 8               |
//! | lit/len count  | 2               |
//! | lit/len pairs  | (2 + 4) × count |
//! | distance count | 2               |
//! | distance pairs | (2 + 4) × count |
//!
//! Each pair is (symbol, frequency); only symbols with a nonzero
//! frequency are stored, in ascending symbol order.

use crate::bitstream::{BitReader, BitWriter};
use crate::common::{
    validate_window_size, DISTANCE_ALPHABET_SIZE, FORMAT_VERSION, LITLEN_ALPHABET_SIZE, MAGIC,
};
use crate::{LzhError, Result};
use std::io::{Read, Write};

/// Size of the fixed part of the header, before the frequency pairs
pub const FIXED_HEADER_SIZE: usize = 4 + 2 + 4 + 8 + 2 + 2;

/// Size of one stored (symbol, frequency) pair
pub const FREQ_ENTRY_SIZE: usize = 2 + 4;

/// Parsed container header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    /// Format version
    pub version: u16,
    /// LZ77 window size used by the encoder
    pub window_size: u32,
    /// Uncompressed size in bytes
    pub original_size: u64,
    /// Frequencies of the literal/length alphabet, indexed by symbol
    pub litlen_freqs: Vec<u32>,
    /// Frequencies of the distance alphabet, indexed by symbol
    pub distance_freqs: Vec<u32>,
}

impl FileHeader {
    /// Create a header for the current format version
    pub fn new(
        window_size: u32,
        original_size: u64,
        litlen_freqs: Vec<u32>,
        distance_freqs: Vec<u32>,
    ) -> Self {
        Self {
            version: FORMAT_VERSION,
            window_size,
            original_size,
            litlen_freqs,
            distance_freqs,
        }
    }

    /// True if any distance symbol was used
    pub fn has_distances(&self) -> bool {
        self.distance_freqs.iter().any(|&freq| freq > 0)
    }

    /// Serialized size of this header in bytes
    pub fn encoded_len(&self) -> usize {
        let entries = nonzero_count(&self.litlen_freqs) + nonzero_count(&self.distance_freqs);
        FIXED_HEADER_SIZE + entries * FREQ_ENTRY_SIZE
    }

    /// Write the header; the writer must be byte-aligned
    pub fn write_to<W: Write>(&self, writer: &mut BitWriter<W>) -> Result<()> {
        debug_assert_eq!(writer.pending_bits(), 0);

        writer.write_bits(u32::from_le_bytes(MAGIC), 32)?;
        writer.write_bits(self.version as u32, 16)?;
        writer.write_bits(self.window_size, 32)?;
        writer.write_bits(self.original_size as u32, 32)?;
        writer.write_bits((self.original_size >> 32) as u32, 32)?;
        write_freq_table(writer, &self.litlen_freqs)?;
        write_freq_table(writer, &self.distance_freqs)?;

        log::trace!(
            "wrote header: window {}, original size {}, {} bytes",
            self.window_size,
            self.original_size,
            self.encoded_len()
        );
        Ok(())
    }

    /// Read and validate a header from the start of a container
    pub fn read_from<R: Read>(reader: &mut BitReader<R>) -> Result<Self> {
        let magic = read_field(reader, 32, "magic")?.to_le_bytes();
        if magic != MAGIC {
            return Err(LzhError::InvalidMagic(magic));
        }

        let version = read_field(reader, 16, "version")? as u16;
        if version != FORMAT_VERSION {
            return Err(LzhError::UnsupportedVersion(version));
        }

        let window_size = read_field(reader, 32, "window size")?;
        validate_window_size(window_size)?;

        let low = read_field(reader, 32, "original size")? as u64;
        let high = read_field(reader, 32, "original size")? as u64;
        let original_size = (high << 32) | low;

        let litlen_freqs = read_freq_table(reader, LITLEN_ALPHABET_SIZE, "literal/length table")?;
        let distance_freqs = read_freq_table(reader, DISTANCE_ALPHABET_SIZE, "distance table")?;

        log::trace!(
            "read header: window {}, original size {}",
            window_size,
            original_size
        );

        Ok(Self {
            version,
            window_size,
            original_size,
            litlen_freqs,
            distance_freqs,
        })
    }
}

fn nonzero_count(freqs: &[u32]) -> usize {
    freqs.iter().filter(|&&freq| freq > 0).count()
}

fn write_freq_table<W: Write>(writer: &mut BitWriter<W>, freqs: &[u32]) -> Result<()> {
    writer.write_bits(nonzero_count(freqs) as u32, 16)?;
    for (symbol, &freq) in freqs.iter().enumerate() {
        if freq > 0 {
            writer.write_bits(symbol as u32, 16)?;
            writer.write_bits(freq, 32)?;
        }
    }
    Ok(())
}

fn read_field<R: Read>(reader: &mut BitReader<R>, nbits: u32, name: &'static str) -> Result<u32> {
    reader.read_bits(nbits).map_err(|e| match e {
        LzhError::UnexpectedEof => LzhError::TruncatedHeader(name),
        other => other,
    })
}

fn read_freq_table<R: Read>(
    reader: &mut BitReader<R>,
    alphabet_size: usize,
    name: &'static str,
) -> Result<Vec<u32>> {
    let count = read_field(reader, 16, name)? as usize;
    if count > alphabet_size {
        return Err(LzhError::InvalidFrequencyTable(format!(
            "{name}: {count} entries for an alphabet of {alphabet_size}"
        )));
    }

    let mut freqs = vec![0u32; alphabet_size];
    for _ in 0..count {
        let symbol = read_field(reader, 16, name)? as usize;
        let freq = read_field(reader, 32, name)?;
        if symbol >= alphabet_size {
            return Err(LzhError::InvalidFrequencyTable(format!(
                "{name}: symbol {symbol} out of range"
            )));
        }
        if freq == 0 {
            return Err(LzhError::InvalidFrequencyTable(format!(
                "{name}: zero frequency stored for symbol {symbol}"
            )));
        }
        if freqs[symbol] != 0 {
            return Err(LzhError::InvalidFrequencyTable(format!(
                "{name}: duplicate entry for symbol {symbol}"
            )));
        }
        freqs[symbol] = freq;
    }
    Ok(freqs)
}
