//! Canonical Huffman coder
//!
//! A [`HuffmanCodec`] is built once from a per-symbol frequency table and
//! is immutable afterwards. Code lengths come from a deterministic greedy
//! merge (see [`tree`]); the bit patterns are then assigned canonically,
//! so a decoder holding the same frequency table rebuilds identical codes
//! without any bit patterns being transmitted.

mod tree;
mod trie;

pub use tree::code_lengths;
pub use trie::DecodeTrie;

use crate::bitstream::{BitReader, BitWriter, MAX_BITS_PER_CALL};
use crate::{LzhError, Result};
use std::io::{Read, Write};

/// Longest code the codec will assign
pub const MAX_CODE_LENGTH: u32 = 64;

/// A symbol's canonical code
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Code {
    /// Code bits, reversed so the first code bit is bit 0
    pub bits: u64,
    /// Code length in bits; 0 means the symbol has no code
    pub bitlen: u8,
}

/// Assign canonical codes from code lengths
///
/// Symbols are ordered by (length, symbol value); codes within one length
/// are consecutive integers, and moving to a longer length shifts the next
/// code left by the difference.
pub fn canonical_codes(lengths: &[u8]) -> Vec<Code> {
    let mut order: Vec<usize> = (0..lengths.len()).filter(|&s| lengths[s] > 0).collect();
    order.sort_by_key(|&symbol| (lengths[symbol], symbol));

    let mut codes = vec![Code::default(); lengths.len()];
    let mut next_code = 0u64;
    let mut prev_len = 0u8;
    for (rank, &symbol) in order.iter().enumerate() {
        let len = lengths[symbol];
        if rank > 0 {
            next_code += 1;
        }
        next_code <<= len - prev_len;
        prev_len = len;

        codes[symbol] = Code {
            bits: next_code.reverse_bits() >> (64 - len as u32),
            bitlen: len,
        };
    }
    codes
}

/// Huffman encoder/decoder for one alphabet
#[derive(Debug, Clone)]
pub struct HuffmanCodec {
    codes: Vec<Code>,
    trie: DecodeTrie,
}

impl HuffmanCodec {
    /// Build the code table and decode trie from symbol frequencies
    ///
    /// Fails with [`LzhError::EmptyFrequencyTable`] if every frequency is zero.
    pub fn build(freqs: &[u32]) -> Result<Self> {
        let lengths = code_lengths(freqs)?;
        let codes = canonical_codes(&lengths);
        let trie = DecodeTrie::from_codes(&codes)?;
        Ok(Self { codes, trie })
    }

    /// Write the code for `symbol`
    pub fn encode<W: Write>(&self, symbol: u16, writer: &mut BitWriter<W>) -> Result<()> {
        let code = self.code(symbol).ok_or(LzhError::SymbolNotEncodable(symbol))?;

        let mut bits = code.bits;
        let mut remaining = code.bitlen as u32;
        while remaining > 0 {
            let chunk = remaining.min(MAX_BITS_PER_CALL);
            writer.write_bits(bits as u32, chunk)?;
            bits = bits.checked_shr(chunk).unwrap_or(0);
            remaining -= chunk;
        }
        Ok(())
    }

    /// Read one symbol
    pub fn decode<R: Read>(&self, reader: &mut BitReader<R>) -> Result<u16> {
        self.trie.decode(reader)
    }

    /// Code assigned to `symbol`, if it occurred in the frequency table
    pub fn code(&self, symbol: u16) -> Option<Code> {
        self.codes
            .get(symbol as usize)
            .copied()
            .filter(|code| code.bitlen > 0)
    }

    /// Code length of every symbol (0 for unused symbols)
    pub fn code_lengths(&self) -> Vec<u8> {
        self.codes.iter().map(|code| code.bitlen).collect()
    }

    /// Size of the alphabet the codec was built for
    pub fn num_symbols(&self) -> usize {
        self.codes.len()
    }
}
