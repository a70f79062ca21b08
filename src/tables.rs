//! Static symbol tables for match lengths and distances
//!
//! Length symbols 257..=285 and distance symbols 0..=29 each cover a range
//! of values: a base plus a fixed number of extra bits written verbatim
//! after the Huffman-coded symbol.

use crate::common::{FIRST_LENGTH_SYMBOL, MAX_MATCH, MIN_MATCH};

/// Number of length symbols
pub const LENGTH_CODES: usize = 29;

/// Number of distance symbols
pub const DISTANCE_CODES: usize = 30;

/// Base match length for each length symbol
pub const LENGTH_BASE: [u16; LENGTH_CODES] = [
    3, 4, 5, 6, 7, 8, 9, 10, 11, 13, 15, 17, 19, 23, 27, 31, 35, 43, 51, 59, 67, 83, 99, 115, 131,
    163, 195, 227, 258,
];

/// Extra bits following each length symbol
pub const LENGTH_EXTRA_BITS: [u8; LENGTH_CODES] = [
    0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 0,
];

/// Base distance for each distance symbol
pub const DISTANCE_BASE: [u16; DISTANCE_CODES] = [
    1, 2, 3, 4, 5, 7, 9, 13, 17, 25, 33, 49, 65, 97, 129, 193, 257, 385, 513, 769, 1025, 1537,
    2049, 3073, 4097, 6145, 8193, 12289, 16385, 24577,
];

/// Extra bits following each distance symbol
pub const DISTANCE_EXTRA_BITS: [u8; DISTANCE_CODES] = [
    0, 0, 0, 0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 8, 9, 9, 10, 10, 11, 11, 12, 12, 13,
    13,
];

/// A table entry resolved for one concrete value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolCode {
    /// Symbol in its alphabet
    pub symbol: u16,
    /// Number of extra bits to write after the symbol
    pub extra_bits: u8,
    /// Value of the extra bits
    pub extra_value: u32,
}

/// Map a match length to its length symbol and extra bits
pub fn length_symbol(length: usize) -> Option<SymbolCode> {
    if !(MIN_MATCH..=MAX_MATCH).contains(&length) {
        return None;
    }
    // 258 lands on its own zero-extra-bit symbol rather than 227 + 31
    let index = LENGTH_BASE.partition_point(|&base| base as usize <= length) - 1;
    Some(SymbolCode {
        symbol: FIRST_LENGTH_SYMBOL + index as u16,
        extra_bits: LENGTH_EXTRA_BITS[index],
        extra_value: (length - LENGTH_BASE[index] as usize) as u32,
    })
}

/// Base length and extra bit count for a length symbol
pub fn length_base(symbol: u16) -> Option<(u16, u8)> {
    let index = symbol.checked_sub(FIRST_LENGTH_SYMBOL)? as usize;
    if index >= LENGTH_CODES {
        return None;
    }
    Some((LENGTH_BASE[index], LENGTH_EXTRA_BITS[index]))
}

/// Map a match distance to its distance symbol and extra bits
pub fn distance_symbol(distance: usize) -> Option<SymbolCode> {
    let last = DISTANCE_CODES - 1;
    let max_distance =
        DISTANCE_BASE[last] as usize + (1usize << DISTANCE_EXTRA_BITS[last]) - 1;
    if distance == 0 || distance > max_distance {
        return None;
    }
    let index = DISTANCE_BASE.partition_point(|&base| base as usize <= distance) - 1;
    Some(SymbolCode {
        symbol: index as u16,
        extra_bits: DISTANCE_EXTRA_BITS[index],
        extra_value: (distance - DISTANCE_BASE[index] as usize) as u32,
    })
}

/// Base distance and extra bit count for a distance symbol
pub fn distance_base(symbol: u16) -> Option<(u16, u8)> {
    let index = symbol as usize;
    if index >= DISTANCE_CODES {
        return None;
    }
    Some((DISTANCE_BASE[index], DISTANCE_EXTRA_BITS[index]))
}
