//! Common types and constants for the lzhuff codec
//!
//! This module defines the configuration, statistics, and error types shared
//! by the compression and decompression halves of the container codec.

use thiserror::Error;

/// Magic bytes at the start of every container
pub const MAGIC: [u8; 4] = *b"LZHF";

/// Container format version written by this crate
pub const FORMAT_VERSION: u16 = 1;

/// Minimum match length accepted by the LZ77 matcher
pub const MIN_MATCH: usize = 3;

/// Maximum match length (bounded by the length symbol table)
pub const MAX_MATCH: usize = 258;

/// Largest window size the distance table can express
pub const MAX_WINDOW_SIZE: u32 = 32768;

/// Default LZ77 window size
pub const DEFAULT_WINDOW_SIZE: u32 = MAX_WINDOW_SIZE;

/// Default number of hash-chain candidates probed per position
pub const DEFAULT_MAX_CHAIN: usize = 128;

/// Number of bits in a hash bucket index
pub const HASH_BITS: u32 = 15;

/// End-of-block symbol in the literal/length alphabet
pub const END_OF_BLOCK: u16 = 256;

/// First length symbol in the literal/length alphabet
pub const FIRST_LENGTH_SYMBOL: u16 = 257;

/// Size of the literal/length alphabet (literals, end-of-block, 29 length symbols)
pub const LITLEN_ALPHABET_SIZE: usize = 286;

/// Size of the distance alphabet
pub const DISTANCE_ALPHABET_SIZE: usize = 30;

/// Options controlling compression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressOptions {
    /// LZ77 window size in bytes; bounds match distances
    pub window_size: u32,
    /// Maximum number of hash-chain candidates probed per position
    pub max_chain: usize,
}

impl CompressOptions {
    /// Create options with an explicit window size and chain depth
    pub fn new(window_size: u32, max_chain: usize) -> Result<Self> {
        let options = Self {
            window_size,
            max_chain,
        };
        options.validate()?;
        Ok(options)
    }

    /// Replace the window size
    pub fn with_window_size(mut self, window_size: u32) -> Self {
        self.window_size = window_size;
        self
    }

    /// Replace the chain depth
    pub fn with_max_chain(mut self, max_chain: usize) -> Self {
        self.max_chain = max_chain;
        self
    }

    /// Check that the options describe a container we can write
    pub fn validate(&self) -> Result<()> {
        validate_window_size(self.window_size)?;
        if self.max_chain == 0 {
            return Err(LzhError::InvalidOptions(
                "max_chain must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            max_chain: DEFAULT_MAX_CHAIN,
        }
    }
}

/// Check a window size against the range the distance table supports
pub fn validate_window_size(window_size: u32) -> Result<()> {
    if window_size == 0 || window_size > MAX_WINDOW_SIZE {
        return Err(LzhError::InvalidWindowSize(window_size));
    }
    Ok(())
}

/// Error type for codec operations
#[derive(Debug, Error)]
pub enum LzhError {
    /// Bit stream ran out before the requested bits were available
    #[error("Unexpected end of input")]
    UnexpectedEof,

    /// Header ended while reading the named field
    #[error("Truncated header while reading {0}")]
    TruncatedHeader(&'static str),

    /// Container does not start with the expected magic bytes
    #[error("Invalid magic: expected {expected:02X?}, got {0:02X?}", expected = MAGIC)]
    InvalidMagic([u8; 4]),

    /// Container written by an unknown format version
    #[error("Unsupported format version: {0}")]
    UnsupportedVersion(u16),

    /// Window size outside `1..=MAX_WINDOW_SIZE`
    #[error("Invalid window size: {0} (expected 1..={max})", max = MAX_WINDOW_SIZE)]
    InvalidWindowSize(u32),

    /// Malformed frequency table in the header
    #[error("Invalid frequency table: {0}")]
    InvalidFrequencyTable(String),

    /// Huffman table requested from an all-zero frequency table
    #[error("Cannot build Huffman table: all frequencies are zero")]
    EmptyFrequencyTable,

    /// Huffman construction produced a code longer than the supported maximum
    #[error("Huffman code length {0} exceeds the supported maximum")]
    CodeTooLong(u32),

    /// Symbol has no code in the table (out of range or zero frequency)
    #[error("Symbol {0} cannot be encoded with this table")]
    SymbolNotEncodable(u16),

    /// Bit pattern does not lead to any symbol in the decode trie
    #[error("Invalid Huffman code in stream")]
    InvalidCode,

    /// Decoded symbol is outside the alphabet it was decoded from
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(u16),

    /// Length symbol decoded but the container carries no distance table
    #[error("Match found but no distance table is present")]
    MissingDistanceTable,

    /// Back-reference reaches before the start of the output or outside the window
    #[error("Invalid distance {distance} (only {available} bytes available)")]
    InvalidDistance {
        /// Decoded distance
        distance: u32,
        /// Bytes that may legally be referenced
        available: u64,
    },

    /// Match length outside the encodable range
    #[error("Invalid match length: {0}")]
    InvalidLength(u32),

    /// Decoded size differs from the size declared in the header
    #[error("Size mismatch: header declares {expected} bytes, decoded {actual}")]
    SizeMismatch {
        /// Size declared in the header
        expected: u64,
        /// Size actually reconstructed
        actual: u64,
    },

    /// Compression options rejected
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, LzhError>;

/// Statistics for compression/decompression operations
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CompressionStats {
    /// Number of literal tokens encoded/decoded
    pub literal_count: usize,
    /// Number of match tokens encoded/decoded
    pub match_count: usize,
    /// Longest match found
    pub longest_match: usize,
    /// Bytes consumed from the source
    pub input_bytes: u64,
    /// Bytes written to the sink
    pub output_bytes: u64,
}

impl CompressionStats {
    /// Output size as a fraction of input size (0.0 for empty input)
    pub fn ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.output_bytes as f64 / self.input_bytes as f64
        }
    }
}
