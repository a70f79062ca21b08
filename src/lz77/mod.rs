//! LZ77 dictionary matcher
//!
//! Turns a complete input buffer into a sequence of [`Token`]s in a single
//! greedy pass: at each position the longest match within the window is
//! taken, otherwise one literal byte is emitted. There is no lazy matching.

mod hash;
mod pattern;

pub use hash::{hash3, HashChains};
pub use pattern::{compare_sequences, MatchResult};

use crate::common::{CompressOptions, HASH_BITS, MAX_MATCH, MIN_MATCH};
use crate::{LzhError, Result};

/// One unit of LZ77 output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// A single byte copied verbatim
    Literal(u8),
    /// Copy `length` bytes starting `distance` bytes back
    Match {
        /// Number of bytes to copy, `MIN_MATCH..=MAX_MATCH`
        length: u16,
        /// Backward distance, `1..=window_size`
        distance: u16,
    },
}

impl Token {
    /// Number of output bytes this token produces
    pub fn output_len(&self) -> usize {
        match self {
            Token::Literal(_) => 1,
            Token::Match { length, .. } => *length as usize,
        }
    }
}

/// Greedy hash-chain match finder
#[derive(Debug, Clone)]
pub struct Matcher {
    window_size: u32,
    chains: HashChains,
}

impl Matcher {
    /// Create a matcher for the given options
    pub fn new(options: &CompressOptions) -> Self {
        Self {
            window_size: options.window_size,
            chains: HashChains::new(HASH_BITS, options.max_chain),
        }
    }

    /// Window size used to bound match distances
    pub fn window_size(&self) -> u32 {
        self.window_size
    }

    /// Tokenize the whole of `data`
    ///
    /// The hash chains are reset first, so one matcher can be reused for
    /// unrelated inputs.
    pub fn tokenize(&mut self, data: &[u8]) -> Vec<Token> {
        self.chains.clear();
        let mut tokens = Vec::with_capacity(data.len() / 2 + 1);
        let mut pos = 0;

        while pos < data.len() {
            match self.find_longest_match(data, pos) {
                Some(found) => {
                    tokens.push(Token::Match {
                        length: found.length as u16,
                        distance: found.distance as u16,
                    });
                    // Index the whole span so later matches can reach into it
                    for p in pos..pos + found.length {
                        self.chains.insert(data, p);
                    }
                    pos += found.length;
                }
                None => {
                    tokens.push(Token::Literal(data[pos]));
                    self.chains.insert(data, pos);
                    pos += 1;
                }
            }
        }

        log::trace!(
            "tokenized {} bytes into {} tokens (window {})",
            data.len(),
            tokens.len(),
            self.window_size
        );
        tokens
    }
}

/// Append a back-reference to `output`
///
/// Copies forward one byte at a time, since the source range may overlap
/// the bytes being produced when `distance < length`.
pub fn copy_match(output: &mut Vec<u8>, length: usize, distance: usize) -> Result<()> {
    if distance == 0 || distance > output.len() {
        return Err(LzhError::InvalidDistance {
            distance: distance as u32,
            available: output.len() as u64,
        });
    }
    if !(MIN_MATCH..=MAX_MATCH).contains(&length) {
        return Err(LzhError::InvalidLength(length as u32));
    }

    output.reserve(length);
    let start = output.len() - distance;
    for i in 0..length {
        let byte = output[start + i];
        output.push(byte);
    }
    Ok(())
}

/// Rebuild the original bytes from a token sequence
pub fn expand_tokens(tokens: &[Token]) -> Result<Vec<u8>> {
    let mut output = Vec::with_capacity(tokens.iter().map(Token::output_len).sum());
    for token in tokens {
        match *token {
            Token::Literal(byte) => output.push(byte),
            Token::Match { length, distance } => {
                copy_match(&mut output, length as usize, distance as usize)?
            }
        }
    }
    Ok(output)
}
