//! Longest-match search
//!
//! Probes the hash chain for the current position and keeps the longest
//! match inside the window. Candidates arrive closest first, so keeping
//! only strictly longer matches leaves the smallest distance on ties.

use super::Matcher;
use crate::common::{MAX_MATCH, MIN_MATCH};

/// Result of pattern matching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    /// Length of the match in bytes
    pub length: usize,
    /// Backward distance to the start of the match
    pub distance: usize,
}

impl MatchResult {
    /// Create a new match result
    pub fn new(length: usize, distance: usize) -> Self {
        Self { length, distance }
    }

    /// Check if the match is long enough to be emitted
    pub fn is_match(&self) -> bool {
        self.length >= MIN_MATCH
    }
}

impl Matcher {
    /// Find the longest earlier match for the bytes at `pos`
    ///
    /// Only positions already inserted into the hash chains are
    /// considered. Returns `None` when fewer than [`MIN_MATCH`] bytes
    /// remain or no candidate reaches that length.
    pub fn find_longest_match(&self, data: &[u8], pos: usize) -> Option<MatchResult> {
        let remaining = data.len().saturating_sub(pos);
        if remaining < MIN_MATCH {
            return None;
        }
        let max_length = remaining.min(MAX_MATCH);
        let window = self.window_size as usize;

        let mut best = MatchResult::new(0, 0);
        for candidate in self.chains.candidates(data, pos) {
            let distance = pos - candidate;
            if distance > window {
                // Chains are ordered by position; everything further back is out too
                break;
            }

            let length = compare_sequences(data, candidate, pos, max_length);
            if length > best.length {
                best = MatchResult::new(length, distance);
                if length == max_length {
                    break;
                }
            }
        }

        best.is_match().then_some(best)
    }
}

/// Count matching bytes between `earlier` and `pos`, up to `max_length`
///
/// The ranges may overlap when `pos - earlier < max_length`; the count is
/// the same one a byte-by-byte forward copy would reproduce.
pub fn compare_sequences(data: &[u8], earlier: usize, pos: usize, max_length: usize) -> usize {
    data[pos..pos + max_length]
        .iter()
        .zip(&data[earlier..])
        .take_while(|(a, b)| a == b)
        .count()
}
