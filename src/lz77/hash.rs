//! Hash-chain index for match finding
//!
//! Every position with at least three bytes ahead of it is filed under the
//! hash of those three bytes. A bucket holds positions in insertion order,
//! so walking it backwards visits the most recent (closest) ones first.

use crate::common::MIN_MATCH;

/// Hash of the three bytes starting at `bytes[0]`
#[inline]
pub fn hash3(bytes: &[u8], hash_bits: u32) -> usize {
    let key = ((bytes[0] as u32) << 16) | ((bytes[1] as u32) << 8) | bytes[2] as u32;
    (key.wrapping_mul(0x9E37_79B1) >> (32 - hash_bits)) as usize
}

/// Positions grouped by 3-byte hash
#[derive(Debug, Clone)]
pub struct HashChains {
    buckets: Vec<Vec<u32>>,
    hash_bits: u32,
    max_chain: usize,
}

impl HashChains {
    /// Create an empty index with `2^hash_bits` buckets
    pub fn new(hash_bits: u32, max_chain: usize) -> Self {
        Self {
            buckets: vec![Vec::new(); 1 << hash_bits],
            hash_bits,
            max_chain: max_chain.max(1),
        }
    }

    /// Forget every indexed position
    pub fn clear(&mut self) {
        self.buckets.iter_mut().for_each(Vec::clear);
    }

    /// Index position `pos` of `data`
    ///
    /// Positions with fewer than three bytes remaining are skipped.
    pub fn insert(&mut self, data: &[u8], pos: usize) {
        if pos + MIN_MATCH > data.len() {
            return;
        }
        let bucket = &mut self.buckets[hash3(&data[pos..], self.hash_bits)];
        bucket.push(pos as u32);

        // Only the newest `max_chain` entries are ever probed. Trimming in
        // batches keeps the cost amortised.
        if bucket.len() >= self.max_chain * 2 {
            let excess = bucket.len() - self.max_chain;
            bucket.drain(..excess);
        }
    }

    /// Earlier positions sharing the hash of `pos`, newest first
    ///
    /// Yields at most `max_chain` positions. Hash collisions are possible,
    /// so callers must still compare bytes.
    pub fn candidates<'a>(&'a self, data: &[u8], pos: usize) -> impl Iterator<Item = usize> + 'a {
        let bucket: &'a [u32] = if pos + MIN_MATCH <= data.len() {
            &self.buckets[hash3(&data[pos..], self.hash_bits)]
        } else {
            &[]
        };
        bucket
            .iter()
            .rev()
            .map(|&p| p as usize)
            .take(self.max_chain)
    }

    /// Total number of indexed positions
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// True when no position is indexed
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }
}
