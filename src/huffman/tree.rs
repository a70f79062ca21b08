//! Code length construction
//!
//! Classic greedy Huffman merge over a min-heap. Ties on weight are broken
//! by an insertion counter: leaves take their rank in ascending symbol
//! order, and every merged node takes the next counter value. The encoder
//! and decoder both rebuild the tree from the same frequency table, so the
//! merge order has to be fully deterministic.

use super::MAX_CODE_LENGTH;
use crate::{LzhError, Result};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Compute the Huffman code length of every symbol
///
/// Symbols with zero frequency get length 0. A table with exactly one
/// used symbol gives that symbol length 1.
pub fn code_lengths(freqs: &[u32]) -> Result<Vec<u8>> {
    let mut lengths = vec![0u8; freqs.len()];
    let leaves: Vec<usize> = freqs
        .iter()
        .enumerate()
        .filter(|(_, &freq)| freq > 0)
        .map(|(symbol, _)| symbol)
        .collect();

    match leaves.len() {
        0 => return Err(LzhError::EmptyFrequencyTable),
        1 => {
            lengths[leaves[0]] = 1;
            return Ok(lengths);
        }
        _ => {}
    }

    // parent[i] is the arena index of node i's parent; leaves come first
    let mut parent: Vec<usize> = vec![usize::MAX; leaves.len()];
    let mut heap = BinaryHeap::with_capacity(leaves.len());
    for (index, &symbol) in leaves.iter().enumerate() {
        heap.push(Reverse((freqs[symbol] as u64, index as u64, index)));
    }
    let mut order = leaves.len() as u64;

    while heap.len() > 1 {
        let (Some(Reverse((w1, _, a))), Some(Reverse((w2, _, b)))) = (heap.pop(), heap.pop())
        else {
            break;
        };
        let merged = parent.len();
        parent.push(usize::MAX);
        parent[a] = merged;
        parent[b] = merged;
        heap.push(Reverse((w1 + w2, order, merged)));
        order += 1;
    }

    // Parents are always allocated after their children, so a reverse
    // sweep sees each parent's depth before its children need it.
    let root = parent.len() - 1;
    let mut depth = vec![0u32; parent.len()];
    for node in (0..root).rev() {
        depth[node] = depth[parent[node]] + 1;
    }

    for (index, &symbol) in leaves.iter().enumerate() {
        let length = depth[index];
        if length > MAX_CODE_LENGTH {
            return Err(LzhError::CodeTooLong(length));
        }
        lengths[symbol] = length as u8;
    }

    Ok(lengths)
}
