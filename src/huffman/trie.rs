//! Binary decode trie
//!
//! Nodes live in a flat arena and refer to each other by index. Index 0 is
//! the root, which can never be a child, so 0 doubles as "no child".

use super::Code;
use crate::bitstream::BitReader;
use crate::{LzhError, Result};
use std::io::Read;

const NO_CHILD: u32 = 0;

#[derive(Debug, Clone, Default)]
struct TrieNode {
    children: [u32; 2],
    symbol: Option<u16>,
}

/// Decode trie walked one bit at a time
#[derive(Debug, Clone)]
pub struct DecodeTrie {
    nodes: Vec<TrieNode>,
}

impl DecodeTrie {
    /// Build the trie from a symbol-indexed code table
    ///
    /// Fails with [`LzhError::InvalidCode`] if the codes are not prefix-free.
    pub fn from_codes(codes: &[Code]) -> Result<Self> {
        let mut trie = Self {
            nodes: vec![TrieNode::default()],
        };

        for (symbol, code) in codes.iter().enumerate() {
            if code.bitlen > 0 {
                trie.insert(symbol as u16, *code)?;
            }
        }

        Ok(trie)
    }

    fn insert(&mut self, symbol: u16, code: Code) -> Result<()> {
        let mut node = 0usize;
        for i in 0..code.bitlen as u32 {
            if self.nodes[node].symbol.is_some() {
                return Err(LzhError::InvalidCode);
            }
            let bit = ((code.bits >> i) & 1) as usize;
            let child = self.nodes[node].children[bit];
            node = if child == NO_CHILD {
                let next = self.nodes.len();
                self.nodes.push(TrieNode::default());
                self.nodes[node].children[bit] = next as u32;
                next
            } else {
                child as usize
            };
        }

        let leaf = &mut self.nodes[node];
        if leaf.symbol.is_some() || leaf.children != [NO_CHILD; 2] {
            return Err(LzhError::InvalidCode);
        }
        leaf.symbol = Some(symbol);
        Ok(())
    }

    /// Decode one symbol from the bit stream
    pub fn decode<R: Read>(&self, reader: &mut BitReader<R>) -> Result<u16> {
        let mut node = 0usize;
        loop {
            if let Some(symbol) = self.nodes[node].symbol {
                return Ok(symbol);
            }
            let bit = reader.read_bit()? as usize;
            let child = self.nodes[node].children[bit];
            if child == NO_CHILD {
                return Err(LzhError::InvalidCode);
            }
            node = child as usize;
        }
    }

    /// Number of nodes, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
