//! Huffman decoder.
//!
//! Decoding works from the code table alone. The table is loaded into a
//! binary trie kept in a flat arena; each bit picks a child index. A
//! missing child means the bit path matches no code, which cannot happen
//! for a table made from a complete Huffman tree of two or more symbols.

use bitvec::prelude::*;

use crate::error::{Error, Result};
use crate::table::{code_string, CodeTable};
use crate::tree::HuffmanTree;
use crate::Symbol;

const ROOT: usize = 0;

#[derive(Debug, Clone)]
struct TrieNode<S> {
    children: [Option<usize>; 2],
    symbol: Option<S>,
}

impl<S> TrieNode<S> {
    fn empty() -> Self {
        Self {
            children: [None, None],
            symbol: None,
        }
    }
}

/// Recovers symbols from a bitstream using a code table.
#[derive(Debug, Clone)]
pub struct HuffmanDecoder<S> {
    arena: Vec<TrieNode<S>>,
}

impl<S: Symbol> HuffmanDecoder<S> {
    /// Create a new Huffman decoder from a code table.
    ///
    /// # Errors
    /// Returns `Error::CorruptTable` if the table is empty, holds an empty
    /// code, or is not prefix-free.
    pub fn new(table: &CodeTable<S>) -> Result<Self> {
        if table.is_empty() {
            return Err(Error::CorruptTable("table has no codes".into()));
        }

        let mut arena = vec![TrieNode::empty()];
        for (symbol, code) in table.iter() {
            insert(&mut arena, symbol, code)?;
        }

        log::debug!(
            "built decode trie: {} symbols, {} nodes",
            table.len(),
            arena.len()
        );
        Ok(Self { arena })
    }

    /// Create a decoder for the codes of `tree`.
    pub fn from_tree(tree: &HuffmanTree<S>) -> Result<Self> {
        Self::new(&tree.code_table())
    }

    /// Decode a bit stream into a symbol sequence.
    ///
    /// # Errors
    /// - `Error::TruncatedStream` if the bits end partway through a code.
    /// - `Error::InvalidCode` if a bit path matches no code.
    pub fn decode(&self, bits: &BitSlice<u8, Msb0>) -> Result<Vec<S>> {
        let mut out = Vec::new();
        let mut curr = ROOT;
        let mut start = 0;

        for (i, bit) in bits.iter().by_vals().enumerate() {
            curr = self.arena[curr].children[bit as usize]
                .ok_or(Error::InvalidCode { offset: start })?;

            if let Some(symbol) = &self.arena[curr].symbol {
                out.push(symbol.clone());
                curr = ROOT;
                start = i + 1;
            }
        }

        if start != bits.len() {
            return Err(Error::TruncatedStream {
                bits: bits.len(),
                consumed: start,
            });
        }

        log::debug!("decoded {} bits into {} symbols", bits.len(), out.len());
        Ok(out)
    }
}

fn insert<S: Symbol>(
    arena: &mut Vec<TrieNode<S>>,
    symbol: &S,
    code: &BitSlice<u8, Msb0>,
) -> Result<()> {
    if code.is_empty() {
        return Err(Error::CorruptTable(format!("{:?} has an empty code", symbol)));
    }

    let mut curr = ROOT;
    for bit in code.iter().by_vals() {
        if arena[curr].symbol.is_some() {
            return Err(Error::CorruptTable(format!(
                "a shorter code is a prefix of {}",
                code_string(code)
            )));
        }
        curr = match arena[curr].children[bit as usize] {
            Some(next) => next,
            None => {
                let next = arena.len();
                arena.push(TrieNode::empty());
                arena[curr].children[bit as usize] = Some(next);
                next
            }
        };
    }

    let node = &mut arena[curr];
    if node.symbol.is_some() || node.children.iter().any(Option::is_some) {
        return Err(Error::CorruptTable(format!(
            "code {} is a prefix of another code",
            code_string(code)
        )));
    }
    node.symbol = Some(symbol.clone());
    Ok(())
}
