//! Huffman encoder.

use bitvec::prelude::*;

use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;
use crate::table::CodeTable;
use crate::tree::HuffmanTree;
use crate::{Bits, Symbol};

/// Maps symbols to their codes and concatenates them.
#[derive(Debug, Clone)]
pub struct HuffmanEncoder<S: Ord> {
    table: CodeTable<S>,
}

impl<S: Symbol> HuffmanEncoder<S> {
    /// Create a new Huffman encoder from symbol frequencies.
    ///
    /// # Errors
    /// Returns `Error::EmptyInput` if `freq` is empty.
    pub fn new(freq: &FrequencyTable<S>) -> Result<Self> {
        let tree = HuffmanTree::from_frequencies(freq)?;
        Ok(Self::from_tree(&tree))
    }

    /// Create an encoder for the frequencies of `symbols`.
    ///
    /// # Errors
    /// Returns `Error::EmptyInput` if `symbols` is empty.
    pub fn from_symbols(symbols: &[S]) -> Result<Self> {
        Self::new(&FrequencyTable::from_symbols(symbols))
    }

    /// Create an encoder from an existing tree.
    pub fn from_tree(tree: &HuffmanTree<S>) -> Self {
        Self {
            table: tree.code_table(),
        }
    }

    /// Create an encoder from a table supplied on its own, e.g. loaded from storage.
    pub fn from_table(table: CodeTable<S>) -> Self {
        Self { table }
    }

    /// Encode a symbol sequence into a bit stream.
    ///
    /// # Errors
    /// Returns `Error::MissingSymbol` if a symbol has no code.
    pub fn encode(&self, symbols: &[S]) -> Result<Bits> {
        let mut bits = BitVec::new();
        self.encode_into(symbols, &mut bits)?;
        Ok(bits)
    }

    /// Append the codes for `symbols` to `bits`.
    ///
    /// On error `bits` is left as it was.
    ///
    /// # Errors
    /// Returns `Error::MissingSymbol` if a symbol has no code.
    pub fn encode_into(&self, symbols: &[S], bits: &mut Bits) -> Result<()> {
        let start = bits.len();
        for symbol in symbols {
            match self.table.get(symbol) {
                Some(code) => bits.extend_from_bitslice(code),
                None => {
                    bits.truncate(start);
                    return Err(Error::MissingSymbol(format!("{:?}", symbol)));
                }
            }
        }
        log::debug!(
            "encoded {} symbols into {} bits",
            symbols.len(),
            bits.len() - start
        );
        Ok(())
    }
}

impl<S: Ord> HuffmanEncoder<S> {
    /// The code table in use.
    pub fn table(&self) -> &CodeTable<S> {
        &self.table
    }

    /// Take the code table, e.g. to ship it alongside the bitstream.
    pub fn into_table(self) -> CodeTable<S> {
        self.table
    }
}
