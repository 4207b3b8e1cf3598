//! Huffman tree construction and tree-walk decoding.
//!
//! Leaves enter the queue in ascending symbol order; merged nodes follow in
//! creation order. Each merge pops `A` then `B` and makes `A` the left
//! child, so the lighter node (or, on a tie, the earlier one) sits on the
//! `0` edge.

use std::collections::BTreeSet;

use bitvec::prelude::*;

use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;
use crate::queue::MinQueue;
use crate::table::CodeTable;
use crate::Symbol;

/// Huffman tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<S> {
    /// A symbol and its occurrence count.
    Leaf {
        /// The symbol.
        symbol: S,
        /// Occurrence count.
        weight: u64,
    },
    /// Two owned subtrees. `left` is the `0` edge, `right` the `1` edge.
    Internal {
        /// Sum of the children's weights.
        weight: u64,
        /// Subtree reached on bit 0.
        left: Box<Node<S>>,
        /// Subtree reached on bit 1.
        right: Box<Node<S>>,
    },
}

impl<S> Node<S> {
    /// Create a leaf.
    pub fn leaf(symbol: S, weight: u64) -> Self {
        Node::Leaf { symbol, weight }
    }

    /// Join two subtrees; `left` takes the `0` edge.
    ///
    /// The weight saturates at `u64::MAX`; [`HuffmanTree::from_root`]
    /// rejects such a node. Use [`Node::try_merge`] to catch it here.
    pub fn merge(left: Self, right: Self) -> Self {
        Node::Internal {
            weight: left.weight().saturating_add(right.weight()),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Join two subtrees, failing if their weights overflow.
    ///
    /// # Errors
    /// Returns `Error::WeightOverflow` if the summed weight exceeds `u64::MAX`.
    pub fn try_merge(left: Self, right: Self) -> Result<Self> {
        let weight = left
            .weight()
            .checked_add(right.weight())
            .ok_or(Error::WeightOverflow)?;
        Ok(Node::Internal {
            weight,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// Weight of this subtree.
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } => *weight,
            Node::Internal { weight, .. } => *weight,
        }
    }

    /// True for a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }
}

/// A completed Huffman tree with exactly one root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree<S> {
    root: Node<S>,
}

impl<S: Symbol> HuffmanTree<S> {
    /// Build the tree for a frequency table by greedy minimum-weight merging.
    ///
    /// A one-symbol table produces a tree whose root is that leaf.
    ///
    /// # Errors
    /// - `Error::EmptyInput` if the table is empty.
    /// - `Error::WeightOverflow` if a merged weight exceeds `u64::MAX`.
    pub fn from_frequencies(freq: &FrequencyTable<S>) -> Result<Self> {
        log::trace!("frequency table: {:?}", freq);

        let mut pq = MinQueue::with_capacity(freq.len());
        for (symbol, count) in freq {
            pq.insert(count, Node::leaf(symbol.clone(), count));
        }

        let root = loop {
            let (_, left) = pq.pop_min().ok_or(Error::EmptyInput)?;
            let Some((_, right)) = pq.pop_min() else {
                break left;
            };
            let merged = Node::try_merge(left, right)?;
            pq.insert(merged.weight(), merged);
        };

        log::debug!(
            "built huffman tree: {} leaves, weight {}",
            freq.len(),
            root.weight()
        );
        log::trace!("huffman tree: {:?}", root);

        Ok(Self { root })
    }

    /// Count symbols in `symbols` and build their tree.
    ///
    /// # Errors
    /// Returns `Error::EmptyInput` if `symbols` is empty.
    pub fn from_symbols(symbols: &[S]) -> Result<Self> {
        Self::from_frequencies(&FrequencyTable::from_symbols(symbols))
    }

    /// Adopt a tree built elsewhere after checking its invariants.
    ///
    /// # Errors
    /// Returns `Error::CorruptTree` if a leaf has zero weight, an internal
    /// weight differs from the sum of its children, or a symbol appears on
    /// more than one leaf.
    pub fn from_root(root: Node<S>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        validate(&root, &mut seen)?;
        Ok(Self { root })
    }

    /// The code table for this tree: `0` per left edge, `1` per right edge.
    pub fn code_table(&self) -> CodeTable<S> {
        CodeTable::from_tree(self)
    }

    /// Decode by walking the tree one bit at a time.
    ///
    /// # Errors
    /// - `Error::TruncatedStream` if the bits end partway through a code.
    /// - `Error::InvalidCode` if a `1` bit is read by a single-symbol tree.
    pub fn decode(&self, bits: &BitSlice<u8, Msb0>) -> Result<Vec<S>> {
        let mut out = Vec::new();

        // Single-symbol convention: the lone leaf hangs off a `0` edge.
        if let Node::Leaf { symbol, .. } = &self.root {
            if let Some(offset) = bits.first_one() {
                return Err(Error::InvalidCode { offset });
            }
            out.resize(bits.len(), symbol.clone());
            return Ok(out);
        }

        let mut curr = &self.root;
        let mut consumed = 0;
        for (i, bit) in bits.iter().by_vals().enumerate() {
            curr = match curr {
                Node::Internal { left, right, .. } => {
                    if bit {
                        right
                    } else {
                        left
                    }
                }
                Node::Leaf { .. } => return Err(Error::CorruptTree("cursor stopped on a leaf")),
            };

            if let Node::Leaf { symbol, .. } = curr {
                out.push(symbol.clone());
                curr = &self.root;
                consumed = i + 1;
            }
        }

        if consumed != bits.len() {
            return Err(Error::TruncatedStream {
                bits: bits.len(),
                consumed,
            });
        }
        Ok(out)
    }
}

impl<S> HuffmanTree<S> {
    /// The root node.
    pub fn root(&self) -> &Node<S> {
        &self.root
    }

    /// Total weight, equal to the length of the message it was built from.
    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    /// Length of the longest root-to-leaf path, equal to the longest code.
    ///
    /// A single-leaf tree has depth 1, matching its one-bit code.
    pub fn depth(&self) -> usize {
        if self.root.is_leaf() {
            return 1;
        }
        self.root.depth()
    }

    /// Number of leaves, equal to the number of distinct symbols.
    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }
}

fn validate<'a, S: Ord>(node: &'a Node<S>, seen: &mut BTreeSet<&'a S>) -> Result<()> {
    match node {
        Node::Leaf { symbol, weight } => {
            if *weight == 0 {
                return Err(Error::CorruptTree("leaf with zero weight"));
            }
            if !seen.insert(symbol) {
                return Err(Error::CorruptTree("symbol appears on two leaves"));
            }
            Ok(())
        }
        Node::Internal {
            weight,
            left,
            right,
        } => {
            if left.weight().checked_add(right.weight()) != Some(*weight) {
                return Err(Error::CorruptTree("internal weight is not the sum of its children"));
            }
            validate(left, seen)?;
            validate(right, seen)
        }
    }
}
