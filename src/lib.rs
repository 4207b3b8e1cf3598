//! # Huffman Coding
//!
//! *Minimum-redundancy prefix codes built from symbol frequencies.*
//!
//! ## Intuition First
//!
//! Morse code gives `E` a single dot and `Q` four symbols. Huffman coding
//! makes that idea exact: count how often each symbol occurs, then hand the
//! shortest bit strings to the most common symbols. Because no code is the
//! prefix of another, the encoded bits need no separators; a reader walks a
//! binary tree, going left on `0` and right on `1`, and emits a symbol each
//! time it reaches a leaf.
//!
//! ## The Problem
//!
//! A fixed-width code spends `ceil(log2 n)` bits on every symbol of an
//! `n`-symbol alphabet, whatever the distribution. When a few symbols
//! dominate the message most of those bits are wasted. We want the
//! prefix-free code with the smallest total encoded length for a given
//! frequency table.
//!
//! ## Historical Context
//!
//! ```text
//! 1948  Shannon     Entropy as the fundamental limit
//! 1949  Fano        Shannon-Fano coding: top-down splits, not always optimal
//! 1952  Huffman     Bottom-up greedy merge: provably optimal prefix codes
//! 1964  Schwartz    Canonical codes: tree described by code lengths alone
//! 1989  Katz        DEFLATE (PKZIP) pairs LZ77 with Huffman coding
//! 1992  JPEG        Baseline JPEG entropy-codes DCT coefficients with Huffman
//! ```
//!
//! ## Mathematical Formulation
//!
//! Given symbols with counts `w_s`, find codeword lengths `l_s` satisfying
//! Kraft's inequality `sum 2^(-l_s) <= 1` that minimize
//!
//! ```text
//! L = sum_s w_s * l_s
//! ```
//!
//! The greedy construction repeatedly merges the two lightest subtrees. The
//! cost `L` equals the sum of the weights of all internal nodes created,
//! and is within one bit per symbol of the entropy bound.
//!
//! ## Complexity Analysis
//!
//! - **Tree build**: O(N log N) for N distinct symbols, using a binary heap.
//! - **Encode / decode**: O(L) for a message of L symbols (plus code lengths).
//!
//! ## Failure Modes
//!
//! 1. **Empty input**: there is nothing to count, so no tree exists.
//! 2. **One distinct symbol**: a tree needs two leaves for a 0/1 split. This
//!    crate gives the lone symbol the one-bit code `0`.
//! 3. **Detached tables**: a table loaded from elsewhere may lack a symbol
//!    or fail to be prefix-free; both are reported, never assumed away.
//!
//! ## Implementation Notes
//!
//! - The bitstream is not self-describing. Ship the [`CodeTable`] with it.
//! - Codes are deterministic. Equal weights are merged in insertion order
//!   (leaves by ascending symbol, then merged nodes by creation) and the
//!   node popped first becomes the left child.
//! - Symbols are any `Ord + Clone + Debug` type: `u8` for bytes, `char` for
//!   text, or application tokens.
//!
//! ```rust
//! let text: Vec<char> = "AAAAAAABBBCCCCCCCDDEEEEEE".chars().collect();
//! let encoded = huff::encode(&text)?;
//! assert_eq!(encoded.bits.len(), 55);
//! assert_eq!(huff::decode(&encoded.bits, &encoded.table)?, text);
//! # Ok::<(), huff::Error>(())
//! ```
//!
//! ## References
//!
//! - Huffman, D. A. (1952). "A Method for the Construction of Minimum-Redundancy Codes."
//! - Cover, T. M. & Thomas, J. A. (2006). *Elements of Information Theory*, ch. 5.

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::fmt;

use bitvec::prelude::*;

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod frequency;
pub mod queue;
pub mod table;
pub mod tree;

pub use decoder::HuffmanDecoder;
pub use encoder::HuffmanEncoder;
pub use error::{Error, Result};
pub use frequency::FrequencyTable;
pub use table::CodeTable;
pub use tree::{HuffmanTree, Node};

/// An owned bit sequence, most significant bit first within each byte.
pub type Bits = BitVec<u8, Msb0>;

/// Anything that can be coded: ordered for deterministic tables, printable
/// for error messages.
pub trait Symbol: Ord + Clone + fmt::Debug {}

impl<T: Ord + Clone + fmt::Debug> Symbol for T {}

/// The output of [`encode`]: the bitstream and the table needed to read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded<S: Ord> {
    /// Concatenated codes in input order.
    pub bits: Bits,
    /// Code for every distinct input symbol.
    pub table: CodeTable<S>,
    /// Size figures for this message.
    pub stats: CompressionStats,
}

/// Size figures for one encoded message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionStats {
    /// Number of symbols in the message.
    pub symbols: u64,
    /// Number of distinct symbols.
    pub distinct: usize,
    /// Length of the bitstream.
    pub encoded_bits: u64,
}

impl CompressionStats {
    /// Size of the message at a fixed `bits_per_symbol`, e.g. 8 for bytes.
    pub fn fixed_width_bits(&self, bits_per_symbol: u32) -> u64 {
        self.symbols * u64::from(bits_per_symbol)
    }

    /// Width of the shortest fixed-length code for this alphabet (at least 1).
    pub fn uniform_code_width(&self) -> u32 {
        match self.distinct {
            0 | 1 => 1,
            n => usize::BITS - (n - 1).leading_zeros(),
        }
    }

    /// Mean code length in bits.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.symbols == 0 {
            return 0.0;
        }
        self.encoded_bits as f64 / self.symbols as f64
    }

    /// Encoded size over fixed-width size; below 1.0 means the code is smaller.
    pub fn ratio(&self, bits_per_symbol: u32) -> f64 {
        let fixed = self.fixed_width_bits(bits_per_symbol);
        if fixed == 0 {
            return 0.0;
        }
        self.encoded_bits as f64 / fixed as f64
    }
}

/// Build a code for `symbols` and encode them with it.
///
/// # Errors
/// Returns `Error::EmptyInput` if `symbols` is empty.
pub fn encode<S: Symbol>(symbols: &[S]) -> Result<Encoded<S>> {
    let freq = FrequencyTable::from_symbols(symbols);
    let encoder = HuffmanEncoder::new(&freq)?;
    let bits = encoder.encode(symbols)?;
    let stats = CompressionStats {
        symbols: symbols.len() as u64,
        distinct: freq.len(),
        encoded_bits: bits.len() as u64,
    };
    Ok(Encoded {
        bits,
        table: encoder.into_table(),
        stats,
    })
}

/// Recover the symbols of `bits` using the table they were encoded with.
///
/// # Errors
/// - `Error::CorruptTable` if the table is empty or not prefix-free.
/// - `Error::TruncatedStream` if the bits end partway through a code.
/// - `Error::InvalidCode` if a bit path matches no code.
pub fn decode<S: Symbol>(bits: &BitSlice<u8, Msb0>, table: &CodeTable<S>) -> Result<Vec<S>> {
    HuffmanDecoder::new(table)?.decode(bits)
}

/// [`encode`] the characters of `text`.
///
/// # Errors
/// Returns `Error::EmptyInput` if `text` is empty.
pub fn encode_str(text: &str) -> Result<Encoded<char>> {
    let chars: Vec<char> = text.chars().collect();
    encode(&chars)
}

/// [`decode`] into a `String`.
///
/// # Errors
/// As for [`decode`].
pub fn decode_str(bits: &BitSlice<u8, Msb0>, table: &CodeTable<char>) -> Result<String> {
    Ok(decode(bits, table)?.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::code_string;

    const WORKED: &str = "AAAAAAABBBCCCCCCCDDEEEEEE";

    #[test]
    fn test_worked_example() {
        let encoded = encode_str(WORKED).unwrap();
        assert_eq!(
            code_string(&encoded.bits),
            "1010101010101000100100111111111111111000000010101010101"
        );
        assert_eq!(decode_str(&encoded.bits, &encoded.table).unwrap(), WORKED);

        let len = |c: char| encoded.table.get(&c).unwrap().len();
        assert!(len('D') > len('A') && len('D') > len('C'));
        assert!(len('B') > len('A') && len('B') > len('C'));
        assert!(encoded.table.is_prefix_free());
    }

    #[test]
    fn test_single_symbol() {
        let encoded = encode_str("aaaa").unwrap();
        assert!(!encoded.bits.is_empty());
        assert_eq!(decode_str(&encoded.bits, &encoded.table).unwrap(), "aaaa");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(encode_str("").unwrap_err(), Error::EmptyInput);
        assert_eq!(encode::<u8>(&[]).unwrap_err(), Error::EmptyInput);
    }

    #[test]
    fn test_deterministic() {
        let a = encode_str("The bird is the word").unwrap();
        let b = encode_str("The bird is the word").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_stats() {
        let encoded = encode_str(WORKED).unwrap();
        let stats = encoded.stats;
        assert_eq!(stats.symbols, 25);
        assert_eq!(stats.distinct, 5);
        assert_eq!(stats.encoded_bits, 55);
        assert_eq!(stats.fixed_width_bits(8), 200);
        assert_eq!(stats.uniform_code_width(), 3);
        assert!((stats.bits_per_symbol() - 2.2).abs() < 1e-9);
        assert!((stats.ratio(8) - 0.275).abs() < 1e-9);
    }

    #[test]
    fn test_uniform_code_width() {
        let width = |distinct| {
            CompressionStats {
                symbols: 1,
                distinct,
                encoded_bits: 1,
            }
            .uniform_code_width()
        };
        assert_eq!(width(1), 1);
        assert_eq!(width(2), 1);
        assert_eq!(width(3), 2);
        assert_eq!(width(4), 2);
        assert_eq!(width(5), 3);
        assert_eq!(width(256), 8);
    }

    #[test]
    fn test_bytes() {
        let data = b"mississippi river".to_vec();
        let encoded = encode(&data).unwrap();
        assert_eq!(decode(&encoded.bits, &encoded.table).unwrap(), data);
    }
}
