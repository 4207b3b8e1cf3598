//! Error types for Huffman coding.

use thiserror::Error;

/// Error variants for Huffman operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Encoding was asked to build a code from zero symbols.
    #[error("empty input: no symbols to build a code from")]
    EmptyInput,

    /// A frequency table entry had a count of zero.
    #[error("zero weight: every symbol must occur at least once")]
    ZeroWeight,

    /// Summed counts or weights do not fit in a `u64`.
    #[error("weight overflow: total count exceeds u64::MAX")]
    WeightOverflow,

    /// The input contains a symbol the code table has no code for.
    #[error("missing symbol: {0} has no code in the table")]
    MissingSymbol(String),

    /// The bitstream ended partway through a code.
    #[error("truncated stream: {bits} bits ended mid-code after the last symbol at bit {consumed}")]
    TruncatedStream {
        /// Total length of the bitstream.
        bits: usize,
        /// Bit offset just after the last complete code.
        consumed: usize,
    },

    /// A bit path in the stream matches no code.
    #[error("invalid code: bit path starting at offset {offset} matches no symbol")]
    InvalidCode {
        /// Bit offset where the unmatched code starts.
        offset: usize,
    },

    /// A tree violates a structural invariant.
    #[error("corrupt tree: {0}")]
    CorruptTree(&'static str),

    /// A code table violates a structural invariant.
    #[error("corrupt table: {0}")]
    CorruptTable(String),
}

/// A specialized Result type for Huffman operations.
pub type Result<T> = std::result::Result<T, Error>;
