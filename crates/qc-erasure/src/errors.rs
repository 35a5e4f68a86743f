//! Error types for erasure coding

use thiserror::Error;

/// Result type alias for erasure coding
pub type Result<T> = std::result::Result<T, ErasureError>;

/// Errors raised while extending or repairing a square.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErasureError {
    /// No shares supplied
    #[error("Cannot extend an empty square")]
    Empty,

    /// Share count is not a perfect square
    #[error("{count} shares do not form a square")]
    NotSquare {
        /// Number of shares supplied
        count: usize,
    },

    /// Square width is not a power of two
    #[error("Square width {width} is not a power of two")]
    NotPowerOfTwo {
        /// Original width
        width: usize,
    },

    /// Extended width would exceed the field size
    #[error("Square width {width} exceeds maximum {max}")]
    TooWide {
        /// Original width
        width: usize,
        /// Largest supported original width
        max: usize,
    },

    /// Shares differ in length
    #[error("Share {index} has {actual} bytes, expected {expected}")]
    InconsistentShareSize {
        /// Offending share
        index: usize,
        /// Length of the first share
        expected: usize,
        /// Length of the offending share
        actual: usize,
    },

    /// Codeword has the wrong number of positions
    #[error("Expected {expected} symbols, got {actual}")]
    WrongSymbolCount {
        /// Positions required
        expected: usize,
        /// Positions supplied
        actual: usize,
    },

    /// Not enough known symbols to recover the codeword
    #[error("Need {needed} known symbols to reconstruct, have {known}")]
    TooFewSymbols {
        /// Known symbols supplied
        known: usize,
        /// Symbols required
        needed: usize,
    },

    /// Evaluation points collide
    #[error("Evaluation points are not distinct")]
    SingularPoints,
}
