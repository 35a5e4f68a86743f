//! Error types for square construction

use shared_types::ShareError;
use thiserror::Error;

/// Result type alias for square construction
pub type Result<T> = std::result::Result<T, SquareError>;

/// Errors raised while building or parsing a data square.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SquareError {
    /// Maximum square size is zero, not a power of two, or above the upper bound
    #[error("Invalid max square size {size}: must be a power of two in [1, {upper}]")]
    InvalidMaxSize {
        /// Requested maximum width
        size: u64,
        /// Hard upper bound
        upper: usize,
    },

    /// No share layout is defined for this app version
    #[error("Unsupported app version {version}")]
    UnsupportedVersion {
        /// Requested app version
        version: u64,
    },

    /// A single transaction needs more shares than the largest square holds
    #[error("Transaction {index} needs {shares} shares, square holds at most {capacity}")]
    TxTooLarge {
        /// Position in the input list
        index: usize,
        /// Shares the transaction needs on its own
        shares: usize,
        /// Shares available in a square of the maximum size
        capacity: usize,
    },

    /// Sequence length does not fit the 4-byte length field
    #[error("Sequence of {len} bytes exceeds the length field")]
    SequenceTooLong {
        /// Sequence length in bytes
        len: usize,
    },

    /// Share version does not fit the info byte
    #[error("Share version {version} cannot be encoded")]
    ShareVersion {
        /// Offending version
        version: u8,
    },

    /// Share count is not a perfect square
    #[error("{count} shares do not form a square")]
    NotSquare {
        /// Number of shares
        count: usize,
    },

    /// Share bytes are malformed
    #[error("Share error: {0}")]
    Share(#[from] ShareError),

    /// Shares do not parse back into units
    #[error("Malformed shares: {0}")]
    MalformedShares(String),
}
