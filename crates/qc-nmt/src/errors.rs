//! Error types for namespaced Merkle trees

use shared_types::Namespace;
use thiserror::Error;

/// Result type alias for commitment construction
pub type Result<T> = std::result::Result<T, NmtError>;

/// Errors raised while building namespaced Merkle trees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NmtError {
    /// Leaves must be pushed in non-decreasing namespace order
    #[error("Leaf namespace {next} is lower than previous leaf {previous}")]
    UnorderedNamespace {
        /// Namespace of the last pushed leaf
        previous: Namespace,
        /// Namespace of the rejected leaf
        next: Namespace,
    },

    /// Share is shorter than a namespace
    #[error("Share at ({row}, {col}) has {len} bytes, shorter than a namespace")]
    ShortLeaf {
        /// Row of the share
        row: usize,
        /// Column of the share
        col: usize,
        /// Length of the share
        len: usize,
    },
}
