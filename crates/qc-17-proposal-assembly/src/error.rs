//! Error types for proposal assembly
//!
//! Rejected transactions are not errors: they are dropped by the validity
//! filter. Everything in [`AssemblyError`] aborts the proposal and is fatal.

use qc_admission::StateError;
use qc_erasure::ErasureError;
use qc_nmt::NmtError;
use qc_square::SquareError;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result type alias for proposal assembly
pub type Result<T> = std::result::Result<T, AssemblyError>;

/// Pipeline stage, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Stage {
    /// Branching committed state for the proposed height
    ContextAcquisition,
    /// Re-checking candidates against the branch
    Filtering,
    /// Packing transactions into the data square
    SquareConstruction,
    /// Extending the square
    ErasureCoding,
    /// Computing row/column roots and the data root
    Commitment,
}

impl Stage {
    /// Number of stages.
    pub const COUNT: usize = 5;

    /// All stages in execution order.
    pub const ALL: [Stage; Stage::COUNT] = [
        Stage::ContextAcquisition,
        Stage::Filtering,
        Stage::SquareConstruction,
        Stage::ErasureCoding,
        Stage::Commitment,
    ];

    /// Position in [`Stage::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Stable snake_case name for logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::ContextAcquisition => "context_acquisition",
            Stage::Filtering => "filtering",
            Stage::SquareConstruction => "square_construction",
            Stage::ErasureCoding => "erasure_coding",
            Stage::Commitment => "commitment",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fatal failure while assembling a proposal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblyError {
    /// Committed state could not be branched
    #[error("Failed to acquire proposal context: {0}")]
    ContextAcquisition(#[from] StateError),

    /// Requested height is not the one after the committed tip
    #[error("Requested height {requested} but next block height is {expected}")]
    HeightMismatch {
        /// `last committed height + 1`
        expected: u64,
        /// Height carried in the request
        requested: u64,
    },

    /// Square builder rejected the transaction set
    #[error("Square construction failed: {0}")]
    SquareConstruction(#[from] SquareError),

    /// Square builder output broke a post-condition
    #[error("Square builder invariant violated: {reason}")]
    InvariantViolation {
        /// Which post-condition failed
        reason: String,
    },

    /// The data square could not be extended
    #[error("Failed to erasure code square of size {square_size} ({share_count} shares) at height {height}: {source}")]
    ErasureCoding {
        /// Underlying coder error
        source: ErasureError,
        /// Proposed height
        height: u64,
        /// Original square width
        square_size: u64,
        /// Shares handed to the coder
        share_count: usize,
    },

    /// Commitment could not be computed over the extended square
    #[error("Commitment failed: {0}")]
    Commitment(#[from] NmtError),
}

impl AssemblyError {
    /// Stage that failed.
    pub fn stage(&self) -> Stage {
        match self {
            Self::ContextAcquisition(_) | Self::HeightMismatch { .. } => Stage::ContextAcquisition,
            Self::SquareConstruction(_) | Self::InvariantViolation { .. } => {
                Stage::SquareConstruction
            }
            Self::ErasureCoding { .. } => Stage::ErasureCoding,
            Self::Commitment(_) => Stage::Commitment,
        }
    }

    /// Every assembly error halts the node.
    pub fn is_fatal(&self) -> bool {
        true
    }

    /// Never retried: the same inputs fail the same way.
    pub fn is_recoverable(&self) -> bool {
        false
    }
}
