//! Domain entities for proposal assembly

use qc_admission::Rejection;
use qc_nmt::DataAvailabilityHeader;
use serde::{Deserialize, Serialize};
use shared_types::{Hash, RawTx};

/// Request from the consensus engine to build the block at `height`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrepareProposalRequest {
    /// Candidate transactions in the engine's order
    pub txs: Vec<RawTx>,
    /// Height of the block being proposed
    pub height: u64,
}

/// Reply to the consensus engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrepareProposalResponse {
    /// Transactions to include, in order
    pub txs: Vec<RawTx>,
    /// Original square width
    pub square_size: u64,
    /// Data root
    pub data_hash: Hash,
}

/// Outcome of the assembly pipeline before packaging.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProposalResult {
    /// Transactions placed in the square, in candidate order
    pub included_txs: Vec<RawTx>,
    /// Original square width
    pub square_size: u64,
    /// Data root
    pub data_root: Hash,
    /// Row and column roots behind `data_root`
    pub dah: DataAvailabilityHeader,
}

/// Validity filter output.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Admitted candidates, in original order
    pub valid: Vec<RawTx>,
    /// `(candidate index, reason)` for every rejected candidate
    pub rejected: Vec<(usize, Rejection)>,
}

impl FilterOutcome {
    /// Candidates seen.
    pub fn total(&self) -> usize {
        self.valid.len() + self.rejected.len()
    }
}
