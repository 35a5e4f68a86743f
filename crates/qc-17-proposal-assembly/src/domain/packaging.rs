//! Response packaging

use super::entities::{PrepareProposalResponse, ProposalResult};
use shared_types::RawTx;

/// Total byte size of `txs`.
pub fn total_bytes(txs: &[RawTx]) -> usize {
    txs.iter().map(Vec::len).sum()
}

/// Shape a pipeline result into the consensus reply.
pub fn package_response(result: ProposalResult) -> PrepareProposalResponse {
    PrepareProposalResponse {
        txs: result.included_txs,
        square_size: result.square_size,
        data_hash: result.data_root,
    }
}
