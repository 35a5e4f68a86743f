//! Inbound ports (driving side - API)

use crate::domain::{PrepareProposalRequest, PrepareProposalResponse};
use crate::error::Result;

/// Port: build a block proposal for the consensus engine
pub trait ProposalPreparer: Send + Sync {
    /// Filter candidates, build the square and commit to it.
    ///
    /// Every error is fatal: the caller must not answer consensus with a
    /// partial or empty proposal in its place.
    fn prepare_proposal(&self, request: PrepareProposalRequest) -> Result<PrepareProposalResponse>;
}
