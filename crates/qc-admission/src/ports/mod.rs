//! Ports for transaction admission

use crate::domain::entities::ChainContext;
use crate::domain::errors::StateError;

/// Read side of committed chain state.
pub trait StateStore: Send + Sync {
    /// Chain identifier this store was created for.
    fn chain_id(&self) -> &str;

    /// Height of the last committed block.
    fn last_block_height(&self) -> Result<u64, StateError>;

    /// Open an immutable context for the block at `last_block_height() + 1`.
    fn new_proposal_context(&self) -> Result<ChainContext, StateError>;
}
