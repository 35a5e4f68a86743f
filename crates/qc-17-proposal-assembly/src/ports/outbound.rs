//! Outbound ports (driven side - SPI)

use qc_admission::{ChainContext, Rejection, StateError};
use qc_erasure::{ErasureError, ExtendedDataSquare};
use qc_nmt::{DataAvailabilityHeader, NmtError};
use qc_square::{DataSquare, SquareError};
use shared_types::RawTx;

/// Port: branch committed state for the next proposal
pub trait ContextProvider: Send + Sync {
    /// Read-only context for `last committed height + 1`.
    fn proposal_context(&self) -> Result<ChainContext, StateError>;
}

/// Port: per-transaction admission
pub trait TxAdmission: Send + Sync {
    /// Admit `raw` against an isolated branch of `ctx`.
    fn admit(&self, ctx: &ChainContext, raw: &[u8]) -> Result<(), Rejection>;
}

/// Port: pack transactions into a data square
pub trait SquareBuilder: Send + Sync {
    /// Square plus the order-preserving subset of `txs` it holds.
    fn build(
        &self,
        txs: &[RawTx],
        app_version: u64,
        max_square_size: u64,
    ) -> Result<(DataSquare, Vec<RawTx>), SquareError>;
}

/// Port: extend a k×k square to 2k×2k
pub trait ErasureCoder: Send + Sync {
    /// Extend row-major `shares`.
    fn extend(&self, shares: &[Vec<u8>]) -> Result<ExtendedDataSquare, ErasureError>;
}

/// Port: commit to an extended square
pub trait CommitmentBuilder: Send + Sync {
    /// Row and column roots. Never fails on a square the coder produced.
    fn commit(&self, eds: &ExtendedDataSquare) -> Result<DataAvailabilityHeader, NmtError>;
}
