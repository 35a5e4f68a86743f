//! Square, erasure and commitment adapters

use crate::ports::outbound::{CommitmentBuilder, ErasureCoder, SquareBuilder};
use qc_erasure::{ErasureError, ExtendedDataSquare, Extender};
use qc_nmt::{DataAvailabilityHeader, NmtError};
use qc_square::{DataSquare, SquareError};
use shared_types::RawTx;

/// Greedy order-preserving builder from `qc-square`.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedySquareBuilder;

impl SquareBuilder for GreedySquareBuilder {
    fn build(
        &self,
        txs: &[RawTx],
        app_version: u64,
        max_square_size: u64,
    ) -> Result<(DataSquare, Vec<RawTx>), SquareError> {
        qc_square::build(txs, app_version, max_square_size)
    }
}

/// Reed-Solomon coder from `qc-erasure`.
#[derive(Clone, Copy, Debug, Default)]
pub struct RsErasureCoder {
    extender: Extender,
}

impl RsErasureCoder {
    /// Coder that extends lines on the rayon pool when `parallel` is set.
    pub fn new(parallel: bool) -> Self {
        Self {
            extender: Extender::new(parallel),
        }
    }
}

impl ErasureCoder for RsErasureCoder {
    fn extend(&self, shares: &[Vec<u8>]) -> Result<ExtendedDataSquare, ErasureError> {
        self.extender.extend(shares)
    }
}

/// Namespaced Merkle commitment from `qc-nmt`.
#[derive(Clone, Copy, Debug, Default)]
pub struct NmtCommitmentBuilder;

impl CommitmentBuilder for NmtCommitmentBuilder {
    fn commit(&self, eds: &ExtendedDataSquare) -> Result<DataAvailabilityHeader, NmtError> {
        DataAvailabilityHeader::from_eds(eds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_adapters_compose() {
        let (square, included) = GreedySquareBuilder.build(&[vec![1u8; 50]], 1, 64).unwrap();
        assert_eq!(included.len(), 1);

        let eds = RsErasureCoder::new(false).extend(&square.to_bytes()).unwrap();
        assert_eq!(eds.width(), 2 * square.width());

        let dah = NmtCommitmentBuilder.commit(&eds).unwrap();
        assert_eq!(dah.square_size(), square.width());
        assert_eq!(dah.width(), eds.width());
    }
}
