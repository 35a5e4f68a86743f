//! Greedy, order-preserving square builder.

use crate::compact::{compact_shares_needed, unit_len, CompactShareSplitter};
use crate::errors::{Result, SquareError};
use crate::sparse::{sparse_shares_needed, tail_padding_share, SparseShareSplitter};
use crate::square::DataSquare;
use crate::share_version_for;
use shared_types::{Blob, BlobTx, MAX_SQUARE_SIZE_UPPER_BOUND, MIN_SQUARE_SIZE, PAY_FOR_BLOB_NAMESPACE, TX_NAMESPACE};
use tracing::debug;

/// Smallest power-of-two width whose square holds `share_count` shares.
pub fn square_size_for(share_count: usize) -> usize {
    let mut width = MIN_SQUARE_SIZE;
    while width * width < share_count {
        width *= 2;
    }
    width
}

/// Incremental square builder bounded by a maximum width.
#[derive(Debug)]
pub struct Builder {
    max_square_size: usize,
    tx_splitter: CompactShareSplitter,
    pfb_splitter: CompactShareSplitter,
    blobs: Vec<Blob>,
    blob_shares: usize,
    included: Vec<Vec<u8>>,
}

impl Builder {
    /// Builder for `app_version` bounded by `max_square_size`.
    pub fn new(app_version: u64, max_square_size: u64) -> Result<Self> {
        let share_version = share_version_for(app_version)?;
        if max_square_size == 0
            || !max_square_size.is_power_of_two()
            || max_square_size > MAX_SQUARE_SIZE_UPPER_BOUND as u64
        {
            return Err(SquareError::InvalidMaxSize {
                size: max_square_size,
                upper: MAX_SQUARE_SIZE_UPPER_BOUND,
            });
        }

        Ok(Self {
            max_square_size: max_square_size as usize,
            tx_splitter: CompactShareSplitter::new(TX_NAMESPACE, share_version),
            pfb_splitter: CompactShareSplitter::new(PAY_FOR_BLOB_NAMESPACE, share_version),
            blobs: Vec::new(),
            blob_shares: 0,
            included: Vec::new(),
        })
    }

    /// Shares available in a square of the maximum width.
    pub fn capacity(&self) -> usize {
        self.max_square_size * self.max_square_size
    }

    /// Shares the accepted transactions occupy, excluding padding.
    pub fn share_count(&self) -> usize {
        self.tx_splitter.share_count() + self.pfb_splitter.share_count() + self.blob_shares
    }

    /// Try to add the transaction at input position `index`.
    ///
    /// Returns `Ok(false)` when it does not fit next to the transactions
    /// already accepted.
    pub fn append(&mut self, index: usize, raw: &[u8]) -> Result<bool> {
        match BlobTx::decode(raw) {
            Some(envelope) if !envelope.blobs.is_empty() => {
                let blob_shares: usize = envelope
                    .blobs
                    .iter()
                    .map(|b| sparse_shares_needed(b.data.len()))
                    .sum();
                let pfb_len = self.pfb_splitter.sequence_len() + unit_len(&envelope.tx);
                let needed = self.tx_splitter.share_count()
                    + compact_shares_needed(pfb_len)
                    + self.blob_shares
                    + blob_shares;
                let alone = compact_shares_needed(unit_len(&envelope.tx)) + blob_shares;

                if !self.fits(index, needed, alone)? {
                    return Ok(false);
                }
                self.pfb_splitter.write_unit(&envelope.tx);
                self.blob_shares += blob_shares;
                self.blobs.extend(envelope.blobs);
            }
            _ => {
                let tx_len = self.tx_splitter.sequence_len() + unit_len(raw);
                let needed = compact_shares_needed(tx_len)
                    + self.pfb_splitter.share_count()
                    + self.blob_shares;
                let alone = compact_shares_needed(unit_len(raw));

                if !self.fits(index, needed, alone)? {
                    return Ok(false);
                }
                self.tx_splitter.write_unit(raw);
            }
        }

        self.included.push(raw.to_vec());
        Ok(true)
    }

    fn fits(&self, index: usize, needed: usize, alone: usize) -> Result<bool> {
        let capacity = self.capacity();
        if alone > capacity {
            return Err(SquareError::TxTooLarge {
                index,
                shares: alone,
                capacity,
            });
        }
        if needed > capacity {
            debug!(
                "[qc-square] dropping tx {}: needs {} shares, capacity {}",
                index, needed, capacity
            );
            return Ok(false);
        }
        Ok(true)
    }

    /// Lay out the accepted transactions and return the square with the
    /// included transactions in input order.
    pub fn export(self) -> Result<(DataSquare, Vec<Vec<u8>>)> {
        let mut shares = self.tx_splitter.export()?;
        shares.extend(self.pfb_splitter.export()?);

        let mut blobs = self.blobs;
        blobs.sort_by_key(|b| b.namespace);
        let mut sparse = SparseShareSplitter::new();
        for blob in &blobs {
            sparse.write(blob)?;
        }
        shares.extend(sparse.export());

        let width = square_size_for(shares.len());
        shares.resize(width * width, tail_padding_share()?);

        Ok((DataSquare::new(shares)?, self.included))
    }
}

/// Build a square from `txs`, keeping as many as fit in order.
pub fn build(
    txs: &[Vec<u8>],
    app_version: u64,
    max_square_size: u64,
) -> Result<(DataSquare, Vec<Vec<u8>>)> {
    let mut builder = Builder::new(app_version, max_square_size)?;
    for (index, raw) in txs.iter().enumerate() {
        builder.append(index, raw)?;
    }
    builder.export()
}
