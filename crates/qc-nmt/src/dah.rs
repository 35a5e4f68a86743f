//! Data availability header.

use crate::errors::{NmtError, Result};
use crate::merkle::hash_from_byte_slices;
use crate::nmt::{NamespaceMerkleTree, NamespacedHash};
use qc_erasure::ExtendedDataSquare;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use shared_types::{Hash, Namespace, NAMESPACE_SIZE, PARITY_NAMESPACE};
use tracing::trace;

/// Row and column roots of an extended square.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataAvailabilityHeader {
    /// One root per row, top to bottom
    pub row_roots: Vec<NamespacedHash>,
    /// One root per column, left to right
    pub column_roots: Vec<NamespacedHash>,
}

fn leaf_namespace(eds: &ExtendedDataSquare, row: usize, col: usize, share: &[u8]) -> Result<Namespace> {
    if !eds.is_original(row, col) {
        return Ok(PARITY_NAMESPACE);
    }
    let raw: [u8; NAMESPACE_SIZE] = share
        .get(..NAMESPACE_SIZE)
        .and_then(|prefix| prefix.try_into().ok())
        .ok_or(NmtError::ShortLeaf {
            row,
            col,
            len: share.len(),
        })?;
    Ok(Namespace::from_array(raw))
}

fn line_root(
    eds: &ExtendedDataSquare,
    shares: Vec<&[u8]>,
    position: impl Fn(usize) -> (usize, usize),
) -> Result<NamespacedHash> {
    let mut tree = NamespaceMerkleTree::new(true);
    for (i, share) in shares.into_iter().enumerate() {
        let (row, col) = position(i);
        tree.push(leaf_namespace(eds, row, col, share)?, share)?;
    }
    Ok(tree.root())
}

impl DataAvailabilityHeader {
    /// Compute every row and column root of `eds`.
    pub fn from_eds(eds: &ExtendedDataSquare) -> Result<Self> {
        let width = eds.width();
        let row_roots = (0..width)
            .into_par_iter()
            .map(|r| line_root(eds, eds.row(r), |c| (r, c)))
            .collect::<Result<Vec<_>>>()?;
        let column_roots = (0..width)
            .into_par_iter()
            .map(|c| line_root(eds, eds.col(c), |r| (r, c)))
            .collect::<Result<Vec<_>>>()?;
        trace!("[qc-nmt] committed {} row and {} column roots", width, width);

        Ok(Self {
            row_roots,
            column_roots,
        })
    }

    /// Extended width `2k`.
    pub fn width(&self) -> usize {
        self.row_roots.len()
    }

    /// Original width `k`.
    pub fn square_size(&self) -> usize {
        self.row_roots.len() / 2
    }

    /// The data root: RFC 6962 root over row roots then column roots.
    pub fn hash(&self) -> Hash {
        let leaves: Vec<[u8; crate::nmt::NAMESPACED_HASH_SIZE]> = self
            .row_roots
            .iter()
            .chain(&self.column_roots)
            .map(NamespacedHash::to_bytes)
            .collect();
        hash_from_byte_slices(&leaves)
    }
}
