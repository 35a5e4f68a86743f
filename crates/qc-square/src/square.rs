//! The original k×k data square.

use crate::errors::{Result, SquareError};
use shared_types::{Namespace, Share};

/// A k×k grid of shares in row-major order. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataSquare {
    width: usize,
    shares: Vec<Share>,
}

impl DataSquare {
    /// Wrap row-major shares. The count must be a non-zero perfect square.
    pub fn new(shares: Vec<Share>) -> Result<Self> {
        let count = shares.len();
        let width = (count as f64).sqrt().round() as usize;
        if count == 0 || width * width != count {
            return Err(SquareError::NotSquare { count });
        }
        Ok(Self { width, shares })
    }

    /// Width `k`.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Width as reported to consensus.
    pub fn size(&self) -> u64 {
        self.width as u64
    }

    /// All shares, row-major.
    pub fn shares(&self) -> &[Share] {
        &self.shares
    }

    /// Share at `(row, col)`.
    pub fn share(&self, row: usize, col: usize) -> Option<&Share> {
        if row >= self.width || col >= self.width {
            return None;
        }
        self.shares.get(row * self.width + col)
    }

    /// Row `index`.
    pub fn row(&self, index: usize) -> Option<&[Share]> {
        let start = index.checked_mul(self.width)?;
        self.shares.get(start..start + self.width)
    }

    /// Contiguous run of shares in `namespace`.
    pub fn namespace_range(&self, namespace: Namespace) -> &[Share] {
        let start = self.shares.partition_point(|s| s.namespace() < namespace);
        let end = self.shares.partition_point(|s| s.namespace() <= namespace);
        &self.shares[start..end]
    }

    /// Flattened share bytes, row-major.
    pub fn to_bytes(&self) -> Vec<Vec<u8>> {
        self.shares.iter().map(|s| s.as_bytes().to_vec()).collect()
    }
}
