//! Two-dimensional extension of a data square.

use crate::codec::ReedSolomon;
use crate::eds::ExtendedDataSquare;
use crate::errors::{ErasureError, Result};
use rayon::prelude::*;
use shared_types::MAX_SQUARE_SIZE_UPPER_BOUND;
use tracing::debug;

/// Square extender. Rows and columns are independent, so they may be coded
/// on the rayon pool; output does not depend on `parallel`.
#[derive(Clone, Copy, Debug)]
pub struct Extender {
    parallel: bool,
}

impl Default for Extender {
    fn default() -> Self {
        Self { parallel: true }
    }
}

impl Extender {
    /// Extender that codes lines on the rayon pool when `parallel` is set.
    pub fn new(parallel: bool) -> Self {
        Self { parallel }
    }

    fn map_lines<F>(&self, count: usize, f: F) -> Result<Vec<Vec<Vec<u8>>>>
    where
        F: Fn(usize) -> Result<Vec<Vec<u8>>> + Send + Sync,
    {
        if self.parallel {
            (0..count).into_par_iter().map(f).collect()
        } else {
            (0..count).map(f).collect()
        }
    }

    /// Extend k×k row-major `shares` into a 2k×2k square.
    pub fn extend<S: AsRef<[u8]> + Sync>(&self, shares: &[S]) -> Result<ExtendedDataSquare> {
        let k = validate(shares)?;
        let share_size = shares[0].as_ref().len();
        let codec = ReedSolomon::new(k)?;
        let at = |r: usize, c: usize| shares[r * k + c].as_ref();

        // Q1[r] = parity of original row r
        let q1 = self.map_lines(k, |r| {
            let row: Vec<&[u8]> = (0..k).map(|c| at(r, c)).collect();
            codec.encode(&row)
        })?;
        // q2[c][j] = parity j of original column c
        let q2 = self.map_lines(k, |c| {
            let col: Vec<&[u8]> = (0..k).map(|r| at(r, c)).collect();
            codec.encode(&col)
        })?;
        // Q3[j] = parity of row k + j
        let q3 = self.map_lines(k, |j| {
            let row: Vec<&[u8]> = (0..k).map(|c| q2[c][j].as_slice()).collect();
            codec.encode(&row)
        })?;

        let width = 2 * k;
        let mut cells = Vec::with_capacity(width * width);
        for (r, parity) in q1.into_iter().enumerate() {
            cells.extend((0..k).map(|c| at(r, c).to_vec()));
            cells.extend(parity);
        }
        for (j, parity) in q3.into_iter().enumerate() {
            cells.extend((0..k).map(|c| q2[c][j].clone()));
            cells.extend(parity);
        }

        debug!(
            "[qc-erasure] extended {}x{} square to {}x{} ({} byte shares)",
            k, k, width, width, share_size
        );
        Ok(ExtendedDataSquare::from_cells(k, share_size, cells))
    }
}

/// Extend on the rayon pool.
pub fn extend_shares<S: AsRef<[u8]> + Sync>(shares: &[S]) -> Result<ExtendedDataSquare> {
    Extender::default().extend(shares)
}

fn validate<S: AsRef<[u8]>>(shares: &[S]) -> Result<usize> {
    let count = shares.len();
    if count == 0 {
        return Err(ErasureError::Empty);
    }
    let width = (count as f64).sqrt().round() as usize;
    if width * width != count {
        return Err(ErasureError::NotSquare { count });
    }
    if !width.is_power_of_two() {
        return Err(ErasureError::NotPowerOfTwo { width });
    }
    if width > MAX_SQUARE_SIZE_UPPER_BOUND {
        return Err(ErasureError::TooWide {
            width,
            max: MAX_SQUARE_SIZE_UPPER_BOUND,
        });
    }

    let expected = shares[0].as_ref().len();
    for (index, share) in shares.iter().enumerate() {
        let actual = share.as_ref().len();
        if actual != expected {
            return Err(ErasureError::InconsistentShareSize {
                index,
                expected,
                actual,
            });
        }
    }
    Ok(width)
}
