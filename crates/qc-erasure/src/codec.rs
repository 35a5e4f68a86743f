//! # Systematic Reed-Solomon codec
//!
//! A codeword of `k` data symbols is the evaluation of the unique polynomial
//! of degree < k through `(0, d0) .. (k-1, d(k-1))`; the `k` parity symbols
//! are its values at `k .. 2k-1`. A symbol is a whole share, coded byte by
//! byte with the same coefficients.

use crate::errors::{ErasureError, Result};
use crate::gf256::{mul_add_slice, Gf256};
use shared_types::MAX_SQUARE_SIZE_UPPER_BOUND;

/// Lagrange basis values `L_i(x)` for the given distinct points.
fn lagrange_coefficients(points: &[Gf256], x: Gf256) -> Option<Vec<Gf256>> {
    points
        .iter()
        .enumerate()
        .map(|(i, &xi)| {
            let mut num = Gf256::ONE;
            let mut den = Gf256::ONE;
            for (m, &xm) in points.iter().enumerate() {
                if m != i {
                    num = num * (x - xm);
                    den = den * (xi - xm);
                }
            }
            num / den
        })
        .collect()
}

fn point(index: usize) -> Gf256 {
    Gf256::new(index as u8)
}

fn uniform_len<S: AsRef<[u8]>>(symbols: &[S]) -> Result<usize> {
    let expected = symbols.first().map(|s| s.as_ref().len()).unwrap_or(0);
    for (index, symbol) in symbols.iter().enumerate() {
        let actual = symbol.as_ref().len();
        if actual != expected {
            return Err(ErasureError::InconsistentShareSize {
                index,
                expected,
                actual,
            });
        }
    }
    Ok(expected)
}

/// Rate-1/2 codec for `k` data symbols.
#[derive(Clone, Debug)]
pub struct ReedSolomon {
    data_shards: usize,
    /// `parity_matrix[j][i] = L_i(k + j)` over points `0..k`
    parity_matrix: Vec<Vec<Gf256>>,
}

impl ReedSolomon {
    /// Codec for `data_shards` data symbols, `1..=128`.
    pub fn new(data_shards: usize) -> Result<Self> {
        if data_shards == 0 {
            return Err(ErasureError::Empty);
        }
        if data_shards > MAX_SQUARE_SIZE_UPPER_BOUND {
            return Err(ErasureError::TooWide {
                width: data_shards,
                max: MAX_SQUARE_SIZE_UPPER_BOUND,
            });
        }

        let points: Vec<Gf256> = (0..data_shards).map(point).collect();
        let parity_matrix = (data_shards..2 * data_shards)
            .map(|x| lagrange_coefficients(&points, point(x)))
            .collect::<Option<Vec<_>>>()
            .ok_or(ErasureError::SingularPoints)?;

        Ok(Self {
            data_shards,
            parity_matrix,
        })
    }

    /// Number of data symbols `k`.
    pub fn data_shards(&self) -> usize {
        self.data_shards
    }

    /// Codeword length `2k`.
    pub fn total_shards(&self) -> usize {
        2 * self.data_shards
    }

    /// Compute the `k` parity symbols for `data`.
    pub fn encode<S: AsRef<[u8]>>(&self, data: &[S]) -> Result<Vec<Vec<u8>>> {
        if data.len() != self.data_shards {
            return Err(ErasureError::WrongSymbolCount {
                expected: self.data_shards,
                actual: data.len(),
            });
        }
        let len = uniform_len(data)?;

        Ok(self
            .parity_matrix
            .iter()
            .map(|coeffs| {
                let mut parity = vec![0u8; len];
                for (symbol, coeff) in data.iter().zip(coeffs) {
                    mul_add_slice(&mut parity, symbol.as_ref(), *coeff);
                }
                parity
            })
            .collect())
    }

    /// Recover all `2k` symbols from any `k` known ones.
    ///
    /// `codeword[i]` is `None` where the symbol is missing. Known symbols are
    /// returned unchanged.
    pub fn reconstruct_symbols(&self, codeword: &[Option<Vec<u8>>]) -> Result<Vec<Vec<u8>>> {
        if codeword.len() != self.total_shards() {
            return Err(ErasureError::WrongSymbolCount {
                expected: self.total_shards(),
                actual: codeword.len(),
            });
        }

        let known: Vec<(usize, &Vec<u8>)> = codeword
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|s| (i, s)))
            .take(self.data_shards)
            .collect();
        if known.len() < self.data_shards {
            return Err(ErasureError::TooFewSymbols {
                known: known.len(),
                needed: self.data_shards,
            });
        }
        let symbols: Vec<&Vec<u8>> = known.iter().map(|(_, s)| *s).collect();
        let len = uniform_len(&symbols)?;
        let points: Vec<Gf256> = known.iter().map(|(i, _)| point(*i)).collect();

        codeword
            .iter()
            .enumerate()
            .map(|(position, symbol)| match symbol {
                Some(s) => Ok(s.clone()),
                None => {
                    let coeffs = lagrange_coefficients(&points, point(position))
                        .ok_or(ErasureError::SingularPoints)?;
                    let mut out = vec![0u8; len];
                    for (s, coeff) in symbols.iter().zip(coeffs) {
                        mul_add_slice(&mut out, s, coeff);
                    }
                    Ok(out)
                }
            })
            .collect()
    }
}
