//! # Erasure Coding (qc-erasure)
//!
//! Extends a k×k data square to 2k×2k with a systematic Reed-Solomon code
//! over GF(2^8), so that any k of the 2k shares in a row or column suffice
//! to recover it.
//!
//! ## Modules
//!
//! - `gf256`: field arithmetic with compile-time log/exp tables
//! - `codec`: [`ReedSolomon`], encode and [`ReedSolomon::reconstruct_symbols`]
//! - `extend`: [`Extender`], quadrant-by-quadrant extension
//! - `eds`: [`ExtendedDataSquare`]
//!
//! The field has 256 elements, so the original width is capped at 128.

pub mod codec;
pub mod eds;
pub mod errors;
pub mod extend;
pub mod gf256;

pub use codec::ReedSolomon;
pub use eds::ExtendedDataSquare;
pub use errors::{ErasureError, Result};
pub use extend::{extend_shares, Extender};
pub use gf256::Gf256;
