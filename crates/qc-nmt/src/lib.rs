//! # Namespaced Merkle Commitment (qc-nmt)
//!
//! Commits to an extended data square:
//!
//! 1. one namespaced Merkle root per row and per column
//!    ([`DataAvailabilityHeader::from_eds`])
//! 2. a single data root over all of them ([`DataAvailabilityHeader::hash`])
//!
//! Shares outside the original quadrant are committed under
//! `PARITY_NAMESPACE`.

pub mod dah;
pub mod errors;
pub mod merkle;
pub mod nmt;

pub use dah::DataAvailabilityHeader;
pub use errors::{NmtError, Result};
pub use merkle::hash_from_byte_slices;
pub use nmt::{NamespaceMerkleTree, NamespacedHash, NAMESPACED_HASH_SIZE};
