//! # Shared Types Crate
//!
//! Primitives shared by every stage of the proposal pipeline.
//!
//! ## Share Format (version 0)
//!
//! ```text
//! ┌──────────────┬──────┬──────────────────┬──────────────────┬──────────────┐
//! │ namespace 29 │ info │ sequence len 4 * │ reserved 4 **    │ data …       │
//! └──────────────┴──────┴──────────────────┴──────────────────┴──────────────┘
//!   *  only present in the first share of a sequence
//!   ** only present in compact (transaction) shares
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: share sizes and reserved namespaces live here,
//!   the square builder, erasure coder and commitment all read them from here.
//! - **Immutability**: every type is a value; nothing exposes interior mutation.

pub mod blob;
pub mod entities;
pub mod errors;
pub mod namespace;
pub mod share;

pub use blob::{Blob, BlobTx, BLOB_TX_MAGIC};
pub use entities::*;
pub use errors::*;
pub use namespace::*;
pub use share::{InfoByte, Share};

/// Size of a single share in bytes.
pub const SHARE_SIZE: usize = 512;

/// Size of the namespace version prefix.
pub const NAMESPACE_VERSION_SIZE: usize = 1;

/// Size of the namespace identifier.
pub const NAMESPACE_ID_SIZE: usize = 28;

/// Total namespace size (version + id).
pub const NAMESPACE_SIZE: usize = NAMESPACE_VERSION_SIZE + NAMESPACE_ID_SIZE;

/// Size of the info byte (share version + sequence start flag).
pub const SHARE_INFO_BYTES: usize = 1;

/// Size of the sequence length field carried by the first share of a sequence.
pub const SEQUENCE_LEN_BYTES: usize = 4;

/// Size of the reserved offset field carried by compact shares.
pub const COMPACT_SHARE_RESERVED_BYTES: usize = 4;

/// Payload capacity of the first compact share in a sequence.
pub const FIRST_COMPACT_SHARE_CONTENT_SIZE: usize = SHARE_SIZE
    - NAMESPACE_SIZE
    - SHARE_INFO_BYTES
    - SEQUENCE_LEN_BYTES
    - COMPACT_SHARE_RESERVED_BYTES;

/// Payload capacity of every following compact share.
pub const CONTINUATION_COMPACT_SHARE_CONTENT_SIZE: usize =
    SHARE_SIZE - NAMESPACE_SIZE - SHARE_INFO_BYTES - COMPACT_SHARE_RESERVED_BYTES;

/// Payload capacity of the first sparse (blob) share in a sequence.
pub const FIRST_SPARSE_SHARE_CONTENT_SIZE: usize =
    SHARE_SIZE - NAMESPACE_SIZE - SHARE_INFO_BYTES - SEQUENCE_LEN_BYTES;

/// Payload capacity of every following sparse share.
pub const CONTINUATION_SPARSE_SHARE_CONTENT_SIZE: usize =
    SHARE_SIZE - NAMESPACE_SIZE - SHARE_INFO_BYTES;

/// The only share version currently understood.
pub const SHARE_VERSION_ZERO: u8 = 0;

/// Smallest square width a block can have.
pub const MIN_SQUARE_SIZE: usize = 1;

/// Governance default for the maximum square width.
pub const DEFAULT_GOV_MAX_SQUARE_SIZE: usize = 64;

/// Hard upper bound on the square width.
///
/// The erasure coder works over GF(2^8), so an extended row (2k symbols)
/// must fit in 256 evaluation points.
pub const MAX_SQUARE_SIZE_UPPER_BOUND: usize = 128;
