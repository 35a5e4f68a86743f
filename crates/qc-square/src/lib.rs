//! # Data Square Builder (qc-square)
//!
//! Packs an ordered list of raw transactions into a k×k grid of 512-byte
//! shares and picks the smallest power-of-two `k` that holds them.
//!
//! ## Layout
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │ TX_NAMESPACE        compact shares (plain tx) │
//! │ PAY_FOR_BLOB_NAMESPACE  compact shares (PFB)  │
//! │ user namespaces     sparse shares, sorted     │
//! │ TAIL_PADDING_NAMESPACE  up to k²              │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! Shares are filled row-major. Blobs are sorted by namespace, stable by
//! arrival, and are not aligned to subtree boundaries.
//!
//! ## Inclusion
//!
//! Transactions are taken greedily in order. One that does not fit next to
//! those already taken is dropped; one that cannot fit even in an empty
//! square of the maximum size is an error.

pub mod builder;
pub mod compact;
pub mod errors;
pub mod sparse;
pub mod square;
pub mod varint;

pub use builder::{build, square_size_for, Builder};
pub use compact::{compact_shares_needed, parse_compact_shares, CompactShareSplitter};
pub use errors::{Result, SquareError};
pub use sparse::{parse_sparse_shares, sparse_shares_needed, tail_padding_share, SparseShareSplitter};
pub use square::DataSquare;

/// Lowest app version with a known share layout.
pub const MIN_SUPPORTED_APP_VERSION: u64 = 1;

/// Highest app version with a known share layout.
pub const MAX_SUPPORTED_APP_VERSION: u64 = 2;

/// Share version used to lay out shares for `app_version`.
pub fn share_version_for(app_version: u64) -> Result<u8> {
    match app_version {
        MIN_SUPPORTED_APP_VERSION..=MAX_SUPPORTED_APP_VERSION => Ok(shared_types::SHARE_VERSION_ZERO),
        version => Err(SquareError::UnsupportedVersion { version }),
    }
}
