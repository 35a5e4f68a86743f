//! # Error Types
//!
//! Errors raised while constructing shared primitives.

use thiserror::Error;

/// Errors raised when building or parsing a namespace.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamespaceError {
    /// Raw namespace bytes have the wrong length.
    #[error("Invalid namespace length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Version 0 sub-identifiers are at most 10 bytes.
    #[error("Namespace sub-identifier too long: {len} bytes (max 10)")]
    SubIdTooLong { len: usize },

    /// Only namespace version 0 is accepted for user data.
    #[error("Unsupported namespace version {0}")]
    UnsupportedVersion(u8),

    /// Version 0 identifiers must start with 18 zero bytes.
    #[error("Namespace id does not have the required zero prefix")]
    MissingZeroPrefix,

    /// The namespace is reserved by the protocol.
    #[error("Namespace {0} is reserved")]
    Reserved(String),
}

/// Errors raised when wrapping bytes into a share.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareError {
    /// Share bytes have the wrong length.
    #[error("Invalid share size: expected {expected}, got {actual}")]
    InvalidSize { expected: usize, actual: usize },
}
