//! Error types for admission

use shared_types::NamespaceError;
use thiserror::Error;

/// Failures while opening a branch of committed state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// No genesis or block has been committed yet
    #[error("State store is uninitialized: no committed height")]
    Uninitialized,

    /// The store lock was poisoned by a panicking writer
    #[error("State store lock poisoned")]
    LockPoisoned,
}

/// Failures while encoding or decoding transactions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Bytes are not a valid transaction
    #[error("Malformed transaction: {0}")]
    Malformed(String),

    /// Blob envelope prefix is present but the body does not decode
    #[error("Malformed blob transaction envelope")]
    MalformedEnvelope,

    /// Serialization failed
    #[error("Encoding failed: {0}")]
    Encode(String),
}

/// Reason a candidate transaction was not admitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// Transaction bytes could not be decoded
    #[error("Decode failed: {0}")]
    Decode(#[from] DecodeError),

    /// Transaction carries no messages
    #[error("Transaction has no messages")]
    NoMessages,

    /// Gas limit of zero
    #[error("Transaction has zero gas limit")]
    ZeroGasLimit,

    /// Memo exceeds the allowed length
    #[error("Memo too long: {len} bytes")]
    MemoTooLong {
        /// Memo length
        len: usize,
    },

    /// Transaction was signed for another chain
    #[error("Wrong chain id: expected {expected}, got {actual}")]
    WrongChainId {
        /// Chain id of the context
        expected: String,
        /// Chain id in the transaction
        actual: String,
    },

    /// `gas_limit * min_gas_price` overflowed
    #[error("Fee computation overflowed")]
    FeeOverflow,

    /// Fee below `gas_limit * min_gas_price`
    #[error("Insufficient fee: required {required}, provided {provided}")]
    InsufficientFee {
        /// Minimum fee
        required: u64,
        /// Declared fee
        provided: u64,
    },

    /// Public key bytes are not a valid Ed25519 point
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Signature does not verify over the sign bytes
    #[error("Invalid signature")]
    InvalidSignature,

    /// Signer has no committed account
    #[error("Unknown account {address}")]
    UnknownAccount {
        /// Hex-encoded address
        address: String,
    },

    /// Signing key is not the account's registered key
    #[error("Public key does not match account")]
    PublicKeyMismatch,

    /// Sequence (nonce) differs from the account's next sequence
    #[error("Sequence mismatch: expected {expected}, got {actual}")]
    SequenceMismatch {
        /// Account sequence
        expected: u64,
        /// Transaction sequence
        actual: u64,
    },

    /// Balance cannot cover fee or transfers
    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds {
        /// Amount required
        required: u64,
        /// Balance available
        available: u64,
    },

    /// Blob envelope without a pay-for-blobs message
    #[error("Blob transaction must contain exactly one PayForBlobs message, found {found}")]
    PayForBlobsCount {
        /// Number of PayForBlobs messages found
        found: usize,
    },

    /// Plain transaction declaring blobs it does not carry
    #[error("PayForBlobs message in a transaction without blobs")]
    UnexpectedPayForBlobs,

    /// Declared blob count differs from carried blobs
    #[error("Blob count mismatch: declared {declared}, carried {actual}")]
    BlobCountMismatch {
        /// Declared in the message
        declared: usize,
        /// Carried in the envelope
        actual: usize,
    },

    /// Declared blob size differs from the carried blob
    #[error("Blob {index} size mismatch: declared {declared}, actual {actual}")]
    BlobSizeMismatch {
        /// Blob index
        index: usize,
        /// Declared size
        declared: u32,
        /// Actual size
        actual: usize,
    },

    /// Declared namespace differs from the carried blob
    #[error("Blob {index} namespace mismatch")]
    BlobNamespaceMismatch {
        /// Blob index
        index: usize,
    },

    /// Declared commitment differs from the carried blob
    #[error("Blob {index} commitment mismatch")]
    BlobCommitmentMismatch {
        /// Blob index
        index: usize,
    },

    /// Blob uses a share version other than 0
    #[error("Blob {index} has unsupported share version {version}")]
    UnsupportedShareVersion {
        /// Blob index
        index: usize,
        /// Declared share version
        version: u8,
    },

    /// Zero-length blob
    #[error("Blob {index} is empty")]
    EmptyBlob {
        /// Blob index
        index: usize,
    },

    /// Blob namespace is reserved or malformed
    #[error("Invalid blob namespace: {0}")]
    InvalidNamespace(#[from] NamespaceError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_messages() {
        let err = Rejection::SequenceMismatch {
            expected: 3,
            actual: 5,
        };
        assert_eq!(err.to_string(), "Sequence mismatch: expected 3, got 5");

        let err: Rejection = DecodeError::MalformedEnvelope.into();
        assert!(err.to_string().contains("envelope"));
    }
}
