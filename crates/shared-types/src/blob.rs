//! # Blobs and the Blob Transaction Envelope
//!
//! A blob transaction carries an ordinary signed transaction (which must pay
//! for the blobs) plus the blob payloads themselves. On the wire it is
//! distinguished from a plain transaction by a 4-byte magic prefix.

use crate::entities::{sha256, Hash};
use crate::namespace::Namespace;
use bincode::Options;
use serde::{Deserialize, Serialize};

/// Prefix marking a raw transaction as a blob transaction envelope.
pub const BLOB_TX_MAGIC: &[u8; 4] = b"BLOB";

/// Namespaced payload published alongside a transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blob {
    /// Namespace the blob is stored under.
    pub namespace: Namespace,
    /// Opaque blob bytes.
    pub data: Vec<u8>,
    /// Share version used to lay the blob out.
    pub share_version: u8,
}

impl Blob {
    /// Create a share version 0 blob.
    pub fn new(namespace: Namespace, data: Vec<u8>) -> Self {
        Self {
            namespace,
            data,
            share_version: crate::SHARE_VERSION_ZERO,
        }
    }

    /// Commitment the paying transaction must declare for this blob.
    ///
    /// `sha256(namespace || share_version || data)`.
    pub fn commitment(&self) -> Hash {
        let mut preimage = Vec::with_capacity(crate::NAMESPACE_SIZE + 1 + self.data.len());
        preimage.extend_from_slice(&self.namespace.to_bytes());
        preimage.push(self.share_version);
        preimage.extend_from_slice(&self.data);
        sha256(&preimage)
    }
}

/// A transaction bundled with the blobs it pays for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobTx {
    /// Encoded inner transaction.
    pub tx: Vec<u8>,
    /// Blobs, in the order the inner transaction declares them.
    pub blobs: Vec<Blob>,
}

impl BlobTx {
    /// Encode as `BLOB || bincode(self)`.
    pub fn encode(&self) -> bincode::Result<Vec<u8>> {
        let mut out = BLOB_TX_MAGIC.to_vec();
        out.extend(bincode::serialize(self)?);
        Ok(out)
    }

    /// Try to unwrap a raw transaction as a blob transaction.
    ///
    /// Returns `None` for anything without the magic prefix or whose body
    /// is not exactly one canonical encoding. Trailing bytes are rejected.
    pub fn decode(raw: &[u8]) -> Option<Self> {
        let body = raw.strip_prefix(BLOB_TX_MAGIC.as_slice())?;
        bincode::DefaultOptions::new()
            .with_fixint_encoding()
            .reject_trailing_bytes()
            .with_limit(body.len() as u64)
            .deserialize(body)
            .ok()
    }

    /// Cheap check for the magic prefix without decoding the body.
    pub fn is_blob_tx(raw: &[u8]) -> bool {
        raw.starts_with(BLOB_TX_MAGIC)
    }
}
