//! # Namespaces
//!
//! Every share belongs to exactly one namespace. Namespaces order the square:
//! reserved transaction namespaces first, user blobs sorted ascending, tail
//! padding last. Parity shares produced by the erasure coder carry the
//! maximum namespace so they always sort after data.

use crate::errors::NamespaceError;
use crate::{NAMESPACE_ID_SIZE, NAMESPACE_SIZE};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of leading zero bytes required in a version 0 namespace id.
pub const NAMESPACE_V0_ZERO_PREFIX: usize = 18;

/// Maximum length of a version 0 sub-identifier.
pub const NAMESPACE_V0_SUB_ID_SIZE: usize = NAMESPACE_ID_SIZE - NAMESPACE_V0_ZERO_PREFIX;

/// Version used by primary reserved and user namespaces.
pub const NAMESPACE_VERSION_ZERO: u8 = 0;

/// Version used by secondary reserved namespaces (padding, parity).
pub const NAMESPACE_VERSION_MAX: u8 = u8::MAX;

/// A 29-byte namespace: one version byte followed by a 28-byte identifier.
///
/// The derived ordering is lexicographic over `(version, id)`, which equals
/// byte-wise ordering of the serialized form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Namespace {
    version: u8,
    id: [u8; NAMESPACE_ID_SIZE],
}

/// Compact shares holding ordinary transactions.
pub const TX_NAMESPACE: Namespace = Namespace::primary_reserved(0x01);

/// Compact shares holding the transactions that pay for blobs.
pub const PAY_FOR_BLOB_NAMESPACE: Namespace = Namespace::primary_reserved(0x04);

/// Upper bound of the primary reserved range.
pub const MAX_PRIMARY_RESERVED_NAMESPACE: Namespace = Namespace::primary_reserved(0xFF);

/// Padding appended after the last blob until the square is full.
pub const TAIL_PADDING_NAMESPACE: Namespace = Namespace::secondary_reserved(0xFE);

/// Namespace assigned to every erasure-coded parity share.
pub const PARITY_NAMESPACE: Namespace = Namespace::secondary_reserved(0xFF);

impl Namespace {
    const fn primary_reserved(last: u8) -> Self {
        let mut id = [0u8; NAMESPACE_ID_SIZE];
        id[NAMESPACE_ID_SIZE - 1] = last;
        Self {
            version: NAMESPACE_VERSION_ZERO,
            id,
        }
    }

    const fn secondary_reserved(last: u8) -> Self {
        let mut id = [0xFFu8; NAMESPACE_ID_SIZE];
        id[NAMESPACE_ID_SIZE - 1] = last;
        Self {
            version: NAMESPACE_VERSION_MAX,
            id,
        }
    }

    /// Build a version 0 namespace from a sub-identifier of at most 10 bytes.
    ///
    /// Shorter sub-identifiers are left-padded with zeros.
    pub fn new_v0(sub_id: &[u8]) -> Result<Self, NamespaceError> {
        if sub_id.len() > NAMESPACE_V0_SUB_ID_SIZE {
            return Err(NamespaceError::SubIdTooLong { len: sub_id.len() });
        }
        let mut id = [0u8; NAMESPACE_ID_SIZE];
        id[NAMESPACE_ID_SIZE - sub_id.len()..].copy_from_slice(sub_id);
        Ok(Self {
            version: NAMESPACE_VERSION_ZERO,
            id,
        })
    }

    /// Parse a namespace from its 29-byte serialized form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, NamespaceError> {
        if bytes.len() != NAMESPACE_SIZE {
            return Err(NamespaceError::InvalidLength {
                expected: NAMESPACE_SIZE,
                actual: bytes.len(),
            });
        }
        let mut raw = [0u8; NAMESPACE_SIZE];
        raw.copy_from_slice(bytes);
        Ok(Self::from_array(raw))
    }

    /// Build a namespace from an exact 29-byte array.
    pub fn from_array(raw: [u8; NAMESPACE_SIZE]) -> Self {
        let mut id = [0u8; NAMESPACE_ID_SIZE];
        id.copy_from_slice(&raw[1..]);
        Self {
            version: raw[0],
            id,
        }
    }

    /// Serialize to 29 bytes.
    pub fn to_bytes(&self) -> [u8; NAMESPACE_SIZE] {
        let mut out = [0u8; NAMESPACE_SIZE];
        out[0] = self.version;
        out[1..].copy_from_slice(&self.id);
        out
    }

    /// Namespace version.
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Namespace identifier.
    pub fn id(&self) -> &[u8; NAMESPACE_ID_SIZE] {
        &self.id
    }

    /// True for namespaces owned by the protocol rather than by users.
    pub fn is_reserved(&self) -> bool {
        *self <= MAX_PRIMARY_RESERVED_NAMESPACE || self.version == NAMESPACE_VERSION_MAX
    }

    /// Check that the namespace may hold user blob data.
    pub fn validate_for_blob(&self) -> Result<(), NamespaceError> {
        if self.version != NAMESPACE_VERSION_ZERO {
            return Err(NamespaceError::UnsupportedVersion(self.version));
        }
        if self.id[..NAMESPACE_V0_ZERO_PREFIX].iter().any(|b| *b != 0) {
            return Err(NamespaceError::MissingZeroPrefix);
        }
        if self.is_reserved() {
            return Err(NamespaceError::Reserved(self.to_string()));
        }
        Ok(())
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.to_bytes()))
    }
}
