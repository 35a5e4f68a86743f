//! # Shares
//!
//! A share is the fixed-size unit of the data square. The leading bytes are
//! always the namespace followed by the info byte; sequence-start shares add
//! a big-endian sequence length.

use crate::errors::ShareError;
use crate::namespace::Namespace;
use crate::{NAMESPACE_SIZE, SEQUENCE_LEN_BYTES, SHARE_INFO_BYTES, SHARE_SIZE};

/// Info byte: `share_version << 1 | sequence_start`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InfoByte(u8);

impl InfoByte {
    /// Build an info byte. Share versions above 127 do not fit.
    pub fn new(share_version: u8, sequence_start: bool) -> Option<Self> {
        if share_version > 127 {
            return None;
        }
        Some(Self((share_version << 1) | sequence_start as u8))
    }

    /// Share version encoded in the upper seven bits.
    pub fn version(self) -> u8 {
        self.0 >> 1
    }

    /// Whether this share opens a new sequence.
    pub fn is_sequence_start(self) -> bool {
        self.0 & 1 == 1
    }

    /// Raw byte.
    pub fn as_u8(self) -> u8 {
        self.0
    }
}

/// A single `SHARE_SIZE` byte share.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Share(Vec<u8>);

impl Share {
    /// Wrap raw bytes, checking the length.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, ShareError> {
        if bytes.len() != SHARE_SIZE {
            return Err(ShareError::InvalidSize {
                expected: SHARE_SIZE,
                actual: bytes.len(),
            });
        }
        Ok(Self(bytes))
    }

    /// Namespace stored in the first 29 bytes.
    pub fn namespace(&self) -> Namespace {
        let mut raw = [0u8; NAMESPACE_SIZE];
        raw.copy_from_slice(&self.0[..NAMESPACE_SIZE]);
        Namespace::from_array(raw)
    }

    /// Info byte following the namespace.
    pub fn info(&self) -> InfoByte {
        InfoByte(self.0[NAMESPACE_SIZE])
    }

    /// Sequence length if this share starts a sequence.
    pub fn sequence_len(&self) -> Option<u32> {
        if !self.info().is_sequence_start() {
            return None;
        }
        let start = NAMESPACE_SIZE + SHARE_INFO_BYTES;
        let mut len = [0u8; SEQUENCE_LEN_BYTES];
        len.copy_from_slice(&self.0[start..start + SEQUENCE_LEN_BYTES]);
        Some(u32::from_be_bytes(len))
    }

    /// Raw share bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume the share, returning its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for Share {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
