//! # Core Entities
//!
//! Fixed-size byte aliases and the hashing helper every crate agrees on.

use sha2::{Digest, Sha256};

/// A 32-byte SHA-256 digest.
pub type Hash = [u8; 32];

/// A 64-byte Ed25519 signature.
pub type Signature = [u8; 64];

/// A 32-byte Ed25519 public key.
pub type PublicKey = [u8; 32];

/// A 20-byte account address, derived from the public key.
pub type Address = [u8; 20];

/// A raw transaction exactly as handed over by the consensus engine.
pub type RawTx = Vec<u8>;

/// Compute the SHA-256 digest of `data`.
#[inline]
pub fn sha256(data: &[u8]) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Derive an account address from an Ed25519 public key.
///
/// The address is the first 20 bytes of `sha256(public_key)`.
pub fn address_from_public_key(public_key: &PublicKey) -> Address {
    let digest = sha256(public_key);
    let mut address = [0u8; 20];
    address.copy_from_slice(&digest[..20]);
    address
}

/// Hex-encode the first 8 bytes of a hash for log lines.
pub fn short_hex(bytes: &[u8]) -> String {
    hex::encode(&bytes[..bytes.len().min(8)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_empty() {
        // e3b0c442... is the well-known digest of the empty string
        assert_eq!(
            hex::encode(sha256(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_address_is_digest_prefix() {
        let key = [7u8; 32];
        let address = address_from_public_key(&key);
        assert_eq!(&address[..], &sha256(&key)[..20]);
    }

    #[test]
    fn test_short_hex() {
        assert_eq!(short_hex(&[0xAB; 32]), "abababababababab");
        assert_eq!(short_hex(&[0x01, 0x02]), "0102");
    }
}
