//! RFC 6962 binary Merkle tree.
//!
//! Leaves hash as `H(0x00 || item)`, inner nodes as `H(0x01 || left || right)`.
//! A tree of `n > 1` items splits at the largest power of two below `n`.

use sha2::{Digest, Sha256};
use shared_types::Hash;

/// Domain prefix for leaf hashes.
pub const LEAF_PREFIX: u8 = 0x00;

/// Domain prefix for inner node hashes.
pub const NODE_PREFIX: u8 = 0x01;

/// Hash of a leaf item.
pub fn leaf_hash(item: &[u8]) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update([LEAF_PREFIX]);
    hasher.update(item);
    hasher.finalize().into()
}

/// Hash of an inner node.
pub fn inner_hash(left: &Hash, right: &Hash) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update([NODE_PREFIX]);
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().into()
}

/// Largest power of two strictly below `n` (`n > 1`).
pub(crate) fn split_point(n: usize) -> usize {
    let mut k = 1;
    while k * 2 < n {
        k *= 2;
    }
    k
}

/// Merkle root of `items`; `sha256("")` for an empty list.
pub fn hash_from_byte_slices<T: AsRef<[u8]>>(items: &[T]) -> Hash {
    match items.len() {
        0 => shared_types::sha256(&[]),
        1 => leaf_hash(items[0].as_ref()),
        n => {
            let k = split_point(n);
            let left = hash_from_byte_slices(&items[..k]);
            let right = hash_from_byte_slices(&items[k..]);
            inner_hash(&left, &right)
        }
    }
}
