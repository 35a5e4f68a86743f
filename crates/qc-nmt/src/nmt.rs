//! # Namespaced Merkle Tree
//!
//! Every node carries the minimum and maximum namespace of the leaves below
//! it, so a root commits to which namespaces a row or column contains.
//!
//! ```text
//! leaf:  ns || ns || H(0x00 || ns || data)
//! node:  min || max || H(0x01 || left || right)
//! ```
//!
//! With `ignore_max_namespace` set, parity leaves do not raise the maximum
//! namespace of a node that also covers data.

use crate::errors::{NmtError, Result};
use crate::merkle::{split_point, LEAF_PREFIX, NODE_PREFIX};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use shared_types::{Hash, Namespace, NAMESPACE_SIZE, PARITY_NAMESPACE};
use std::fmt;

/// Serialized size of a [`NamespacedHash`].
pub const NAMESPACED_HASH_SIZE: usize = 2 * NAMESPACE_SIZE + 32;

/// A node digest tagged with its namespace range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamespacedHash {
    /// Smallest namespace below this node
    pub min: Namespace,
    /// Largest namespace below this node
    pub max: Namespace,
    /// SHA-256 digest
    pub digest: Hash,
}

impl NamespacedHash {
    /// `min || max || digest`.
    pub fn to_bytes(&self) -> [u8; NAMESPACED_HASH_SIZE] {
        let mut out = [0u8; NAMESPACED_HASH_SIZE];
        out[..NAMESPACE_SIZE].copy_from_slice(&self.min.to_bytes());
        out[NAMESPACE_SIZE..2 * NAMESPACE_SIZE].copy_from_slice(&self.max.to_bytes());
        out[2 * NAMESPACE_SIZE..].copy_from_slice(&self.digest);
        out
    }

    /// Root of a tree with no leaves.
    pub fn empty() -> Self {
        let zero = Namespace::from_array([0u8; NAMESPACE_SIZE]);
        Self {
            min: zero,
            max: zero,
            digest: shared_types::sha256(&[]),
        }
    }
}

impl fmt::Display for NamespacedHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.to_bytes()))
    }
}

fn hash_leaf(namespace: Namespace, data: &[u8]) -> NamespacedHash {
    let mut hasher = Sha256::new();
    hasher.update([LEAF_PREFIX]);
    hasher.update(namespace.to_bytes());
    hasher.update(data);
    NamespacedHash {
        min: namespace,
        max: namespace,
        digest: hasher.finalize().into(),
    }
}

fn hash_node(left: &NamespacedHash, right: &NamespacedHash, ignore_max_namespace: bool) -> NamespacedHash {
    let min = left.min.min(right.min);
    let max = if ignore_max_namespace && right.min == PARITY_NAMESPACE {
        left.max
    } else if ignore_max_namespace && left.min == PARITY_NAMESPACE {
        right.max
    } else {
        left.max.max(right.max)
    };

    let mut hasher = Sha256::new();
    hasher.update([NODE_PREFIX]);
    hasher.update(left.to_bytes());
    hasher.update(right.to_bytes());
    NamespacedHash {
        min,
        max,
        digest: hasher.finalize().into(),
    }
}

/// Append-only namespaced Merkle tree.
#[derive(Clone, Debug)]
pub struct NamespaceMerkleTree {
    leaves: Vec<NamespacedHash>,
    ignore_max_namespace: bool,
}

impl Default for NamespaceMerkleTree {
    fn default() -> Self {
        Self::new(true)
    }
}

impl NamespaceMerkleTree {
    /// Empty tree.
    pub fn new(ignore_max_namespace: bool) -> Self {
        Self {
            leaves: Vec::new(),
            ignore_max_namespace,
        }
    }

    /// Append a leaf. Namespaces must not decrease.
    pub fn push(&mut self, namespace: Namespace, data: &[u8]) -> Result<()> {
        if let Some(last) = self.leaves.last() {
            if namespace < last.max {
                return Err(NmtError::UnorderedNamespace {
                    previous: last.max,
                    next: namespace,
                });
            }
        }
        self.leaves.push(hash_leaf(namespace, data));
        Ok(())
    }

    /// Number of leaves.
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// Whether no leaf has been pushed.
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Root over all leaves.
    pub fn root(&self) -> NamespacedHash {
        if self.leaves.is_empty() {
            return NamespacedHash::empty();
        }
        self.subtree_root(&self.leaves)
    }

    fn subtree_root(&self, leaves: &[NamespacedHash]) -> NamespacedHash {
        if leaves.len() == 1 {
            return leaves[0];
        }
        let k = split_point(leaves.len());
        let left = self.subtree_root(&leaves[..k]);
        let right = self.subtree_root(&leaves[k..]);
        hash_node(&left, &right, self.ignore_max_namespace)
    }
}
