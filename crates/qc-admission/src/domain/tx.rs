//! Transaction wire format
//!
//! Transactions are bincode-encoded with fixed-width integers. The signature
//! covers the bincode encoding of [`TxBody`], which includes the chain id and
//! sequence, so a signature cannot be replayed on another chain or height.

use super::errors::DecodeError;
use bincode::Options;
use ed25519_dalek::{Signer, SigningKey};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use shared_types::{address_from_public_key, Address, Blob, BlobTx, Hash, Namespace, PublicKey, Signature};

/// A message executed by a transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    /// Transfer `amount` from the signer to `to`
    Send {
        /// Recipient address
        to: Address,
        /// Amount in base units
        amount: u64,
    },

    /// Pay for the blobs carried in the enclosing blob envelope
    PayForBlobs {
        /// Namespace of each blob, in envelope order
        namespaces: Vec<Namespace>,
        /// Size of each blob in bytes
        blob_sizes: Vec<u32>,
        /// [`Blob::commitment`] of each blob
        share_commitments: Vec<Hash>,
    },
}

/// Signed portion of a transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxBody {
    /// Chain the transaction is valid on
    pub chain_id: String,
    /// Account sequence (nonce)
    pub sequence: u64,
    /// Fee paid in base units
    pub fee: u64,
    /// Gas limit
    pub gas_limit: u64,
    /// Messages, executed in order
    pub messages: Vec<Message>,
    /// Free-form memo
    pub memo: String,
}

impl TxBody {
    /// Canonical bytes covered by the signature.
    pub fn sign_bytes(&self) -> Result<Vec<u8>, DecodeError> {
        bincode::serialize(self).map_err(|e| DecodeError::Encode(e.to_string()))
    }
}

/// A signed transaction.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Signed body
    pub body: TxBody,
    /// Signer's Ed25519 public key
    pub public_key: PublicKey,
    /// Ed25519 signature over [`TxBody::sign_bytes`]
    #[serde_as(as = "Bytes")]
    pub signature: Signature,
}

impl Transaction {
    /// Sign `body` with `key`.
    pub fn sign(body: TxBody, key: &SigningKey) -> Result<Self, DecodeError> {
        let signature = key.sign(&body.sign_bytes()?).to_bytes();
        Ok(Self {
            body,
            public_key: key.verifying_key().to_bytes(),
            signature,
        })
    }

    /// Address of the signer.
    pub fn signer(&self) -> Address {
        address_from_public_key(&self.public_key)
    }

    /// Encode to wire bytes.
    pub fn encode(&self) -> Result<Vec<u8>, DecodeError> {
        bincode::serialize(self).map_err(|e| DecodeError::Encode(e.to_string()))
    }

    /// Decode from wire bytes. Trailing bytes are rejected.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        bincode::DefaultOptions::new()
            .with_fixint_encoding()
            .reject_trailing_bytes()
            .with_limit(bytes.len() as u64)
            .deserialize(bytes)
            .map_err(|e| DecodeError::Malformed(e.to_string()))
    }

    /// Number of `PayForBlobs` messages.
    pub fn pay_for_blobs_count(&self) -> usize {
        self.body
            .messages
            .iter()
            .filter(|m| matches!(m, Message::PayForBlobs { .. }))
            .count()
    }
}

/// A decoded candidate: the transaction and any blobs it carries.
#[derive(Clone, Debug)]
pub struct DecodedTx {
    /// Inner signed transaction
    pub tx: Transaction,
    /// Blobs from the envelope (empty for plain transactions)
    pub blobs: Vec<Blob>,
    /// Whether the raw bytes were a blob envelope
    pub is_blob_tx: bool,
}

/// Decode raw candidate bytes, unwrapping a blob envelope if present.
pub fn decode_raw(raw: &[u8]) -> Result<DecodedTx, DecodeError> {
    if BlobTx::is_blob_tx(raw) {
        let envelope = BlobTx::decode(raw).ok_or(DecodeError::MalformedEnvelope)?;
        let tx = Transaction::decode(&envelope.tx)?;
        return Ok(DecodedTx {
            tx,
            blobs: envelope.blobs,
            is_blob_tx: true,
        });
    }

    Ok(DecodedTx {
        tx: Transaction::decode(raw)?,
        blobs: Vec::new(),
        is_blob_tx: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> TxBody {
        TxBody {
            chain_id: "qc-test".into(),
            sequence: 0,
            fee: 100,
            gas_limit: 100,
            messages: vec![Message::Send {
                to: [2u8; 20],
                amount: 5,
            }],
            memo: String::new(),
        }
    }

    #[test]
    fn test_signed_tx_decodes() {
        let key = SigningKey::from_bytes(&[1u8; 32]);
        let tx = Transaction::sign(body(), &key).unwrap();
        let raw = tx.encode().unwrap();

        let decoded = decode_raw(&raw).unwrap();
        assert_eq!(decoded.tx, tx);
        assert!(!decoded.is_blob_tx);
        assert_eq!(decoded.tx.signer(), address_from_public_key(&tx.public_key));
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let key = SigningKey::from_bytes(&[1u8; 32]);
        let mut raw = Transaction::sign(body(), &key).unwrap().encode().unwrap();
        raw.push(0);
        assert!(matches!(decode_raw(&raw), Err(DecodeError::Malformed(_))));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(decode_raw(&[0xde, 0xad]), Err(DecodeError::Malformed(_))));
        assert_eq!(
            decode_raw(b"BLOB\x01").unwrap_err(),
            DecodeError::MalformedEnvelope
        );
    }

    #[test]
    fn test_blob_envelope_unwrapped() {
        let key = SigningKey::from_bytes(&[1u8; 32]);
        let inner = Transaction::sign(body(), &key).unwrap();
        let ns = Namespace::new_v0(b"app").unwrap();
        let envelope = BlobTx {
            tx: inner.encode().unwrap(),
            blobs: vec![Blob::new(ns, vec![1, 2, 3])],
        };

        let decoded = decode_raw(&envelope.encode().unwrap()).unwrap();
        assert!(decoded.is_blob_tx);
        assert_eq!(decoded.tx, inner);
        assert_eq!(decoded.blobs.len(), 1);
    }

    #[test]
    fn test_envelope_trailing_bytes_rejected() {
        let key = SigningKey::from_bytes(&[1u8; 32]);
        let inner = Transaction::sign(body(), &key).unwrap();
        let ns = Namespace::new_v0(b"app").unwrap();
        let mut raw = BlobTx {
            tx: inner.encode().unwrap(),
            blobs: vec![Blob::new(ns, vec![1, 2, 3])],
        }
        .encode()
        .unwrap();
        raw.push(0);

        assert_eq!(
            decode_raw(&raw).unwrap_err(),
            DecodeError::MalformedEnvelope
        );
    }

    proptest::proptest! {
        #[test]
        fn prop_arbitrary_bytes_never_panic(raw in proptest::collection::vec(proptest::num::u8::ANY, 0..512)) {
            let _ = decode_raw(&raw);
        }
    }
}
