//! Admission checks and their composition
//!
//! Each check is a plain function over a [`TxBranch`] and a decoded
//! transaction. [`AdmissionPredicate`] runs an ordered list of them and stops
//! at the first rejection.

use super::branch::TxBranch;
use super::entities::ChainContext;
use super::errors::Rejection;
use super::tx::{decode_raw, DecodedTx, Message};
use ed25519_dalek::{Signature, VerifyingKey};
use shared_types::{Blob, Hash, Namespace, SHARE_VERSION_ZERO};
use std::fmt;

/// A single admission check.
pub type Check = Box<dyn Fn(&mut TxBranch<'_>, &DecodedTx) -> Result<(), Rejection> + Send + Sync>;

/// Ordered composition of admission checks, built once and reused.
pub struct AdmissionPredicate {
    checks: Vec<(&'static str, Check)>,
}

impl AdmissionPredicate {
    /// Compose `checks` in the given order.
    pub fn new(checks: Vec<(&'static str, Check)>) -> Self {
        Self { checks }
    }

    /// The standard check chain used by proposers.
    pub fn standard() -> Self {
        Self::new(vec![
            ("validate_basic", Box::new(validate_basic)),
            ("check_chain_id", Box::new(check_chain_id)),
            ("check_min_fee", Box::new(check_min_fee)),
            ("verify_signature", Box::new(verify_signature)),
            ("check_sequence", Box::new(check_sequence)),
            ("deduct_fee", Box::new(deduct_fee)),
            ("check_messages", Box::new(check_messages)),
            ("increment_sequence", Box::new(increment_sequence)),
        ])
    }

    /// Append a check to the end of the chain.
    pub fn with_check(mut self, name: &'static str, check: Check) -> Self {
        self.checks.push((name, check));
        self
    }

    /// Names of the composed checks, in order.
    pub fn check_names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|(name, _)| *name).collect()
    }

    /// Decode `raw` and run every check against a fresh branch of `ctx`.
    ///
    /// The branch is dropped before returning; `ctx` is never written.
    pub fn admit(&self, ctx: &ChainContext, raw: &[u8]) -> Result<(), Rejection> {
        let decoded = decode_raw(raw)?;
        let mut branch = TxBranch::new(ctx);

        for (name, check) in &self.checks {
            if let Err(rejection) = check(&mut branch, &decoded) {
                tracing::trace!(check = name, %rejection, "admission check failed");
                return Err(rejection);
            }
        }
        Ok(())
    }
}

impl fmt::Debug for AdmissionPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdmissionPredicate")
            .field("checks", &self.check_names())
            .finish()
    }
}

/// Stateless sanity checks.
pub fn validate_basic(_branch: &mut TxBranch<'_>, decoded: &DecodedTx) -> Result<(), Rejection> {
    let body = &decoded.tx.body;
    if body.messages.is_empty() {
        return Err(Rejection::NoMessages);
    }
    if body.gas_limit == 0 {
        return Err(Rejection::ZeroGasLimit);
    }
    if body.memo.len() > crate::MAX_MEMO_LEN {
        return Err(Rejection::MemoTooLong {
            len: body.memo.len(),
        });
    }
    Ok(())
}

/// The transaction must be signed for this chain.
pub fn check_chain_id(branch: &mut TxBranch<'_>, decoded: &DecodedTx) -> Result<(), Rejection> {
    let expected = branch.context().chain_id();
    if decoded.tx.body.chain_id != expected {
        return Err(Rejection::WrongChainId {
            expected: expected.to_string(),
            actual: decoded.tx.body.chain_id.clone(),
        });
    }
    Ok(())
}

/// Fee must cover `gas_limit * min_gas_price`.
pub fn check_min_fee(branch: &mut TxBranch<'_>, decoded: &DecodedTx) -> Result<(), Rejection> {
    let body = &decoded.tx.body;
    let required = body
        .gas_limit
        .checked_mul(branch.context().params().min_gas_price)
        .ok_or(Rejection::FeeOverflow)?;
    if body.fee < required {
        return Err(Rejection::InsufficientFee {
            required,
            provided: body.fee,
        });
    }
    Ok(())
}

/// Strict Ed25519 verification over the sign bytes.
pub fn verify_signature(_branch: &mut TxBranch<'_>, decoded: &DecodedTx) -> Result<(), Rejection> {
    let tx = &decoded.tx;
    let key = VerifyingKey::from_bytes(&tx.public_key).map_err(|_| Rejection::InvalidPublicKey)?;
    let signature = Signature::from_bytes(&tx.signature);
    let message = tx.body.sign_bytes()?;
    key.verify_strict(&message, &signature)
        .map_err(|_| Rejection::InvalidSignature)
}

/// Signer must exist, own the key, and use the next sequence.
pub fn check_sequence(branch: &mut TxBranch<'_>, decoded: &DecodedTx) -> Result<(), Rejection> {
    let tx = &decoded.tx;
    let signer = tx.signer();
    let account = branch
        .account(&signer)
        .ok_or_else(|| Rejection::UnknownAccount {
            address: hex::encode(signer),
        })?;

    if account.public_key != tx.public_key {
        return Err(Rejection::PublicKeyMismatch);
    }
    if account.sequence != tx.body.sequence {
        return Err(Rejection::SequenceMismatch {
            expected: account.sequence,
            actual: tx.body.sequence,
        });
    }
    Ok(())
}

/// Deduct the fee from the signer in the overlay.
pub fn deduct_fee(branch: &mut TxBranch<'_>, decoded: &DecodedTx) -> Result<(), Rejection> {
    let signer = decoded.tx.signer();
    let mut account = branch
        .account(&signer)
        .ok_or_else(|| Rejection::UnknownAccount {
            address: hex::encode(signer),
        })?;
    let fee = decoded.tx.body.fee;
    if account.balance < fee {
        return Err(Rejection::InsufficientFunds {
            required: fee,
            available: account.balance,
        });
    }
    account.balance -= fee;
    branch.set_account(account);
    Ok(())
}

/// Message preconditions: transfers are funded, blob payments match blobs.
pub fn check_messages(branch: &mut TxBranch<'_>, decoded: &DecodedTx) -> Result<(), Rejection> {
    let pfb_count = decoded.tx.pay_for_blobs_count();
    if decoded.is_blob_tx && pfb_count != 1 {
        return Err(Rejection::PayForBlobsCount { found: pfb_count });
    }
    if !decoded.is_blob_tx && pfb_count > 0 {
        return Err(Rejection::UnexpectedPayForBlobs);
    }

    let signer = decoded.tx.signer();
    for message in &decoded.tx.body.messages {
        match message {
            Message::Send { to, amount } => {
                let mut from = branch
                    .account(&signer)
                    .ok_or_else(|| Rejection::UnknownAccount {
                        address: hex::encode(signer),
                    })?;
                if from.balance < *amount {
                    return Err(Rejection::InsufficientFunds {
                        required: *amount,
                        available: from.balance,
                    });
                }
                from.balance -= amount;
                branch.set_account(from);

                // Recipients without an account are not tracked in the overlay.
                if let Some(mut recipient) = branch.account(to) {
                    recipient.balance = recipient.balance.saturating_add(*amount);
                    branch.set_account(recipient);
                }
            }
            Message::PayForBlobs {
                namespaces,
                blob_sizes,
                share_commitments,
            } => check_pay_for_blobs(&decoded.blobs, namespaces, blob_sizes, share_commitments)?,
        }
    }
    Ok(())
}

fn check_pay_for_blobs(
    blobs: &[Blob],
    namespaces: &[Namespace],
    blob_sizes: &[u32],
    share_commitments: &[Hash],
) -> Result<(), Rejection> {
    for declared in [namespaces.len(), blob_sizes.len(), share_commitments.len()] {
        if declared != blobs.len() || declared == 0 {
            return Err(Rejection::BlobCountMismatch {
                declared,
                actual: blobs.len(),
            });
        }
    }

    for (index, blob) in blobs.iter().enumerate() {
        blob.namespace.validate_for_blob()?;
        if blob.data.is_empty() {
            return Err(Rejection::EmptyBlob { index });
        }
        if blob.share_version != SHARE_VERSION_ZERO {
            return Err(Rejection::UnsupportedShareVersion {
                index,
                version: blob.share_version,
            });
        }
        if blob.namespace != namespaces[index] {
            return Err(Rejection::BlobNamespaceMismatch { index });
        }
        if blob.data.len() != blob_sizes[index] as usize {
            return Err(Rejection::BlobSizeMismatch {
                index,
                declared: blob_sizes[index],
                actual: blob.data.len(),
            });
        }
        if blob.commitment() != share_commitments[index] {
            return Err(Rejection::BlobCommitmentMismatch { index });
        }
    }
    Ok(())
}

/// Bump the signer's sequence in the overlay.
pub fn increment_sequence(branch: &mut TxBranch<'_>, decoded: &DecodedTx) -> Result<(), Rejection> {
    let signer = decoded.tx.signer();
    let mut account = branch
        .account(&signer)
        .ok_or_else(|| Rejection::UnknownAccount {
            address: hex::encode(signer),
        })?;
    account.sequence += 1;
    branch.set_account(account);
    Ok(())
}
