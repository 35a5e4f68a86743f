//! Test utilities for transaction admission.
//!
//! Deterministic keys and signed transaction builders. Enable with the
//! `test-utils` feature flag.
//!
//! # Example
//!
//! ```rust,ignore
//! use qc_admission::test_utils::{context_with, funded_account, send_tx, signing_key};
//! use qc_admission::AdmissionPredicate;
//!
//! let key = signing_key(1);
//! let ctx = context_with(&[funded_account(&key, 1_000, 0)]);
//! let raw = send_tx(&key, 0, [7u8; 20], 5);
//! assert!(AdmissionPredicate::standard().admit(&ctx, &raw).is_ok());
//! ```

use crate::adapters::InMemoryStateStore;
use crate::domain::entities::{Account, ChainContext, ChainParams};
use crate::domain::tx::{Message, Transaction, TxBody};
use ed25519_dalek::SigningKey;
use shared_types::{Address, Blob, BlobTx};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Chain id used by every helper in this module.
pub const TEST_CHAIN_ID: &str = "qc-test";

/// Fee attached by the builders. Covers `TEST_GAS_LIMIT` at the default gas price.
pub const TEST_FEE: u64 = 100;

/// Gas limit attached by the builders.
pub const TEST_GAS_LIMIT: u64 = 100;

/// Deterministic signing key derived from `seed`.
pub fn signing_key(seed: u8) -> SigningKey {
    SigningKey::from_bytes(&[seed; 32])
}

/// Account for `key` with the given balance and next sequence.
pub fn funded_account(key: &SigningKey, balance: u64, sequence: u64) -> Account {
    let mut account = Account::new(key.verifying_key().to_bytes(), balance);
    account.sequence = sequence;
    account
}

/// Context at height 1 holding `accounts`, with default parameters.
pub fn context_with(accounts: &[Account]) -> ChainContext {
    let map: BTreeMap<Address, Account> = accounts.iter().map(|a| (a.address, a.clone())).collect();
    ChainContext::new(TEST_CHAIN_ID, 1, ChainParams::default(), Arc::new(map))
}

/// Store with `accounts` committed at genesis.
pub fn genesis_store(accounts: &[Account], params: ChainParams) -> InMemoryStateStore {
    InMemoryStateStore::with_genesis(TEST_CHAIN_ID, accounts.to_vec(), params)
}

/// Signed body builder shared by the transaction helpers.
pub fn signed(key: &SigningKey, sequence: u64, messages: Vec<Message>, memo: &str) -> Transaction {
    let body = TxBody {
        chain_id: TEST_CHAIN_ID.into(),
        sequence,
        fee: TEST_FEE,
        gas_limit: TEST_GAS_LIMIT,
        messages,
        memo: memo.into(),
    };
    Transaction::sign(body, key).expect("test body encodes")
}

/// Encoded transfer of `amount` to `to`.
pub fn send_tx(key: &SigningKey, sequence: u64, to: Address, amount: u64) -> Vec<u8> {
    send_tx_with_memo(key, sequence, to, amount, "")
}

/// Encoded transfer carrying `memo`, for varying transaction size.
pub fn send_tx_with_memo(
    key: &SigningKey,
    sequence: u64,
    to: Address,
    amount: u64,
    memo: &str,
) -> Vec<u8> {
    signed(key, sequence, vec![Message::Send { to, amount }], memo)
        .encode()
        .expect("test tx encodes")
}

/// Encoded blob envelope paying for `blobs`.
pub fn blob_tx(key: &SigningKey, sequence: u64, blobs: Vec<Blob>) -> Vec<u8> {
    let message = Message::PayForBlobs {
        namespaces: blobs.iter().map(|b| b.namespace).collect(),
        blob_sizes: blobs.iter().map(|b| b.data.len() as u32).collect(),
        share_commitments: blobs.iter().map(Blob::commitment).collect(),
    };
    let tx = signed(key, sequence, vec![message], "")
        .encode()
        .expect("test tx encodes");
    BlobTx { tx, blobs }.encode().expect("test envelope encodes")
}
