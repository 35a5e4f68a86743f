//! Shared fixtures for integration tests and benchmarks.

use ed25519_dalek::SigningKey;
use qc_17_proposal_assembly::{
    adapters::{GreedySquareBuilder, NmtCommitmentBuilder, PredicateAdmission, RsErasureCoder, StoreContextProvider},
    FilterConfig, ProposalAssembler, ProposalConfig, ValidityFilter,
};
use qc_admission::test_utils::{funded_account, genesis_store, send_tx_with_memo, signing_key};
use qc_admission::{Account, ChainParams, InMemoryStateStore};
use shared_types::{Address, RawTx};
use std::sync::Arc;

/// Recipient used by every generated transfer.
pub const SINK: Address = [0xEE; 20];

/// Balance given to every funded account.
pub const FUNDED_BALANCE: u64 = 1_000_000_000;

/// Deterministic senders, one per seed in `1..=count`.
pub fn senders(count: u8) -> Vec<SigningKey> {
    (1..=count).map(signing_key).collect()
}

/// Genesis accounts for `keys`.
pub fn accounts(keys: &[SigningKey]) -> Vec<Account> {
    keys.iter()
        .map(|key| funded_account(key, FUNDED_BALANCE, 0))
        .collect()
}

/// Store with `keys` funded at genesis.
pub fn funded_store(keys: &[SigningKey], params: ChainParams) -> Arc<InMemoryStateStore> {
    Arc::new(genesis_store(&accounts(keys), params))
}

/// Governance parameters with the given maximum square width.
pub fn params_with_max(max_square_size: u64) -> ChainParams {
    ChainParams {
        gov_max_square_size: max_square_size,
        ..ChainParams::default()
    }
}

/// One valid transfer per key, first sequence, memo padded to `memo_len`.
pub fn transfers(keys: &[SigningKey], memo_len: usize) -> Vec<RawTx> {
    let memo = "m".repeat(memo_len);
    keys.iter()
        .map(|key| send_tx_with_memo(key, 0, SINK, 1, &memo))
        .collect()
}

/// Production assembler over `store`.
pub fn assembler(store: Arc<InMemoryStateStore>) -> ProposalAssembler {
    assembler_with(store, &ProposalConfig::default())
}

/// Production assembler over `store` with `config`.
pub fn assembler_with(store: Arc<InMemoryStateStore>, config: &ProposalConfig) -> ProposalAssembler {
    ProposalAssembler::with_defaults(store, config).expect("assembler config is valid")
}

/// Assembler with a fixed filter and erasure mode.
pub fn assembler_modes(
    store: Arc<InMemoryStateStore>,
    parallel_filter: bool,
    parallel_erasure: bool,
) -> ProposalAssembler {
    let filter = ValidityFilter::new(&FilterConfig {
        parallel: parallel_filter,
        workers: 4,
    })
    .expect("filter pool starts");
    ProposalAssembler::new(
        Arc::new(StoreContextProvider::new(store)),
        Arc::new(PredicateAdmission::standard()),
        Arc::new(GreedySquareBuilder),
        Arc::new(RsErasureCoder::new(parallel_erasure)),
        Arc::new(NmtCommitmentBuilder),
        filter,
    )
}
