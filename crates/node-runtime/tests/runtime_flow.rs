//! End-to-end runtime tests: genesis file in, JSON proposal out.

use node_runtime::{read_txs, GenesisFile, NodeConfig, NodeRuntime};
use qc_17_proposal_assembly::{AssemblyError, Halt, Stage};
use qc_admission::test_utils::{blob_tx, send_tx, signing_key, TEST_CHAIN_ID};
use shared_types::{Blob, Namespace};
use std::io::Write;
use std::panic::{catch_unwind, AssertUnwindSafe};

struct PanicHalt;

impl Halt for PanicHalt {
    fn halt(&self, err: &AssemblyError) -> ! {
        panic!("halted: {}", err.stage())
    }
}

fn genesis_json(max_square_size: u64) -> String {
    let accounts: Vec<String> = (1..=3u8)
        .map(|seed| {
            format!(
                r#"{{ "public_key": "{}", "balance": 1000000 }}"#,
                hex::encode(signing_key(seed).verifying_key().to_bytes())
            )
        })
        .collect();
    format!(
        r#"{{ "chain_id": "{TEST_CHAIN_ID}", "params": {{ "gov_max_square_size": {max_square_size} }}, "accounts": [{}] }}"#,
        accounts.join(", ")
    )
}

fn runtime(max_square_size: u64) -> NodeRuntime<PanicHalt> {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(genesis_json(max_square_size).as_bytes()).unwrap();
    let store = GenesisFile::load(file.path()).unwrap().into_store().unwrap();
    NodeRuntime::with_halt(&NodeConfig::default(), store, PanicHalt).unwrap()
}

#[test]
fn test_proposal_from_files() {
    let txs: Vec<Vec<u8>> = (1..=3u8)
        .map(|seed| send_tx(&signing_key(seed), 0, [0xAB; 20], 5))
        .collect();
    let mut txs_file = tempfile::NamedTempFile::new().unwrap();
    let encoded: Vec<String> = txs.iter().map(hex::encode).collect();
    txs_file
        .write_all(serde_json::to_string(&encoded).unwrap().as_bytes())
        .unwrap();

    let output = runtime(64).propose(read_txs(txs_file.path()).unwrap()).unwrap();

    assert_eq!(output.height, 1);
    assert_eq!(output.txs, encoded);
    assert!(output.square_size.is_power_of_two());
    assert_eq!(output.data_hash.len(), 64);
    assert_eq!(output.metrics.proposals_prepared, 1);
    assert_eq!(output.metrics.last_post_filter, 3);

    let json = serde_json::to_value(&output).unwrap();
    assert_eq!(json["square_size"], output.square_size);
}

#[test]
fn test_invalid_candidates_are_dropped() {
    let txs = vec![
        send_tx(&signing_key(1), 0, [0xAB; 20], 5),
        // unknown signer
        send_tx(&signing_key(9), 0, [0xAB; 20], 5),
        vec![0xDE, 0xAD],
    ];
    let output = runtime(64).propose(txs.clone()).unwrap();
    assert_eq!(output.txs, vec![hex::encode(&txs[0])]);
    assert_eq!(output.metrics.last_pre_filter, 3);
}

#[test]
fn test_oversized_blob_halts() {
    let ns = Namespace::new_v0(b"rollup").unwrap();
    let txs = vec![blob_tx(
        &signing_key(2),
        0,
        vec![Blob::new(ns, vec![1u8; 2_000])],
    )];
    let runtime = runtime(1);

    let outcome = catch_unwind(AssertUnwindSafe(|| runtime.propose(txs)));
    let panic = outcome.unwrap_err();
    let message = panic.downcast_ref::<String>().cloned().unwrap_or_default();
    assert_eq!(message, format!("halted: {}", Stage::SquareConstruction));
}
