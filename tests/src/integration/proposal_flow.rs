//! # Proposal Flow Integration Tests
//!
//! Drives the full pipeline (admission, square, erasure coding, commitment)
//! through the supervisor, the way the consensus callback does.
//!
//! ## Scenarios
//!
//! 1. **A**: three valid transfers are all included, in order
//! 2. **B**: one stale sequence is excluded, nothing else is
//! 3. **C**: an empty candidate list yields the padding-only square
//! 4. **Fatal**: a transaction that cannot fit alone halts the node
//! 5. **Blobs**: blob data lands in its namespace after the PFB shares

#[cfg(test)]
mod tests {
    use crate::fixtures::{
        assembler, funded_store, params_with_max, senders, transfers, SINK,
    };
    use qc_17_proposal_assembly::{
        AssemblyError, Halt, Metrics, PrepareProposalRequest, ProposalPreparer,
        ProposalSupervisor, Stage,
    };
    use qc_admission::test_utils::{blob_tx, send_tx};
    use qc_admission::ChainParams;
    use qc_erasure::{extend_shares, ReedSolomon};
    use qc_nmt::DataAvailabilityHeader;
    use qc_square::compact::unit_len;
    use qc_square::{
        compact_shares_needed, parse_compact_shares, parse_sparse_shares, square_size_for,
    };
    use shared_types::{
        Blob, Namespace, PAY_FOR_BLOB_NAMESPACE, PARITY_NAMESPACE, TAIL_PADDING_NAMESPACE,
        TX_NAMESPACE,
    };
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::sync::Arc;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// Halt handler that unwinds instead of exiting.
    struct PanicHalt;

    impl Halt for PanicHalt {
        fn halt(&self, err: &AssemblyError) -> ! {
            panic!("halted at {}: {}", err.stage(), err)
        }
    }

    fn request(txs: Vec<Vec<u8>>) -> PrepareProposalRequest {
        PrepareProposalRequest { txs, height: 1 }
    }

    // =============================================================================
    // SCENARIOS
    // =============================================================================

    #[test]
    fn test_scenario_a_all_valid_included_in_order() {
        let keys = senders(3);
        let txs = transfers(&keys, 0);
        let store = funded_store(&keys, ChainParams::default());

        let first = assembler(store.clone())
            .prepare_proposal(request(txs.clone()))
            .unwrap();
        let second = assembler(store)
            .prepare_proposal(request(txs.clone()))
            .unwrap();

        assert_eq!(first.txs, txs);
        let sequence_len: usize = txs.iter().map(|tx| unit_len(tx)).sum();
        let expected_size = square_size_for(compact_shares_needed(sequence_len));
        assert_eq!(first.square_size, expected_size as u64);
        assert_eq!(first, second);
    }

    #[test]
    fn test_scenario_b_invalid_nonce_excluded() {
        let keys = senders(3);
        let mut txs = transfers(&keys, 0);
        txs[1] = send_tx(&keys[1], 3, SINK, 1);

        let response = assembler(funded_store(&keys, ChainParams::default()))
            .prepare_proposal(request(txs.clone()))
            .unwrap();

        assert_eq!(response.txs, vec![txs[0].clone(), txs[2].clone()]);
    }

    #[test]
    fn test_scenario_c_empty_candidates() {
        let keys = senders(1);
        let response = assembler(funded_store(&keys, ChainParams::default()))
            .prepare_proposal(request(vec![]))
            .unwrap();

        assert!(response.txs.is_empty());
        assert_eq!(response.square_size, 1);

        let (square, _) = qc_square::build(&[], 1, 64).unwrap();
        assert_eq!(square.shares()[0].namespace(), TAIL_PADDING_NAMESPACE);
        let eds = extend_shares(&square.to_bytes()).unwrap();
        let dah = DataAvailabilityHeader::from_eds(&eds).unwrap();
        assert_eq!(response.data_hash, dah.hash());
    }

    #[test]
    fn test_oversized_tx_halts_through_supervisor() {
        let keys = senders(1);
        let ns = Namespace::new_v0(b"huge").unwrap();
        let txs = vec![blob_tx(&keys[0], 0, vec![Blob::new(ns, vec![9u8; 5_000])])];
        let assembler = assembler(funded_store(&keys, params_with_max(2)));
        let metrics: Arc<Metrics> = assembler.metrics();
        let supervisor = ProposalSupervisor::new(assembler, PanicHalt, metrics.clone());

        let outcome = catch_unwind(AssertUnwindSafe(|| {
            supervisor.prepare_proposal(request(txs))
        }));

        let message = outcome
            .unwrap_err()
            .downcast_ref::<String>()
            .cloned()
            .unwrap_or_default();
        assert!(message.starts_with("halted at square_construction"), "{message}");
        assert_eq!(metrics.fatal_failures(Stage::SquareConstruction), 1);
        assert_eq!(metrics.snapshot().proposals_prepared, 0);
    }

    #[test]
    fn test_tx_beyond_capacity_is_dropped_not_fatal() {
        let keys = senders(8);
        // each transfer fits alone, eight of them do not fit in one share
        let txs = transfers(&keys, 128);
        let response = assembler(funded_store(&keys, params_with_max(1)))
            .prepare_proposal(request(txs.clone()))
            .unwrap();

        assert_eq!(response.square_size, 1);
        assert!(!response.txs.is_empty());
        assert!(response.txs.len() < txs.len());
        assert_eq!(response.txs[..], txs[..response.txs.len()]);
    }

    #[test]
    fn test_blob_flow_layout() {
        let keys = senders(3);
        let ns_low = Namespace::new_v0(b"aaa").unwrap();
        let ns_high = Namespace::new_v0(b"zzz").unwrap();
        let txs = vec![
            blob_tx(&keys[0], 0, vec![Blob::new(ns_high, vec![1u8; 700])]),
            send_tx(&keys[1], 0, SINK, 1),
            blob_tx(&keys[2], 0, vec![Blob::new(ns_low, vec![2u8; 100])]),
        ];

        let result = assembler(funded_store(&keys, ChainParams::default()))
            .assemble(&request(txs.clone()))
            .unwrap();
        assert_eq!(result.included_txs, txs);

        let (square, _) = qc_square::build(&txs, 1, 64).unwrap();
        assert_eq!(square.size(), result.square_size);

        let namespaces: Vec<Namespace> = square.shares().iter().map(|s| s.namespace()).collect();
        let tx_end = namespaces.iter().rposition(|n| *n == TX_NAMESPACE).unwrap();
        let pfb_start = namespaces.iter().position(|n| *n == PAY_FOR_BLOB_NAMESPACE).unwrap();
        let low_start = namespaces.iter().position(|n| *n == ns_low).unwrap();
        let high_start = namespaces.iter().position(|n| *n == ns_high).unwrap();
        assert!(tx_end < pfb_start && pfb_start < low_start && low_start < high_start);

        assert_eq!(parse_compact_shares(square.namespace_range(TX_NAMESPACE)).unwrap(), vec![txs[1].clone()]);
        assert_eq!(
            parse_compact_shares(square.namespace_range(PAY_FOR_BLOB_NAMESPACE))
                .unwrap()
                .len(),
            2
        );
        let blobs = parse_sparse_shares(&square.shares()[low_start..]).unwrap();
        assert_eq!(blobs.len(), 2);
        assert_eq!(blobs[0].data, vec![2u8; 100]);
        assert_eq!(blobs[1].data, vec![1u8; 700]);

        let first_row_root = result.dah.row_roots[0];
        assert_eq!(first_row_root.min, TX_NAMESPACE);
        assert!(first_row_root.max < PARITY_NAMESPACE);
        let parity_row = result.dah.row_roots[result.dah.width() - 1];
        assert_eq!(parity_row.min, PARITY_NAMESPACE);
        assert_eq!(parity_row.max, PARITY_NAMESPACE);
    }

    // =============================================================================
    // EXTENSION
    // =============================================================================

    #[test]
    fn test_extension_keeps_original_quadrant() {
        let keys = senders(6);
        let txs = transfers(&keys, 200);
        let (square, _) = qc_square::build(&txs, 1, 64).unwrap();
        let eds = extend_shares(&square.to_bytes()).unwrap();

        assert_eq!(eds.original_width(), square.width());
        for row in 0..square.width() {
            for col in 0..square.width() {
                let original = square.share(row, col).unwrap().as_bytes();
                assert_eq!(eds.cell(row, col).unwrap(), original);
            }
        }
    }

    #[test]
    fn test_any_half_of_a_row_recovers_it() {
        let keys = senders(6);
        let txs = transfers(&keys, 200);
        let (square, _) = qc_square::build(&txs, 1, 64).unwrap();
        let eds = extend_shares(&square.to_bytes()).unwrap();
        let k = eds.original_width();
        let codec = ReedSolomon::new(k).unwrap();

        for row in [0, eds.width() - 1] {
            let full: Vec<Vec<u8>> = eds.row(row).into_iter().map(<[u8]>::to_vec).collect();
            // keep the last k symbols only
            let partial: Vec<Option<Vec<u8>>> = full
                .iter()
                .enumerate()
                .map(|(i, s)| (i >= k).then(|| s.clone()))
                .collect();
            assert_eq!(codec.reconstruct_symbols(&partial).unwrap(), full);
        }
    }
}
