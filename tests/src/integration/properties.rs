//! # Pipeline Properties
//!
//! proptest checks that hold for any candidate list:
//!
//! - Determinism across fresh assemblers
//! - Included transactions are an in-order subsequence of the candidates
//! - Square width is a power of two within the governance bound
//! - Dropping invalid candidates does not change the outcome
//! - Any byte change in the square changes the data root
//! - Parallel and sequential execution agree

#[cfg(test)]
mod tests {
    use crate::fixtures::{
        assembler, assembler_modes, funded_store, params_with_max, senders, SINK,
    };
    use proptest::prelude::*;
    use qc_17_proposal_assembly::ProposalPreparer;
    use qc_admission::test_utils::send_tx_with_memo;
    use qc_erasure::extend_shares;
    use qc_nmt::DataAvailabilityHeader;
    use shared_types::RawTx;

    /// Candidate shape: memo length and whether the sequence is stale.
    fn candidate_specs() -> impl Strategy<Value = Vec<(usize, bool)>> {
        prop::collection::vec((0usize..128, prop::bool::weighted(0.25)), 0..12)
    }

    /// One candidate per shape, signed by its own sender.
    fn candidates(specs: &[(usize, bool)]) -> (Vec<ed25519_dalek::SigningKey>, Vec<RawTx>, Vec<bool>) {
        let keys = senders(specs.len() as u8);
        let txs = keys
            .iter()
            .zip(specs)
            .map(|(key, (memo_len, stale))| {
                let sequence = if *stale { 9 } else { 0 };
                send_tx_with_memo(key, sequence, SINK, 1, &"x".repeat(*memo_len))
            })
            .collect();
        let valid = specs.iter().map(|(_, stale)| !stale).collect();
        (keys, txs, valid)
    }

    fn data_root(txs: &[RawTx]) -> [u8; 32] {
        let (square, _) = qc_square::build(txs, 1, 64).unwrap();
        let eds = extend_shares(&square.to_bytes()).unwrap();
        DataAvailabilityHeader::from_eds(&eds).unwrap().hash()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_deterministic(specs in candidate_specs()) {
            let (keys, txs, _) = candidates(&specs);
            let store = funded_store(&keys, params_with_max(64));

            let first = assembler(store.clone()).assemble(&request(&txs)).unwrap();
            let second = assembler(store).assemble(&request(&txs)).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_order_and_size_bound(specs in candidate_specs(), max_exp in 0u32..3) {
            let max = 1u64 << max_exp;
            let (keys, txs, valid) = candidates(&specs);

            let response = assembler(funded_store(&keys, params_with_max(max)))
                .prepare_proposal(request(&txs))
                .unwrap();

            prop_assert!(response.square_size.is_power_of_two());
            prop_assert!(response.square_size <= max);
            let mut rest = txs.iter().zip(&valid);
            for tx in &response.txs {
                prop_assert!(rest.any(|(candidate, ok)| *ok && candidate == tx));
            }
        }

        #[test]
        fn prop_removing_invalid_changes_nothing(specs in candidate_specs()) {
            let (keys, txs, valid) = candidates(&specs);
            let store = funded_store(&keys, params_with_max(64));
            let only_valid: Vec<RawTx> = txs
                .iter()
                .zip(&valid)
                .filter(|(_, ok)| **ok)
                .map(|(tx, _)| tx.clone())
                .collect();

            let with_invalid = assembler(store.clone()).prepare_proposal(request(&txs)).unwrap();
            let without = assembler(store).prepare_proposal(request(&only_valid)).unwrap();
            prop_assert_eq!(&with_invalid.txs, &only_valid);
            prop_assert_eq!(with_invalid, without);
        }

        #[test]
        fn prop_byte_change_changes_root(
            txs in prop::collection::vec(prop::collection::vec(any::<u8>(), 1..300), 1..6),
            pick in any::<prop::sample::Index>(),
            position in any::<prop::sample::Index>(),
            flip in 1u8..=255,
        ) {
            let mut changed = txs.clone();
            let tx = pick.get_mut(&mut changed);
            let at = position.index(tx.len());
            tx[at] ^= flip;
            prop_assert_ne!(data_root(&txs), data_root(&changed));
        }

        #[test]
        fn prop_parallel_matches_sequential(specs in candidate_specs()) {
            let (keys, txs, _) = candidates(&specs);
            let store = funded_store(&keys, params_with_max(64));

            let baseline = assembler_modes(store.clone(), false, false)
                .prepare_proposal(request(&txs))
                .unwrap();
            for (filter, erasure) in [(true, false), (false, true), (true, true)] {
                let other = assembler_modes(store.clone(), filter, erasure)
                    .prepare_proposal(request(&txs))
                    .unwrap();
                prop_assert_eq!(&other, &baseline);
            }
        }
    }

    fn request(txs: &[RawTx]) -> qc_17_proposal_assembly::PrepareProposalRequest {
        qc_17_proposal_assembly::PrepareProposalRequest {
            txs: txs.to_vec(),
            height: 1,
        }
    }
}
