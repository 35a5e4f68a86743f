//! Validity filter
//!
//! Re-checks every candidate against the proposal context. Each candidate is
//! judged on its own branch, so checks are independent and can run on a
//! worker pool; verdicts are collected back in candidate order.

use super::entities::FilterOutcome;
use crate::config::{ConfigError, FilterConfig};
use crate::ports::outbound::TxAdmission;
use qc_admission::{ChainContext, Rejection};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use shared_types::{sha256, short_hex, RawTx};
use tracing::debug;

/// Order-preserving validity filter.
#[derive(Debug)]
pub struct ValidityFilter {
    pool: Option<ThreadPool>,
}

impl ValidityFilter {
    /// Filter that checks candidates one after another.
    pub fn sequential() -> Self {
        Self { pool: None }
    }

    /// Filter per `config`, starting a worker pool when `parallel` is set.
    pub fn new(config: &FilterConfig) -> Result<Self, ConfigError> {
        if !config.parallel {
            return Ok(Self::sequential());
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.workers)
            .thread_name(|i| format!("qc-17-filter-{i}"))
            .build()?;
        Ok(Self { pool: Some(pool) })
    }

    /// Whether checks run on a worker pool.
    pub fn is_parallel(&self) -> bool {
        self.pool.is_some()
    }

    /// Split `candidates` into admitted and rejected. Never fails.
    pub fn filter(
        &self,
        admission: &dyn TxAdmission,
        ctx: &ChainContext,
        candidates: &[RawTx],
    ) -> FilterOutcome {
        let verdicts: Vec<Result<(), Rejection>> = match &self.pool {
            Some(pool) => pool.install(|| {
                candidates
                    .par_iter()
                    .map(|raw| admission.admit(ctx, raw))
                    .collect()
            }),
            None => candidates
                .iter()
                .map(|raw| admission.admit(ctx, raw))
                .collect(),
        };

        let mut outcome = FilterOutcome::default();
        for (index, (raw, verdict)) in candidates.iter().zip(verdicts).enumerate() {
            match verdict {
                Ok(()) => outcome.valid.push(raw.clone()),
                Err(reason) => {
                    debug!(
                        "[qc-17] excluding tx {} ({}): {}",
                        index,
                        short_hex(&sha256(raw)),
                        reason
                    );
                    outcome.rejected.push((index, reason));
                }
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::PredicateAdmission;
    use qc_admission::test_utils::{context_with, funded_account, send_tx, signing_key};

    fn candidates() -> (ChainContext, Vec<RawTx>) {
        let keys: Vec<_> = (1..=6u8).map(signing_key).collect();
        let accounts: Vec<_> = keys.iter().map(|k| funded_account(k, 1_000, 0)).collect();
        let ctx = context_with(&accounts);
        let txs = keys
            .iter()
            .enumerate()
            .map(|(i, key)| {
                // every third candidate has a stale sequence
                let sequence = if i % 3 == 2 { 5 } else { 0 };
                send_tx(key, sequence, [0xEE; 20], 1)
            })
            .collect();
        (ctx, txs)
    }

    #[test]
    fn test_rejections_are_indexed() {
        let (ctx, txs) = candidates();
        let outcome =
            ValidityFilter::sequential().filter(&PredicateAdmission::standard(), &ctx, &txs);

        assert_eq!(outcome.total(), 6);
        assert_eq!(outcome.valid, vec![txs[0].clone(), txs[1].clone(), txs[3].clone(), txs[4].clone()]);
        let rejected: Vec<usize> = outcome.rejected.iter().map(|(i, _)| *i).collect();
        assert_eq!(rejected, vec![2, 5]);
        assert!(matches!(
            outcome.rejected[0].1,
            Rejection::SequenceMismatch { .. }
        ));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let (ctx, txs) = candidates();
        let admission = PredicateAdmission::standard();
        let parallel = ValidityFilter::new(&FilterConfig {
            parallel: true,
            workers: 3,
        })
        .unwrap();
        assert!(parallel.is_parallel());

        assert_eq!(
            parallel.filter(&admission, &ctx, &txs),
            ValidityFilter::sequential().filter(&admission, &ctx, &txs)
        );
    }

    #[test]
    fn test_empty_candidates() {
        let (ctx, _) = candidates();
        let outcome =
            ValidityFilter::sequential().filter(&PredicateAdmission::standard(), &ctx, &[]);
        assert_eq!(outcome, FilterOutcome::default());
    }
}
