//! Metrics collection for proposal assembly

use crate::error::Stage;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Metrics collector for proposal assembly
#[derive(Debug, Default)]
pub struct Metrics {
    /// Proposals returned to consensus
    pub proposals_prepared: AtomicU64,

    /// Candidates received, summed over proposals
    pub candidates_received: AtomicU64,

    /// Candidates that passed the validity filter
    pub candidates_admitted: AtomicU64,

    /// Transactions included in returned proposals
    pub txs_included: AtomicU64,

    /// Bytes of included transactions
    pub bytes_included: AtomicU64,

    /// Candidates seen by the last proposal, before filtering
    pub last_pre_filter: AtomicU64,

    /// Candidates left after filtering in the last proposal
    pub last_post_filter: AtomicU64,

    /// Fatal failures per stage
    fatal_failures: [AtomicU64; Stage::COUNT],

    /// Time spent per stage (microseconds)
    stage_time_us: [AtomicU64; Stage::COUNT],
}

impl Metrics {
    /// Create new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record filter counts for one proposal
    pub fn record_filter(&self, pre: usize, post: usize) {
        self.candidates_received
            .fetch_add(pre as u64, Ordering::Relaxed);
        self.candidates_admitted
            .fetch_add(post as u64, Ordering::Relaxed);
        self.last_pre_filter.store(pre as u64, Ordering::Relaxed);
        self.last_post_filter.store(post as u64, Ordering::Relaxed);
    }

    /// Record a proposal handed back to consensus
    pub fn record_proposal(&self, tx_count: usize, bytes: usize) {
        self.proposals_prepared.fetch_add(1, Ordering::Relaxed);
        self.txs_included
            .fetch_add(tx_count as u64, Ordering::Relaxed);
        self.bytes_included.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    /// Record a fatal failure
    pub fn record_fatal(&self, stage: Stage) {
        self.fatal_failures[stage.index()].fetch_add(1, Ordering::Relaxed);
    }

    /// Record time spent in a stage
    pub fn record_stage_time(&self, stage: Stage, elapsed: Duration) {
        self.stage_time_us[stage.index()]
            .fetch_add(elapsed.as_micros() as u64, Ordering::Relaxed);
    }

    /// Fatal failures recorded for `stage`
    pub fn fatal_failures(&self, stage: Stage) -> u64 {
        self.fatal_failures[stage.index()].load(Ordering::Relaxed)
    }

    /// Total time spent in `stage` (microseconds)
    pub fn stage_time_us(&self, stage: Stage) -> u64 {
        self.stage_time_us[stage.index()].load(Ordering::Relaxed)
    }

    /// Point-in-time copy of every counter
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            proposals_prepared: self.proposals_prepared.load(Ordering::Relaxed),
            candidates_received: self.candidates_received.load(Ordering::Relaxed),
            candidates_admitted: self.candidates_admitted.load(Ordering::Relaxed),
            txs_included: self.txs_included.load(Ordering::Relaxed),
            bytes_included: self.bytes_included.load(Ordering::Relaxed),
            last_pre_filter: self.last_pre_filter.load(Ordering::Relaxed),
            last_post_filter: self.last_post_filter.load(Ordering::Relaxed),
            fatal_failures: Stage::ALL
                .iter()
                .map(|s| (*s, self.fatal_failures(*s)))
                .collect(),
            stage_time_us: Stage::ALL
                .iter()
                .map(|s| (*s, self.stage_time_us(*s)))
                .collect(),
        }
    }
}

/// Serializable copy of [`Metrics`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    /// Proposals returned to consensus
    pub proposals_prepared: u64,
    /// Candidates received
    pub candidates_received: u64,
    /// Candidates admitted
    pub candidates_admitted: u64,
    /// Transactions included
    pub txs_included: u64,
    /// Bytes included
    pub bytes_included: u64,
    /// Last proposal, before filtering
    pub last_pre_filter: u64,
    /// Last proposal, after filtering
    pub last_post_filter: u64,
    /// Fatal failures per stage
    pub fatal_failures: Vec<(Stage, u64)>,
    /// Microseconds per stage
    pub stage_time_us: Vec<(Stage, u64)>,
}
