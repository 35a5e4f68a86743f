//! Configuration types for proposal assembly

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Runtime configuration for proposal assembly
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProposalConfig {
    /// Validity filter tuning
    pub filter: FilterConfig,

    /// Erasure coder tuning
    pub erasure: ErasureConfig,
}

/// Validity filter configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Check candidates on a dedicated worker pool
    pub parallel: bool,

    /// Worker count for the pool (0 = one per CPU)
    pub workers: usize,
}

/// Erasure coder configuration
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ErasureConfig {
    /// Extend rows and columns on the global rayon pool
    pub parallel: bool,
}

impl Default for ErasureConfig {
    fn default() -> Self {
        Self { parallel: true }
    }
}

/// Invalid configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Filter worker pool could not be started
    #[error("Failed to build filter worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}
