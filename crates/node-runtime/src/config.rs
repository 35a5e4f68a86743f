//! # Node Configuration
//!
//! Loaded from an optional TOML file, then overridden by `QC_*` environment
//! variables:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `QC_FILTER_PARALLEL` | `proposal.filter.parallel` |
//! | `QC_FILTER_WORKERS` | `proposal.filter.workers` |
//! | `QC_ERASURE_PARALLEL` | `proposal.erasure.parallel` |
//! | `QC_PRETTY_OUTPUT` | `pretty_output` |

use qc_17_proposal_assembly::ProposalConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Complete node configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Proposal assembly configuration.
    pub proposal: ProposalConfig,
    /// Pretty-print the JSON proposal written to stdout.
    pub pretty_output: bool,
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum NodeConfigError {
    /// Config file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Read {
        /// File that was requested
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`NodeConfig`].
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        /// File that was requested
        path: PathBuf,
        /// Underlying parse error
        source: toml::de::Error,
    },
}

impl NodeConfig {
    /// Load from `path` if given, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, NodeConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, NodeConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| NodeConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&text).map_err(|source| NodeConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Apply `QC_*` overrides read through `lookup`. Unparseable values are
    /// logged and ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = parse_var(&lookup, "QC_FILTER_PARALLEL", parse_bool) {
            self.proposal.filter.parallel = v;
        }
        if let Some(v) = parse_var(&lookup, "QC_FILTER_WORKERS", |s| s.parse().ok()) {
            self.proposal.filter.workers = v;
        }
        if let Some(v) = parse_var(&lookup, "QC_ERASURE_PARALLEL", parse_bool) {
            self.proposal.erasure.parallel = v;
        }
        if let Some(v) = parse_var(&lookup, "QC_PRETTY_OUTPUT", parse_bool) {
            self.pretty_output = v;
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    let raw = lookup(key)?;
    let parsed = parse(raw.trim());
    if parsed.is_none() {
        warn!("Ignoring {}={:?}: not a valid value", key, raw);
    }
    parsed
}
