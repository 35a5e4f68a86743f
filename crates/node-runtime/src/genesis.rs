//! # Genesis State
//!
//! JSON description of the committed state the proposer starts from:
//!
//! ```json
//! {
//!   "chain_id": "qc-devnet",
//!   "params": { "min_gas_price": 1, "gov_max_square_size": 64, "app_version": 1 },
//!   "accounts": [ { "public_key": "<64 hex chars>", "balance": 1000000 } ]
//! }
//! ```

use qc_admission::{Account, ChainParams, InMemoryStateStore};
use serde::{Deserialize, Serialize};
use shared_types::{PublicKey, MAX_SQUARE_SIZE_UPPER_BOUND};
use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;

/// Genesis loading errors.
#[derive(Debug, Error)]
pub enum GenesisError {
    /// Genesis file could not be read.
    #[error("Failed to read genesis file: {0}")]
    Read(#[from] std::io::Error),

    /// Genesis file is not valid JSON for [`GenesisFile`].
    #[error("Failed to parse genesis file: {0}")]
    Parse(#[from] serde_json::Error),

    /// Invalid genesis configuration.
    #[error("Invalid genesis configuration: {0}")]
    InvalidConfig(String),
}

/// One funded account at genesis.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GenesisAccount {
    /// Hex-encoded Ed25519 public key.
    pub public_key: String,
    /// Initial balance.
    pub balance: u64,
    /// Next expected sequence.
    #[serde(default)]
    pub sequence: u64,
}

/// Genesis file contents.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GenesisFile {
    /// Chain identifier transactions must be signed for.
    pub chain_id: String,
    /// Governance parameters.
    #[serde(default)]
    pub params: ChainParams,
    /// Funded accounts.
    #[serde(default)]
    pub accounts: Vec<GenesisAccount>,
}

impl GenesisFile {
    /// Read and parse `path`.
    pub fn load(path: &Path) -> Result<Self, GenesisError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parse a JSON document.
    pub fn from_json(text: &str) -> Result<Self, GenesisError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Validate and decode the account list.
    pub fn accounts(&self) -> Result<Vec<Account>, GenesisError> {
        if self.chain_id.is_empty() {
            return Err(GenesisError::InvalidConfig("chain_id is empty".into()));
        }
        let max = self.params.gov_max_square_size;
        if max == 0 || !max.is_power_of_two() || max > MAX_SQUARE_SIZE_UPPER_BOUND as u64 {
            return Err(GenesisError::InvalidConfig(format!(
                "gov_max_square_size {max} must be a power of two in 1..={MAX_SQUARE_SIZE_UPPER_BOUND}"
            )));
        }

        let mut seen = BTreeSet::new();
        let mut accounts = Vec::with_capacity(self.accounts.len());
        for (index, entry) in self.accounts.iter().enumerate() {
            let public_key = decode_public_key(&entry.public_key).ok_or_else(|| {
                GenesisError::InvalidConfig(format!("account {index}: public_key is not 32 hex bytes"))
            })?;
            if !seen.insert(public_key) {
                return Err(GenesisError::InvalidConfig(format!(
                    "account {index}: duplicate public_key"
                )));
            }
            let mut account = Account::new(public_key, entry.balance);
            account.sequence = entry.sequence;
            accounts.push(account);
        }
        Ok(accounts)
    }

    /// Commit this state at height 0 in a fresh store.
    pub fn into_store(self) -> Result<InMemoryStateStore, GenesisError> {
        let accounts = self.accounts()?;
        Ok(InMemoryStateStore::with_genesis(
            self.chain_id,
            accounts,
            self.params,
        ))
    }
}

fn decode_public_key(text: &str) -> Option<PublicKey> {
    let bytes = hex::decode(text.trim_start_matches("0x")).ok()?;
    bytes.try_into().ok()
}
