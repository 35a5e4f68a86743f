//! Domain entities for admission

use serde::{Deserialize, Serialize};
use shared_types::{Address, PublicKey, DEFAULT_GOV_MAX_SQUARE_SIZE};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Committed account state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account address (`sha256(public_key)[..20]`)
    pub address: Address,
    /// Ed25519 public key authorised to sign for this account
    pub public_key: PublicKey,
    /// Next expected transaction sequence
    pub sequence: u64,
    /// Spendable balance in base units
    pub balance: u64,
}

impl Account {
    /// Create a fresh account for `public_key`.
    pub fn new(public_key: PublicKey, balance: u64) -> Self {
        Self {
            address: shared_types::address_from_public_key(&public_key),
            public_key,
            sequence: 0,
            balance,
        }
    }
}

/// Governance parameters read during admission and square construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainParams {
    /// Minimum price per unit of gas
    pub min_gas_price: u64,
    /// Governance upper bound on the square width
    pub gov_max_square_size: u64,
    /// Application version used for share layout rules
    pub app_version: u64,
}

impl Default for ChainParams {
    fn default() -> Self {
        Self {
            min_gas_price: 1,
            gov_max_square_size: DEFAULT_GOV_MAX_SQUARE_SIZE as u64,
            app_version: 1,
        }
    }
}

/// Immutable read branch of committed state scoped to one proposal height.
///
/// Cloning is cheap: the account map is shared behind an `Arc` and no method
/// hands out mutable access.
#[derive(Clone, Debug)]
pub struct ChainContext {
    chain_id: String,
    height: u64,
    params: ChainParams,
    accounts: Arc<BTreeMap<Address, Account>>,
}

impl ChainContext {
    /// Create a context for the block at `height`.
    pub fn new(
        chain_id: impl Into<String>,
        height: u64,
        params: ChainParams,
        accounts: Arc<BTreeMap<Address, Account>>,
    ) -> Self {
        Self {
            chain_id: chain_id.into(),
            height,
            params,
            accounts,
        }
    }

    /// Chain identifier the branch was opened for.
    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    /// Height of the block being proposed.
    pub fn height(&self) -> u64 {
        self.height
    }

    /// Governance parameters.
    pub fn params(&self) -> &ChainParams {
        &self.params
    }

    /// Governance upper bound on the square width.
    pub fn gov_square_size_upper_bound(&self) -> u64 {
        self.params.gov_max_square_size
    }

    /// Committed account, if any.
    pub fn account(&self, address: &Address) -> Option<&Account> {
        self.accounts.get(address)
    }

    /// Number of committed accounts.
    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    /// Shared handle to the committed account map.
    pub fn accounts_arc(&self) -> Arc<BTreeMap<Address, Account>> {
        Arc::clone(&self.accounts)
    }
}
