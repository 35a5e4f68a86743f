use crate::domain::entities::{Account, ChainContext, ChainParams};
use crate::domain::errors::StateError;
use crate::ports::StateStore;
use shared_types::Address;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

#[derive(Debug)]
struct Committed {
    height: u64,
    params: ChainParams,
    accounts: Arc<BTreeMap<Address, Account>>,
}

/// In-memory implementation of StateStore
///
/// Each commit swaps in a new account map; contexts handed out earlier keep
/// the map they were opened on.
#[derive(Debug)]
pub struct InMemoryStateStore {
    chain_id: String,
    committed: RwLock<Option<Committed>>,
}

impl InMemoryStateStore {
    /// A store with nothing committed. Opening a context fails until
    /// [`commit`](Self::commit) is called.
    pub fn new(chain_id: impl Into<String>) -> Self {
        Self {
            chain_id: chain_id.into(),
            committed: RwLock::new(None),
        }
    }

    /// A store with genesis committed at height 0.
    pub fn with_genesis(
        chain_id: impl Into<String>,
        accounts: impl IntoIterator<Item = Account>,
        params: ChainParams,
    ) -> Self {
        let accounts = accounts.into_iter().map(|a| (a.address, a)).collect();
        Self {
            chain_id: chain_id.into(),
            committed: RwLock::new(Some(Committed {
                height: 0,
                params,
                accounts: Arc::new(accounts),
            })),
        }
    }

    /// Commit account state for `height`.
    pub fn commit(
        &self,
        height: u64,
        accounts: impl IntoIterator<Item = Account>,
        params: ChainParams,
    ) -> Result<(), StateError> {
        let mut committed = self
            .committed
            .write()
            .map_err(|_| StateError::LockPoisoned)?;
        *committed = Some(Committed {
            height,
            params,
            accounts: Arc::new(accounts.into_iter().map(|a| (a.address, a)).collect()),
        });
        Ok(())
    }
}

impl StateStore for InMemoryStateStore {
    fn chain_id(&self) -> &str {
        &self.chain_id
    }

    fn last_block_height(&self) -> Result<u64, StateError> {
        let committed = self
            .committed
            .read()
            .map_err(|_| StateError::LockPoisoned)?;
        committed
            .as_ref()
            .map(|c| c.height)
            .ok_or(StateError::Uninitialized)
    }

    fn new_proposal_context(&self) -> Result<ChainContext, StateError> {
        let committed = self
            .committed
            .read()
            .map_err(|_| StateError::LockPoisoned)?;
        let committed = committed.as_ref().ok_or(StateError::Uninitialized)?;

        Ok(ChainContext::new(
            self.chain_id.clone(),
            committed.height + 1,
            committed.params.clone(),
            Arc::clone(&committed.accounts),
        ))
    }
}
