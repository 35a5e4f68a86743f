//! Copy-on-write account overlay
//!
//! A [`TxBranch`] reads through to the immutable [`ChainContext`] and keeps
//! its own writes in a local map. Dropping the branch discards every write.

use super::entities::{Account, ChainContext};
use shared_types::Address;
use std::collections::HashMap;

/// Scratch state for checking a single transaction.
pub struct TxBranch<'a> {
    ctx: &'a ChainContext,
    writes: HashMap<Address, Account>,
}

impl<'a> TxBranch<'a> {
    /// Open an empty overlay on top of `ctx`.
    pub fn new(ctx: &'a ChainContext) -> Self {
        Self {
            ctx,
            writes: HashMap::new(),
        }
    }

    /// Context the overlay reads through to.
    pub fn context(&self) -> &ChainContext {
        self.ctx
    }

    /// Current view of an account: overlay first, then committed state.
    pub fn account(&self, address: &Address) -> Option<Account> {
        self.writes
            .get(address)
            .or_else(|| self.ctx.account(address))
            .cloned()
    }

    /// Write an account into the overlay.
    pub fn set_account(&mut self, account: Account) {
        self.writes.insert(account.address, account);
    }

    /// Number of accounts written so far.
    pub fn dirty_count(&self) -> usize {
        self.writes.len()
    }
}
