//! Context provider backed by a [`StateStore`]

use crate::ports::outbound::ContextProvider;
use qc_admission::{ChainContext, StateError, StateStore};
use std::sync::Arc;

/// Opens proposal contexts on a shared state store.
#[derive(Clone)]
pub struct StoreContextProvider {
    store: Arc<dyn StateStore>,
}

impl StoreContextProvider {
    /// Wrap `store`.
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }
}

impl ContextProvider for StoreContextProvider {
    fn proposal_context(&self) -> Result<ChainContext, StateError> {
        self.store.new_proposal_context()
    }
}
