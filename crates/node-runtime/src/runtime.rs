//! Proposer runtime: one assembler under one supervisor.

use crate::config::NodeConfig;
use anyhow::{Context, Result};
use qc_17_proposal_assembly::{
    Halt, MetricsSnapshot, PrepareProposalRequest, PrepareProposalResponse, ProcessExit,
    ProposalAssembler, ProposalSupervisor, SUBSYSTEM_ID,
};
use qc_admission::{InMemoryStateStore, StateStore};
use serde::Serialize;
use shared_types::RawTx;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Proposal as written to stdout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProposalOutput {
    /// Height the proposal was built for
    pub height: u64,
    /// Included transactions, hex-encoded
    pub txs: Vec<String>,
    /// Original square width
    pub square_size: u64,
    /// Data root, hex-encoded
    pub data_hash: String,
    /// Counters after this proposal
    pub metrics: MetricsSnapshot,
}

/// Node runtime wiring the state store to the supervised assembler.
pub struct NodeRuntime<H: Halt = ProcessExit> {
    store: Arc<InMemoryStateStore>,
    supervisor: ProposalSupervisor<ProposalAssembler, H>,
}

impl NodeRuntime<ProcessExit> {
    /// Runtime that exits the process on a fatal assembly error.
    pub fn new(config: &NodeConfig, store: InMemoryStateStore) -> Result<Self> {
        Self::with_halt(config, store, ProcessExit)
    }
}

impl<H: Halt> NodeRuntime<H> {
    /// Runtime with a custom halt handler.
    pub fn with_halt(config: &NodeConfig, store: InMemoryStateStore, halt: H) -> Result<Self> {
        info!("===========================================");
        info!("  Quantum-Chain Proposer (qc-{:02})", SUBSYSTEM_ID);
        info!("  Chain: {}", store.chain_id());
        info!("===========================================");

        let store = Arc::new(store);
        let assembler = ProposalAssembler::with_defaults(store.clone(), &config.proposal)
            .context("Failed to build proposal assembler")?;
        let metrics = assembler.metrics();

        Ok(Self {
            store,
            supervisor: ProposalSupervisor::new(assembler, halt, metrics),
        })
    }

    /// Committed state backing the runtime.
    pub fn store(&self) -> &InMemoryStateStore {
        &self.store
    }

    /// Build the proposal for the next height.
    pub fn propose(&self, txs: Vec<RawTx>) -> Result<ProposalOutput> {
        let height = self
            .store
            .last_block_height()
            .context("No committed state to propose on")?
            + 1;
        let _span = quantum_telemetry::subsystem_span!("propose", subsystem = SUBSYSTEM_ID, height)
            .entered();

        let response = self
            .supervisor
            .prepare_proposal(PrepareProposalRequest { txs, height });
        Ok(self.output(height, response))
    }

    fn output(&self, height: u64, response: PrepareProposalResponse) -> ProposalOutput {
        ProposalOutput {
            height,
            txs: response.txs.iter().map(hex::encode).collect(),
            square_size: response.square_size,
            data_hash: hex::encode(response.data_hash),
            metrics: self.supervisor.preparer().metrics().snapshot(),
        }
    }
}

/// Read a JSON array of hex-encoded transactions.
pub fn read_txs(path: &Path) -> Result<Vec<RawTx>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_txs(&text)
}

/// Parse a JSON array of hex-encoded transactions.
pub fn parse_txs(text: &str) -> Result<Vec<RawTx>> {
    let encoded: Vec<String> =
        serde_json::from_str(text).context("Transactions must be a JSON array of hex strings")?;
    encoded
        .iter()
        .enumerate()
        .map(|(i, tx)| {
            hex::decode(tx.trim_start_matches("0x"))
                .with_context(|| format!("Transaction {i} is not valid hex"))
        })
        .collect()
}
