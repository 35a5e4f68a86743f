//! # Quantum-Chain Proposer
//!
//! Prepares one block proposal from a genesis state and a list of candidate
//! transactions, and prints the result as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use node_runtime::{read_txs, GenesisFile, NodeConfig, NodeRuntime};
use qc_17_proposal_assembly::SUBSYSTEM_ID;
use quantum_telemetry::{init_logging, TelemetryConfig};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "node-runtime")]
#[command(about = "Prepare a data-availability block proposal")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, env = "QC_CONFIG")]
    config: Option<PathBuf>,

    /// Genesis state (JSON)
    #[arg(short, long, env = "QC_GENESIS")]
    genesis: PathBuf,

    /// Candidate transactions (JSON array of hex strings)
    #[arg(short, long)]
    txs: Option<PathBuf>,

    /// Pretty-print the proposal
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&TelemetryConfig::for_subsystem(SUBSYSTEM_ID, "proposal-assembly"))?;

    let mut config = NodeConfig::load(cli.config.as_deref())?;
    config.pretty_output |= cli.pretty;

    let store = GenesisFile::load(&cli.genesis)
        .and_then(GenesisFile::into_store)
        .with_context(|| format!("Failed to load genesis from {}", cli.genesis.display()))?;
    let txs = match &cli.txs {
        Some(path) => read_txs(path)?,
        None => Vec::new(),
    };
    info!("Loaded {} candidate transactions", txs.len());

    let runtime = NodeRuntime::new(&config, store)?;
    let output = runtime.propose(txs)?;

    let json = if config.pretty_output {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{json}");
    Ok(())
}
