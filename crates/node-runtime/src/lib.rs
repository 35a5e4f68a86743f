//! # Quantum-Chain Node Runtime
//!
//! Wiring for the proposer binary.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging (`quantum-telemetry`)
//! 2. Load configuration (TOML file, then `QC_*` environment)
//! 3. Load genesis state into the in-memory state store
//! 4. Build the proposal assembler and wrap it in the supervisor
//! 5. Prepare the proposal for `last height + 1` and print it as JSON
//!
//! A fatal assembly error never reaches step 5's output: the supervisor
//! terminates the process with exit code 70.

pub mod config;
pub mod genesis;
pub mod runtime;

pub use config::{NodeConfig, NodeConfigError};
pub use genesis::{GenesisAccount, GenesisError, GenesisFile};
pub use runtime::{parse_txs, read_txs, NodeRuntime, ProposalOutput};
