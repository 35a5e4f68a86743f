//! # Quantum Chain - Proposal Assembly (Subsystem 17)
//!
//! **Bounded Context:** Block Proposal & Data Availability
//! **Architecture Compliance:** DDD + Hexagonal + TDD
//!
//! ## Purpose
//!
//! When this node is the proposer, the consensus engine hands over an ordered
//! list of candidate transactions. This subsystem returns the transactions to
//! include, the data square width and the data root the block header commits
//! to:
//!
//! - Re-validation of every candidate against committed state
//! - Greedy, order-preserving packing into a power-of-two share square
//! - 2D Reed-Solomon extension of the square
//! - Namespaced Merkle commitment over rows and columns
//!
//! ## Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Supervisor                                         │
//! │  - ProposalSupervisor: halt on any AssemblyError    │
//! └─────────────────────────────────────────────────────┘
//!                         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Service                                            │
//! │  - ProposalAssembler: five sequential stages        │
//! └─────────────────────────────────────────────────────┘
//!                         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Ports                                              │
//! │  - Inbound: ProposalPreparer                        │
//! │  - Outbound: ContextProvider, TxAdmission,          │
//! │    SquareBuilder, ErasureCoder, CommitmentBuilder   │
//! └─────────────────────────────────────────────────────┘
//!                         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (Inner - Pure Logic)                        │
//! │  - ValidityFilter                                   │
//! │  - Builder post-condition checks                    │
//! │  - Response packaging                               │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Critical Invariants
//!
//! 1. **Order**: included txs are a subsequence of the candidates, in order
//! 2. **Isolation**: one candidate's admission never depends on another's
//! 3. **Size Bound**: square width is a power of two, ≤ governance maximum
//! 4. **Determinism**: same candidates and state give the same data root
//! 5. **No Partial Proposals**: every stage error halts the node
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! let store = Arc::new(InMemoryStateStore::with_genesis("qc-dev", accounts, params));
//! let assembler = ProposalAssembler::with_defaults(store, &ProposalConfig::default())?;
//! let metrics = assembler.metrics();
//! let supervisor = ProposalSupervisor::new(assembler, ProcessExit, metrics);
//! let response = supervisor.prepare_proposal(PrepareProposalRequest { txs, height: 1 });
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;
pub mod supervisor;

pub use config::{ConfigError, ErasureConfig, FilterConfig, ProposalConfig};
pub use domain::{
    FilterOutcome, PrepareProposalRequest, PrepareProposalResponse, ProposalResult,
    ValidityFilter,
};
pub use error::{AssemblyError, Result, Stage};
pub use metrics::{Metrics, MetricsSnapshot};
pub use ports::{
    CommitmentBuilder, ContextProvider, ErasureCoder, ProposalPreparer, SquareBuilder,
    TxAdmission,
};
pub use service::ProposalAssembler;
pub use supervisor::{Halt, ProcessExit, ProposalSupervisor};

/// Subsystem identifier used in log prefixes.
pub const SUBSYSTEM_ID: u8 = 17;

/// Process exit code after a fatal assembly error (`EX_SOFTWARE`).
pub const FATAL_EXIT_CODE: i32 = 70;
