//! # Quantum-Chain Test Suite
//!
//! Unified test crate for the proposal pipeline.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs        # Funded state, signed candidates, wired assemblers
//! └── integration/
//!     ├── proposal_flow.rs   # End-to-end scenarios through the supervisor
//!     └── properties.rs      # proptest properties over the whole pipeline
//! tests/benches/
//! └── proposal_benchmarks.rs # criterion: filter, square, extend, commit
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p qc-tests
//!
//! # By category
//! cargo test -p qc-tests integration::proposal_flow::
//! cargo test -p qc-tests integration::properties::
//!
//! # Benchmarks
//! cargo bench -p qc-tests
//! ```

pub mod fixtures;
pub mod integration;
