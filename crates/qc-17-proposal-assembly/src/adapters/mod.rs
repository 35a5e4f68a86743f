//! Adapters binding the outbound ports to the pipeline crates

pub mod admission;
pub mod coding;
pub mod state;

pub use admission::PredicateAdmission;
pub use coding::{GreedySquareBuilder, NmtCommitmentBuilder, RsErasureCoder};
pub use state::StoreContextProvider;
