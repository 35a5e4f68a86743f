//! Domain layer for proposal assembly

pub mod entities;
pub mod filter;
pub mod invariants;
pub mod packaging;

pub use entities::*;
pub use filter::ValidityFilter;
pub use packaging::{package_response, total_bytes};
