//! Domain layer for transaction admission

pub mod branch;
pub mod checks;
pub mod entities;
pub mod errors;
pub mod tx;
