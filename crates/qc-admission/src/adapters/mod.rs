//! Adapters for transaction admission

pub mod memory_store;

pub use memory_store::InMemoryStateStore;
