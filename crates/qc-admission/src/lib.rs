//! # Transaction Admission (qc-admission)
//!
//! Re-checks candidate transactions against committed state before they are
//! packed into a proposal.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): chain context, transaction codec, the
//!   copy-on-write [`TxBranch`] and the composed [`AdmissionPredicate`]
//! - **Ports Layer** (`ports/`): [`StateStore`], the read side of committed state
//! - **Adapters** (`adapters/`): [`InMemoryStateStore`]
//!
//! ## Isolation
//!
//! Every transaction is checked against its own [`TxBranch`]. Writes made by
//! a check (fee deduction, sequence bump) land in that overlay only and are
//! dropped once the verdict is known, so the outcome of one candidate never
//! depends on any other candidate.
//!
//! ## Standard check order
//!
//! 1. `validate_basic`
//! 2. `check_chain_id`
//! 3. `check_min_fee`
//! 4. `verify_signature`
//! 5. `check_sequence`
//! 6. `deduct_fee`
//! 7. `check_messages`
//! 8. `increment_sequence`

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use adapters::InMemoryStateStore;
pub use domain::branch::TxBranch;
pub use domain::checks::{AdmissionPredicate, Check};
pub use domain::entities::{Account, ChainContext, ChainParams};
pub use domain::errors::{DecodeError, Rejection, StateError};
pub use domain::tx::{decode_raw, DecodedTx, Message, Transaction, TxBody};
pub use ports::StateStore;

/// Maximum memo length accepted by `validate_basic`.
pub const MAX_MEMO_LEN: usize = 256;
