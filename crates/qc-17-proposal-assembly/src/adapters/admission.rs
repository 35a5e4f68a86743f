//! Admission adapter over the composed check chain

use crate::ports::outbound::TxAdmission;
use qc_admission::{AdmissionPredicate, ChainContext, Rejection};

/// [`TxAdmission`] backed by an [`AdmissionPredicate`].
#[derive(Debug)]
pub struct PredicateAdmission {
    predicate: AdmissionPredicate,
}

impl PredicateAdmission {
    /// Admission with a custom check chain.
    pub fn new(predicate: AdmissionPredicate) -> Self {
        Self { predicate }
    }

    /// Admission with the standard check chain.
    pub fn standard() -> Self {
        Self::new(AdmissionPredicate::standard())
    }
}

impl TxAdmission for PredicateAdmission {
    fn admit(&self, ctx: &ChainContext, raw: &[u8]) -> Result<(), Rejection> {
        self.predicate.admit(ctx, raw)
    }
}
