//! Fatal error supervisor
//!
//! Sits between the consensus callback and the assembler. A proposal either
//! comes back complete or the node stops: there is no error reply to send.

use crate::domain::{PrepareProposalRequest, PrepareProposalResponse};
use crate::error::AssemblyError;
use crate::metrics::Metrics;
use crate::ports::ProposalPreparer;
use crate::FATAL_EXIT_CODE;
use std::sync::Arc;
use tracing::error;

/// Terminates the node after a fatal assembly error.
pub trait Halt: Send + Sync {
    /// Stop the node. Must not return.
    fn halt(&self, err: &AssemblyError) -> !;
}

/// Exits the process with [`FATAL_EXIT_CODE`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessExit;

impl Halt for ProcessExit {
    fn halt(&self, err: &AssemblyError) -> ! {
        error!(
            "[qc-17] halting node: {} (exit code {})",
            err, FATAL_EXIT_CODE
        );
        std::process::exit(FATAL_EXIT_CODE)
    }
}

/// Runs a [`ProposalPreparer`] and halts on any error.
pub struct ProposalSupervisor<P, H = ProcessExit> {
    preparer: P,
    halt: H,
    metrics: Arc<Metrics>,
}

impl<P: ProposalPreparer, H: Halt> ProposalSupervisor<P, H> {
    /// Supervise `preparer`, recording fatal failures into `metrics`.
    pub fn new(preparer: P, halt: H, metrics: Arc<Metrics>) -> Self {
        Self {
            preparer,
            halt,
            metrics,
        }
    }

    /// Supervised preparer.
    pub fn preparer(&self) -> &P {
        &self.preparer
    }

    /// Prepare a proposal. Returns only on success.
    pub fn prepare_proposal(&self, request: PrepareProposalRequest) -> PrepareProposalResponse {
        let height = request.height;
        match self.preparer.prepare_proposal(request) {
            Ok(response) => response,
            Err(err) => {
                let stage = err.stage();
                error!(
                    height,
                    stage = stage.as_str(),
                    error = %err,
                    "[qc-17] fatal error while preparing proposal"
                );
                self.metrics.record_fatal(stage);
                self.halt.halt(&err)
            }
        }
    }
}
