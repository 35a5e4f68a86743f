//! Proposal Assembler Service
//!
//! Runs the five assembly stages strictly in order on the caller's thread:
//!
//! ```text
//! request ─▶ context ─▶ filter ─▶ square ─▶ extend ─▶ commit ─▶ response
//! ```
//!
//! Any stage error aborts the proposal. The assembler never answers with a
//! partial result; what to do with the error is up to the supervisor.

use crate::{
    adapters::{
        GreedySquareBuilder, NmtCommitmentBuilder, PredicateAdmission, RsErasureCoder,
        StoreContextProvider,
    },
    config::{ConfigError, ProposalConfig},
    domain::{
        invariants, package_response, total_bytes, PrepareProposalRequest,
        PrepareProposalResponse, ProposalResult, ValidityFilter,
    },
    error::{AssemblyError, Result, Stage},
    metrics::Metrics,
    ports::{
        CommitmentBuilder, ContextProvider, ErasureCoder, ProposalPreparer, SquareBuilder,
        TxAdmission,
    },
};
use qc_admission::StateStore;
use shared_types::short_hex;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, debug_span, error, info};

/// Proposal assembler wired to one implementation of each outbound port.
pub struct ProposalAssembler {
    context: Arc<dyn ContextProvider>,
    admission: Arc<dyn TxAdmission>,
    square_builder: Arc<dyn SquareBuilder>,
    erasure_coder: Arc<dyn ErasureCoder>,
    commitment: Arc<dyn CommitmentBuilder>,
    filter: ValidityFilter,
    metrics: Arc<Metrics>,
}

impl ProposalAssembler {
    /// Assemble from explicit ports.
    pub fn new(
        context: Arc<dyn ContextProvider>,
        admission: Arc<dyn TxAdmission>,
        square_builder: Arc<dyn SquareBuilder>,
        erasure_coder: Arc<dyn ErasureCoder>,
        commitment: Arc<dyn CommitmentBuilder>,
        filter: ValidityFilter,
    ) -> Self {
        Self {
            context,
            admission,
            square_builder,
            erasure_coder,
            commitment,
            filter,
            metrics: Arc::new(Metrics::new()),
        }
    }

    /// Production wiring over `store`.
    pub fn with_defaults(
        store: Arc<dyn StateStore>,
        config: &ProposalConfig,
    ) -> std::result::Result<Self, ConfigError> {
        info!("[qc-17] Initializing Proposal Assembler");
        info!("  Chain: {}", store.chain_id());
        info!(
            "  Filter: {}",
            if config.filter.parallel {
                "parallel"
            } else {
                "sequential"
            }
        );
        info!("  Erasure parallel: {}", config.erasure.parallel);

        Ok(Self::new(
            Arc::new(StoreContextProvider::new(store)),
            Arc::new(PredicateAdmission::standard()),
            Arc::new(GreedySquareBuilder),
            Arc::new(RsErasureCoder::new(config.erasure.parallel)),
            Arc::new(NmtCommitmentBuilder),
            ValidityFilter::new(&config.filter)?,
        ))
    }

    /// Share a metrics collector with other components.
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Metrics collector.
    pub fn metrics(&self) -> Arc<Metrics> {
        Arc::clone(&self.metrics)
    }

    fn run_stage<T>(&self, stage: Stage, f: impl FnOnce() -> Result<T>) -> Result<T> {
        let _span = debug_span!("stage", name = stage.as_str()).entered();
        let started = Instant::now();
        let outcome = f();
        self.metrics.record_stage_time(stage, started.elapsed());
        outcome
    }

    /// Run the pipeline without packaging the result.
    #[tracing::instrument(name = "prepare_proposal", skip_all, fields(height = request.height))]
    pub fn assemble(&self, request: &PrepareProposalRequest) -> Result<ProposalResult> {
        let ctx = self.run_stage(Stage::ContextAcquisition, || {
            let ctx = self.context.proposal_context()?;
            if ctx.height() != request.height {
                return Err(AssemblyError::HeightMismatch {
                    expected: ctx.height(),
                    requested: request.height,
                });
            }
            Ok(ctx)
        })?;

        let filtered = self.run_stage(Stage::Filtering, || {
            let outcome = self
                .filter
                .filter(self.admission.as_ref(), &ctx, &request.txs);
            Ok(outcome.valid)
        })?;
        self.metrics.record_filter(request.txs.len(), filtered.len());
        info!(
            "[qc-17] height {}: {} candidates, {} passed validity filter",
            request.height,
            request.txs.len(),
            filtered.len()
        );

        let app_version = ctx.params().app_version;
        let max_square_size = ctx.gov_square_size_upper_bound();
        let (square, included_txs) = self.run_stage(Stage::SquareConstruction, || {
            let (square, included) =
                self.square_builder
                    .build(&filtered, app_version, max_square_size)?;
            invariants::check_order_preserving(&filtered, &included)?;
            invariants::check_square_size(square.size(), max_square_size)?;
            Ok((square, included))
        })?;
        debug!(
            "[qc-17] square size {} holds {} of {} txs",
            square.size(),
            included_txs.len(),
            filtered.len()
        );

        let eds = self.run_stage(Stage::ErasureCoding, || {
            let shares = square.to_bytes();
            self.erasure_coder.extend(&shares).map_err(|source| {
                error!(
                    height = request.height,
                    square_size = square.size(),
                    share_count = shares.len(),
                    error = %source,
                    "failure to erasure the data square while creating a proposal block"
                );
                AssemblyError::ErasureCoding {
                    source,
                    height: request.height,
                    square_size: square.size(),
                    share_count: shares.len(),
                }
            })
        })?;

        let dah = self.run_stage(Stage::Commitment, || Ok(self.commitment.commit(&eds)?))?;
        let data_root = dah.hash();
        debug!("[qc-17] data root {}", short_hex(&data_root));

        Ok(ProposalResult {
            included_txs,
            square_size: square.size(),
            data_root,
            dah,
        })
    }
}

impl ProposalPreparer for ProposalAssembler {
    fn prepare_proposal(&self, request: PrepareProposalRequest) -> Result<PrepareProposalResponse> {
        let result = self.assemble(&request)?;

        let tx_count = result.included_txs.len();
        let bytes = total_bytes(&result.included_txs);
        self.metrics.record_proposal(tx_count, bytes);
        if tx_count > 0 {
            info!(
                "[qc-17] proposal block {} created with {} txs and {} bytes",
                request.height, tx_count, bytes
            );
        }

        Ok(package_response(result))
    }
}
