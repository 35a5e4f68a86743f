//! # Proposal Pipeline Benchmarks
//!
//! | Stage | Input |
//! |-------|-------|
//! | Validity filter | signed transfers, sequential vs pool |
//! | Square construction | random payloads |
//! | Erasure coding | full k×k squares, k = 8..64 |
//! | Commitment | row/column roots + data root |
//! | End to end | `prepare_proposal` |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use qc_17_proposal_assembly::adapters::PredicateAdmission;
use qc_17_proposal_assembly::{
    FilterConfig, PrepareProposalRequest, ProposalPreparer, ValidityFilter,
};
use qc_admission::StateStore;
use qc_erasure::{extend_shares, Extender};
use qc_nmt::DataAvailabilityHeader;
use qc_tests::fixtures::{assembler, funded_store, params_with_max, senders, transfers};
use rand::{Rng, SeedableRng};
use shared_types::SHARE_SIZE;
use std::time::Duration;

fn random_payloads(count: usize, max_len: usize) -> Vec<Vec<u8>> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(17);
    (0..count)
        .map(|_| {
            let len = rng.gen_range(1..=max_len);
            (0..len).map(|_| rng.gen()).collect()
        })
        .collect()
}

fn random_square(width: usize) -> Vec<Vec<u8>> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(width as u64);
    (0..width * width)
        .map(|_| (0..SHARE_SIZE).map(|_| rng.gen()).collect())
        .collect()
}

// ============================================================================
// Validity filter
// ============================================================================

fn bench_validity_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-17-validity-filter");
    group.measurement_time(Duration::from_secs(10));

    let keys = senders(200);
    let txs = transfers(&keys, 64);
    let store = funded_store(&keys, params_with_max(64));
    let ctx = store.new_proposal_context().expect("genesis committed");
    let admission = PredicateAdmission::standard();

    let sequential = ValidityFilter::sequential();
    let pooled = ValidityFilter::new(&FilterConfig {
        parallel: true,
        workers: 0,
    })
    .expect("pool starts");

    group.throughput(Throughput::Elements(txs.len() as u64));
    group.bench_function("sequential_200", |b| {
        b.iter(|| black_box(sequential.filter(&admission, &ctx, &txs)))
    });
    group.bench_function("pooled_200", |b| {
        b.iter(|| black_box(pooled.filter(&admission, &ctx, &txs)))
    });

    group.finish();
}

// ============================================================================
// Square construction
// ============================================================================

fn bench_square_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-square-build");

    for count in [100, 1_000, 5_000] {
        let txs = random_payloads(count, 600);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("greedy", count), &txs, |b, txs| {
            b.iter(|| black_box(qc_square::build(txs, 1, 64)))
        });
    }

    group.finish();
}

// ============================================================================
// Erasure coding & commitment
// ============================================================================

fn bench_erasure_and_commitment(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-erasure-extend");
    group.sample_size(10);

    for width in [8, 32, 64] {
        let shares = random_square(width);
        group.throughput(Throughput::Bytes((shares.len() * SHARE_SIZE) as u64));
        group.bench_with_input(BenchmarkId::new("parallel", width), &shares, |b, shares| {
            b.iter(|| black_box(Extender::new(true).extend(shares)))
        });
        group.bench_with_input(BenchmarkId::new("sequential", width), &shares, |b, shares| {
            b.iter(|| black_box(Extender::new(false).extend(shares)))
        });
    }
    group.finish();

    let mut group = c.benchmark_group("qc-nmt-commit");
    group.sample_size(10);
    for width in [8, 32, 64] {
        // random bytes break namespace order, so commit over a built square
        let txs = random_payloads(width * width / 2, 400);
        let (square, _) = qc_square::build(&txs, 1, width as u64).expect("square builds");
        let eds = extend_shares(&square.to_bytes()).expect("square extends");
        group.bench_with_input(BenchmarkId::new("dah", width), &eds, |b, eds| {
            b.iter(|| black_box(DataAvailabilityHeader::from_eds(eds).map(|d| d.hash())))
        });
    }
    group.finish();
}

// ============================================================================
// End to end
// ============================================================================

fn bench_prepare_proposal(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-17-prepare-proposal");
    group.sample_size(10);

    let keys = senders(100);
    let txs = transfers(&keys, 128);
    let service = assembler(funded_store(&keys, params_with_max(64)));

    group.throughput(Throughput::Elements(txs.len() as u64));
    group.bench_function("transfers_100", |b| {
        b.iter(|| {
            black_box(service.prepare_proposal(PrepareProposalRequest {
                txs: txs.clone(),
                height: 1,
            }))
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_validity_filter,
    bench_square_construction,
    bench_erasure_and_commitment,
    bench_prepare_proposal,
);
criterion_main!(benches);
