//! Outage simulation benchmarks over the spanning tree of a synthetic grid.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use gridlink_benches::{
    error::BenchSetupError,
    params::OutageBenchParams,
    source::{SyntheticConfig, SyntheticGrid},
};
use gridlink_core::{simulate_outage, spanning_forest};

const SEED: u64 = 42;

const NODE_COUNT: usize = 10_000;

/// Numbers of disabled spanning tree links to benchmark.
const FAILED_LINK_COUNTS: &[usize] = &[1, 16, 256];

fn outage_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("outage");
    group.sample_size(20);

    let grid = SyntheticGrid::generate(&SyntheticConfig {
        node_count: NODE_COUNT,
        max_resistance: 100,
        seed: SEED,
    })?;
    let forest = spanning_forest(grid.graph())?;
    let links = forest.edges();

    for &failed_links in FAILED_LINK_COUNTS {
        let disabled: Vec<usize> = (0..links.len()).step_by(31).take(failed_links).collect();
        simulate_outage(NODE_COUNT, links, &disabled, 0)?;
        let params = OutageBenchParams {
            node_count: NODE_COUNT,
            failed_links,
        };

        group.bench_with_input(
            BenchmarkId::from_parameter(&params),
            &disabled,
            |b, indices| {
                b.iter(|| {
                    let _report = simulate_outage(NODE_COUNT, links, indices, 0);
                });
            },
        );
    }

    group.finish();
    Ok(())
}

fn outage(c: &mut Criterion) {
    if let Err(err) = outage_impl(c) {
        panic!("outage benchmark setup failed: {err}");
    }
}

criterion_group!(benches, outage);
criterion_main!(benches);
