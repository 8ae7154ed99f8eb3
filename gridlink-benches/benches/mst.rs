//! Spanning forest benchmarks over seeded synthetic grids.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use gridlink_benches::{
    error::BenchSetupError,
    params::GridBenchParams,
    source::{SyntheticConfig, SyntheticGrid},
};
use gridlink_core::spanning_forest;

/// Seed used for all synthetic grid generation in this benchmark.
const SEED: u64 = 42;

/// Grid sizes to benchmark.
const NODE_COUNTS: &[usize] = &[1_000, 5_000, 10_000];

fn mst_kruskal_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("kruskal");
    group.sample_size(20);

    for &node_count in NODE_COUNTS {
        let grid = SyntheticGrid::generate(&SyntheticConfig {
            node_count,
            max_resistance: 100,
            seed: SEED,
        })?;
        let params = GridBenchParams { node_count };

        group.bench_with_input(BenchmarkId::from_parameter(&params), grid.graph(), |b, graph| {
            b.iter(|| {
                let _forest = spanning_forest(graph);
            });
        });
    }

    group.finish();
    Ok(())
}

fn mst_kruskal(c: &mut Criterion) {
    if let Err(err) = mst_kruskal_impl(c) {
        panic!("mst_kruskal benchmark setup failed: {err}");
    }
}

criterion_group!(benches, mst_kruskal);
criterion_main!(benches);
