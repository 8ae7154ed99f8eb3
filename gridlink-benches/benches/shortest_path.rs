//! Dijkstra benchmarks: full single-source search and early-exit routing.
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
use gridlink_core::{shortest_path, shortest_paths};

const SEED: u64 = 42;

const NODE_COUNTS: &[usize] = &[1_000, 5_000, 10_000];

fn dijkstra_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("dijkstra");
    group.sample_size(20);

    for &node_count in NODE_COUNTS {
        let grid = SyntheticGrid::generate(&SyntheticConfig {
            node_count,
            max_resistance: 100,
            seed: SEED,
        })?;
        let params = GridBenchParams { node_count };
        let destination = node_count - 1;
        // Setup must route successfully before anything is measured.
        shortest_path(grid.graph(), 0, destination)?;

        group.bench_with_input(
            BenchmarkId::new("all_targets", &params),
            grid.graph(),
            |b, graph| {
                b.iter(|| {
                    let _paths = shortest_paths(graph, 0);
                });
            },
        );
        group.bench_with_input(
            BenchmarkId::new("single_target", &params),
            grid.graph(),
            |b, graph| {
                b.iter(|| {
                    let _route = shortest_path(graph, 0, destination);
                });
            },
        );
    }

    group.finish();
    Ok(())
}

fn dijkstra(c: &mut Criterion) {
    if let Err(err) = dijkstra_impl(c) {
        panic!("dijkstra benchmark setup failed: {err}");
    }
}

criterion_group!(benches, dijkstra);
criterion_main!(benches);
