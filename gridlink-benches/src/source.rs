//! Seeded synthetic grids for benchmarks.
//!
//! Every node declares one link to a uniformly chosen node, so the graph has
//! exactly `node_count` declared links and usually a handful of components.

use gridlink_core::{GridGraph, NodeRecord};
use rand::{Rng, SeedableRng, rngs::SmallRng, seq::SliceRandom};

use crate::error::BenchSetupError;

const CATEGORIES: [&str; 5] = ["House", "Substation", "SolarPlant", "WindFarm", "HydroPlant"];

/// Configuration for [`SyntheticGrid::generate`].
#[derive(Clone, Debug)]
pub struct SyntheticConfig {
    /// Number of nodes to generate.
    pub node_count: usize,
    /// Inclusive upper bound for link resistance.
    pub max_resistance: i64,
    /// Seed for the random generator.
    pub seed: u64,
}

/// A generated grid and the records it was built from.
#[derive(Clone, Debug)]
pub struct SyntheticGrid {
    records: Vec<NodeRecord>,
    graph: GridGraph,
}

impl SyntheticGrid {
    /// Generates a grid described by `config`.
    ///
    /// # Errors
    /// Returns [`BenchSetupError::ZeroValue`] when `node_count` or
    /// `max_resistance` is zero, or [`BenchSetupError::Graph`] when the
    /// graph cannot be built.
    pub fn generate(config: &SyntheticConfig) -> Result<Self, BenchSetupError> {
        if config.node_count == 0 {
            return Err(BenchSetupError::ZeroValue {
                context: "node_count",
            });
        }
        if config.max_resistance < 1 {
            return Err(BenchSetupError::ZeroValue {
                context: "max_resistance",
            });
        }

        let mut rng = SmallRng::seed_from_u64(config.seed);
        let upper = i64::try_from(config.node_count).unwrap_or(i64::MAX);
        let records: Vec<NodeRecord> = (0..upper)
            .map(|id| {
                let category = CATEGORIES.choose(&mut rng).copied().unwrap_or("House");
                let meter = rng.gen_range(0..1_000);
                let target = rng.gen_range(0..upper);
                let weight = rng.gen_range(1..=config.max_resistance);
                NodeRecord::new(id, category, meter).with_connection(target, weight)
            })
            .collect();
        let graph = GridGraph::from_records(records.iter().cloned(), config.node_count)?;
        Ok(Self { records, graph })
    }

    /// Returns the generated records.
    #[must_use]
    pub fn records(&self) -> &[NodeRecord] {
        &self.records
    }

    /// Returns the assembled graph.
    #[must_use]
    pub const fn graph(&self) -> &GridGraph {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn config(node_count: usize, seed: u64) -> SyntheticConfig {
        SyntheticConfig {
            node_count,
            max_resistance: 25,
            seed,
        }
    }

    #[rstest]
    #[case(1)]
    #[case(64)]
    fn generates_requested_node_count(#[case] node_count: usize) -> Result<(), BenchSetupError> {
        let grid = SyntheticGrid::generate(&config(node_count, 7))?;
        assert_eq!(grid.graph().node_count(), node_count);
        assert_eq!(grid.records().len(), node_count);
        assert!(grid.graph().skipped_links().is_empty());
        Ok(())
    }

    #[test]
    fn same_seed_same_grid() -> Result<(), BenchSetupError> {
        let left = SyntheticGrid::generate(&config(32, 11))?;
        let right = SyntheticGrid::generate(&config(32, 11))?;
        assert_eq!(left.graph().links(), right.graph().links());
        Ok(())
    }

    #[test]
    fn rejects_zero_nodes() {
        let result = SyntheticGrid::generate(&config(0, 1));
        assert!(matches!(
            result,
            Err(BenchSetupError::ZeroValue {
                context: "node_count"
            })
        ));
    }
}
