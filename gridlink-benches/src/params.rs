//! Benchmark parameter types.

use std::fmt;

/// Parameters for a single benchmark run over a synthetic grid.
#[derive(Clone, Debug)]
pub struct GridBenchParams {
    /// Number of nodes in the grid.
    pub node_count: usize,
}

impl fmt::Display for GridBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={}", self.node_count)
    }
}

/// Parameters for an outage benchmark run.
#[derive(Clone, Debug)]
pub struct OutageBenchParams {
    /// Number of nodes in the grid.
    pub node_count: usize,
    /// Number of spanning tree links disabled per run.
    pub failed_links: usize,
}

impl fmt::Display for OutageBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},failed={}", self.node_count, self.failed_links)
    }
}
