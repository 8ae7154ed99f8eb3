//! Graph generators for spanning forest properties.

use proptest::prelude::*;
use test_strategy::Arbitrary;

use crate::graph::GridEdge;

use super::oracle::MAX_ORACLE_EDGES;

/// How link weights are drawn.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
pub(super) enum WeightProfile {
    /// Weights spread over a wide range, so ties are rare.
    Spread,
    /// Weights drawn from `{1, 2}`, so most links tie.
    ManyEqual,
}

impl WeightProfile {
    fn max_weight(self) -> u32 {
        match self {
            Self::Spread => 100,
            Self::ManyEqual => 2,
        }
    }
}

/// Small graph fixture: node count plus candidate links.
#[derive(Clone, Debug)]
pub(super) struct SmallGraph {
    pub node_count: usize,
    pub edges: Vec<GridEdge>,
}

/// Generates graphs small enough for the brute-force oracle.
pub(super) fn small_graph_strategy() -> impl Strategy<Value = SmallGraph> {
    (1_usize..=6, any::<WeightProfile>()).prop_flat_map(|(node_count, profile)| {
        let link = (0..node_count, 0..node_count, 1..=profile.max_weight())
            .prop_map(|(source, target, weight)| GridEdge::new(source, target, weight));
        proptest::collection::vec(link, 0..=MAX_ORACLE_EDGES)
            .prop_map(move |edges| SmallGraph { node_count, edges })
    })
}
