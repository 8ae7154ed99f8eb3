//! Minimum spanning forest construction (Kruskal).
//!
//! Candidate links are stably sorted by ascending weight, so links of equal
//! weight are considered in their input order. Each link whose endpoints lie
//! in different classes of a fresh [`DisjointSet`] is accepted. The scan
//! stops as soon as `node_count - 1` links have been accepted.
//!
//! A disconnected graph is not an error: the result is a forest with one tree
//! per component and [`MinimumSpanningForest::is_tree`] returns `false`.

use thiserror::Error;
use tracing::debug;

use crate::{
    error::define_error_codes,
    graph::{GridEdge, GridGraph},
    union_find::{DisjointSet, DisjointSetError},
};

/// Errors returned while computing a minimum spanning forest.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum MstError {
    /// The caller requested a forest for an empty graph.
    #[error("cannot compute a spanning forest for an empty graph")]
    EmptyGraph,
    /// A link referenced a node id that is not present in the graph.
    #[error("link references node {node}, but node_count is {node_count}")]
    InvalidNodeId {
        /// The invalid node id referenced by a link.
        node: usize,
        /// The number of nodes in the graph.
        node_count: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`MstError`] variants.
    enum MstErrorCode for MstError {
        /// The caller requested a forest for an empty graph.
        EmptyGraph => EmptyGraph => "MST_EMPTY_GRAPH",
        /// A link referenced a node id that is not present in the graph.
        InvalidNodeId => InvalidNodeId { .. } => "MST_INVALID_NODE_ID",
    }
}

impl From<DisjointSetError> for MstError {
    fn from(error: DisjointSetError) -> Self {
        match error {
            DisjointSetError::OutOfBounds { element, len } => Self::InvalidNodeId {
                node: element,
                node_count: len,
            },
        }
    }
}

/// The output of a minimum spanning forest computation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MinimumSpanningForest {
    node_count: usize,
    edges: Vec<GridEdge>,
    total_weight: u64,
    component_count: usize,
    candidates: Vec<GridEdge>,
}

impl MinimumSpanningForest {
    /// Returns the accepted links in acceptance order.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[GridEdge] { &self.edges }

    /// Returns the sum of accepted link weights.
    #[must_use]
    #[rustfmt::skip]
    pub fn total_weight(&self) -> u64 { self.total_weight }

    /// Returns the number of trees in the forest.
    #[must_use]
    #[rustfmt::skip]
    pub fn component_count(&self) -> usize { self.component_count }

    /// Returns the number of spanned nodes.
    #[must_use]
    #[rustfmt::skip]
    pub fn node_count(&self) -> usize { self.node_count }

    /// Returns every candidate link in the order Kruskal considered them.
    #[must_use]
    #[rustfmt::skip]
    pub fn sorted_candidates(&self) -> &[GridEdge] { &self.candidates }

    /// Returns `true` when the forest spans a single connected component.
    #[must_use]
    pub fn is_tree(&self) -> bool {
        self.component_count == 1
    }
}

/// Computes the minimum spanning forest of `graph` over its
/// [`GridGraph::spanning_candidates`].
///
/// # Errors
/// Returns [`MstError::EmptyGraph`] when the graph has no nodes.
///
/// # Examples
/// ```
/// use gridlink_core::{GridGraph, NodeRecord, spanning_forest};
///
/// let records = [(1, 4), (2, 1), (0, 6)]
///     .into_iter()
///     .map(|(target, weight)| NodeRecord::new(0, "House", 0).with_connection(target, weight));
/// let graph = GridGraph::from_records(records, 3)?;
/// let forest = spanning_forest(&graph)?;
/// assert_eq!(forest.total_weight(), 5);
/// assert!(forest.is_tree());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn spanning_forest(graph: &GridGraph) -> Result<MinimumSpanningForest, MstError> {
    kruskal(graph.node_count(), &graph.spanning_candidates())
}

/// Computes a minimum spanning forest over `candidates`.
///
/// # Errors
/// Returns an error when:
/// - `node_count == 0`
/// - a link references a node id `>= node_count`
pub fn kruskal(
    node_count: usize,
    candidates: &[GridEdge],
) -> Result<MinimumSpanningForest, MstError> {
    if node_count == 0 {
        return Err(MstError::EmptyGraph);
    }
    validate_candidates(node_count, candidates)?;

    let mut sorted = candidates.to_vec();
    sorted.sort_by_key(GridEdge::weight);

    let target_edges = node_count - 1;
    let mut union_find = DisjointSet::new(node_count);
    let mut edges = Vec::with_capacity(target_edges);
    let mut total_weight = 0_u64;

    for edge in &sorted {
        if edges.len() == target_edges {
            break;
        }
        if union_find.union(edge.source(), edge.target())? {
            total_weight += u64::from(edge.weight());
            edges.push(*edge);
        }
    }

    debug!(
        node_count,
        candidates = sorted.len(),
        accepted = edges.len(),
        components = union_find.components(),
        "spanning forest computed"
    );

    Ok(MinimumSpanningForest {
        node_count,
        edges,
        total_weight,
        component_count: union_find.components(),
        candidates: sorted,
    })
}

fn validate_candidates(node_count: usize, candidates: &[GridEdge]) -> Result<(), MstError> {
    for edge in candidates {
        for node in [edge.source(), edge.target()] {
            if node >= node_count {
                return Err(MstError::InvalidNodeId { node, node_count });
            }
        }
    }
    Ok(())
}


#[cfg(test)]
mod property;
