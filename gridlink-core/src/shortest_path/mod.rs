//! Single-source shortest paths over a [`GridGraph`] (Dijkstra).
//!
//! The frontier is an [`IndexedMinHeap`], so each node is queued at most once
//! and a cheaper tentative distance lowers its key in place. A node's
//! distance is final once it has been popped.

use thiserror::Error;
use tracing::debug;

use crate::{
    error::{GraphError, define_error_codes},
    graph::GridGraph,
    heap::{HeapError, IndexedMinHeap},
};

/// Errors returned by the shortest-path engine.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum PathError {
    /// A source or destination outside the graph was requested.
    #[error("node {node} is out of bounds for a graph with {node_count} nodes")]
    NodeOutOfBounds {
        /// The requested node id.
        node: usize,
        /// Number of nodes in the graph.
        node_count: usize,
    },
    /// The graph store rejected an adjacency query.
    #[error(transparent)]
    Graph {
        /// Underlying graph store error.
        #[from]
        source: GraphError,
    },
    /// The frontier rejected an operation.
    #[error(transparent)]
    Heap {
        /// Underlying heap error.
        #[from]
        source: HeapError,
    },
}

define_error_codes! {
    /// Stable codes describing [`PathError`] variants.
    enum PathErrorCode for PathError {
        /// A source or destination outside the graph was requested.
        NodeOutOfBounds => NodeOutOfBounds { .. } => "PATH_NODE_OUT_OF_BOUNDS",
        /// The graph store rejected an adjacency query.
        GraphFailure => Graph { .. } => "PATH_GRAPH_FAILURE",
        /// The frontier rejected an operation.
        HeapFailure => Heap { .. } => "PATH_HEAP_FAILURE",
    }
}

/// Distances and predecessors from one source node.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ShortestPaths {
    source: usize,
    distances: Vec<Option<u64>>,
    parents: Vec<Option<usize>>,
}

impl ShortestPaths {
    /// Returns the source node.
    #[must_use]
    #[rustfmt::skip]
    pub fn source(&self) -> usize { self.source }

    /// Returns every distance, `None` for unreachable nodes.
    #[must_use]
    #[rustfmt::skip]
    pub fn distances(&self) -> &[Option<u64>] { &self.distances }

    /// Returns the distance to `node`, `None` when unreachable or unknown.
    #[must_use]
    pub fn distance(&self, node: usize) -> Option<u64> {
        self.distances.get(node).copied().flatten()
    }

    /// Returns the predecessor of `node` on its shortest path.
    #[must_use]
    pub fn parent(&self, node: usize) -> Option<usize> {
        self.parents.get(node).copied().flatten()
    }

    /// Returns `true` when `node` was reached from the source.
    #[must_use]
    pub fn is_reachable(&self, node: usize) -> bool {
        self.distance(node).is_some()
    }

    /// Reconstructs the node sequence from the source to `destination`.
    ///
    /// Returns `None` when `destination` was not reached.
    #[must_use]
    pub fn path_to(&self, destination: usize) -> Option<Vec<usize>> {
        self.distance(destination)?;
        let mut nodes = vec![destination];
        let mut current = destination;
        while let Some(previous) = self.parent(current) {
            nodes.push(previous);
            current = previous;
        }
        nodes.reverse();
        Some(nodes)
    }

    /// Packages the path to `destination` as a [`Route`].
    #[must_use]
    pub fn route_to(&self, destination: usize) -> Option<Route> {
        Some(Route {
            distance: self.distance(destination)?,
            nodes: self.path_to(destination)?,
        })
    }
}

/// A cheapest path between two nodes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Route {
    /// Sum of link weights along the path.
    pub distance: u64,
    /// Nodes visited from source to destination, inclusive.
    pub nodes: Vec<usize>,
}

impl Route {
    /// Returns the number of links traversed.
    #[must_use]
    pub fn hop_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }
}

/// Computes shortest distances from `source` to every node.
///
/// # Errors
/// Returns [`PathError::NodeOutOfBounds`] when `source` is not in the graph.
pub fn shortest_paths(graph: &GridGraph, source: usize) -> Result<ShortestPaths, PathError> {
    search(graph, source, None)
}

/// Computes the cheapest route from `source` to `destination`.
///
/// The search stops as soon as `destination` is settled. Returns `Ok(None)`
/// when the destination is unreachable.
///
/// # Errors
/// Returns [`PathError::NodeOutOfBounds`] when either endpoint is not in the
/// graph.
///
/// # Examples
/// ```
/// use gridlink_core::{GridGraph, NodeRecord, shortest_path};
///
/// let records = [(1, 4), (2, 1), (0, 9)]
///     .into_iter()
///     .map(|(target, weight)| NodeRecord::new(0, "House", 0).with_connection(target, weight));
/// let graph = GridGraph::from_records(records, 3)?;
/// let route = shortest_path(&graph, 0, 2)?.expect("connected");
/// assert_eq!(route.distance, 5);
/// assert_eq!(route.nodes, vec![0, 1, 2]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn shortest_path(
    graph: &GridGraph,
    source: usize,
    destination: usize,
) -> Result<Option<Route>, PathError> {
    check_node(graph, destination)?;
    let paths = search(graph, source, Some(destination))?;
    Ok(paths.route_to(destination))
}

fn check_node(graph: &GridGraph, node: usize) -> Result<(), PathError> {
    if node < graph.node_count() {
        Ok(())
    } else {
        Err(PathError::NodeOutOfBounds {
            node,
            node_count: graph.node_count(),
        })
    }
}

fn search(
    graph: &GridGraph,
    source: usize,
    stop_at: Option<usize>,
) -> Result<ShortestPaths, PathError> {
    check_node(graph, source)?;
    let node_count = graph.node_count();
    let mut distances: Vec<Option<u64>> = vec![None; node_count];
    let mut parents: Vec<Option<usize>> = vec![None; node_count];
    let mut frontier = IndexedMinHeap::with_slots(node_count);

    distances[source] = Some(0);
    frontier.push_or_decrease(source, 0_u64)?;
    let mut settled = 0_usize;

    while let Some((node, distance)) = frontier.pop_min() {
        settled += 1;
        if stop_at == Some(node) {
            break;
        }
        for neighbour in graph.neighbours(node)? {
            let candidate = distance + u64::from(neighbour.weight);
            let improves = distances[neighbour.node].is_none_or(|known| candidate < known);
            if improves {
                distances[neighbour.node] = Some(candidate);
                parents[neighbour.node] = Some(node);
                frontier.push_or_decrease(neighbour.node, candidate)?;
            }
        }
    }

    debug!(source, settled, node_count, "shortest-path search finished");
    Ok(ShortestPaths {
        source,
        distances,
        parents,
    })
}
