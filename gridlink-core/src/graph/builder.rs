//! Capacity-bounded ingestion of node records.

use tracing::{debug, warn};

use crate::error::GraphError;

use super::{GridEdge, GridGraph, MIN_LINK_WEIGHT, Neighbour, NodeRecord, SkippedLink};

/// Accumulates node records and freezes them into a [`GridGraph`].
///
/// # Examples
/// ```
/// use gridlink_core::{GraphError, GridGraphBuilder, NodeRecord};
///
/// let mut builder = GridGraphBuilder::with_capacity(1);
/// builder.push(NodeRecord::new(0, "House", 1))?;
/// let err = builder.push(NodeRecord::new(1, "House", 1)).unwrap_err();
/// assert!(matches!(err, GraphError::CapacityExceeded { capacity: 1 }));
/// # Ok::<(), GraphError>(())
/// ```
#[derive(Clone, Debug)]
pub struct GridGraphBuilder {
    capacity: usize,
    records: Vec<NodeRecord>,
}

impl GridGraphBuilder {
    /// Creates a builder that accepts at most `capacity` records.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            records: Vec::new(),
        }
    }

    /// Returns the configured capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of accepted records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when no record has been accepted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends a record.
    ///
    /// # Errors
    /// Returns [`GraphError::CapacityExceeded`] once `capacity` records have
    /// been accepted. The rejected record is dropped and the builder keeps
    /// its earlier records.
    pub fn push(&mut self, record: NodeRecord) -> Result<(), GraphError> {
        if self.records.len() >= self.capacity {
            return Err(GraphError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.records.push(record);
        Ok(())
    }

    /// Validates every declared connection and freezes the graph.
    ///
    /// Connections whose target lies outside the graph, or whose weight is
    /// negative, are skipped and reported through
    /// [`GridGraph::skipped_links`]. Zero weights are clamped to
    /// [`MIN_LINK_WEIGHT`].
    #[must_use]
    pub fn build(self) -> GridGraph {
        let node_count = self.records.len();
        let mut links = Vec::with_capacity(node_count);
        let mut skipped = Vec::new();

        for (node, record) in self.records.iter().enumerate() {
            let Some(connection) = record.connection else {
                continue;
            };
            let Some(target) = usize::try_from(connection.target)
                .ok()
                .filter(|target| *target < node_count)
            else {
                debug!(node, target = connection.target, "skipping link to unknown node");
                skipped.push(SkippedLink::TargetOutOfRange {
                    node,
                    target: connection.target,
                });
                continue;
            };
            if connection.weight < 0 {
                warn!(node, weight = connection.weight, "rejecting negative link weight");
                skipped.push(SkippedLink::NegativeWeight {
                    node,
                    weight: connection.weight,
                });
                continue;
            }
            let weight = u32::try_from(connection.weight)
                .unwrap_or(u32::MAX)
                .max(MIN_LINK_WEIGHT);
            links.push(GridEdge::new(node, target, weight));
        }

        let (offsets, adjacency) = compress(node_count, &links);
        GridGraph {
            nodes: self.records,
            links,
            offsets,
            adjacency,
            skipped,
        }
    }
}

/// Lays out both directions of every link in CSR form.
fn compress(node_count: usize, links: &[GridEdge]) -> (Vec<usize>, Vec<Neighbour>) {
    let mut offsets = vec![0_usize; node_count + 1];
    for link in links {
        offsets[link.source() + 1] += 1;
        offsets[link.target() + 1] += 1;
    }
    for node in 0..node_count {
        offsets[node + 1] += offsets[node];
    }

    let mut cursor = offsets.clone();
    let placeholder = Neighbour { node: 0, weight: 0 };
    let mut adjacency = vec![placeholder; offsets[node_count]];
    for link in links {
        let mut place = |from: usize, to: usize| {
            adjacency[cursor[from]] = Neighbour {
                node: to,
                weight: link.weight(),
            };
            cursor[from] += 1;
        };
        place(link.source(), link.target());
        place(link.target(), link.source());
    }
    (offsets, adjacency)
}
