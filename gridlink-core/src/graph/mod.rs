//! Graph store for grid nodes and the links they declare.
//!
//! Node records are accepted by a capacity-bounded [`GridGraphBuilder`] and
//! then frozen into a [`GridGraph`]. The frozen graph stores its undirected
//! adjacency in compressed sparse row form: one offset per node into a flat
//! neighbour array, so iterating the neighbours of `u` costs `O(deg(u))`.

mod builder;

pub use self::builder::GridGraphBuilder;

use crate::error::GraphError;

/// Smallest weight a link carries once ingested.
pub const MIN_LINK_WEIGHT: u32 = 1;

/// Default number of node records accepted by a [`GridGraphBuilder`].
pub const DEFAULT_NODE_CAPACITY: usize = 10_050;

/// A connection declared by a node record, prior to validation.
///
/// Both fields are kept raw so that malformed targets and negative weights
/// can be diagnosed when the graph is built.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Connection {
    /// Row position of the connected node.
    pub target: i64,
    /// Declared link weight (line resistance).
    pub weight: i64,
}

/// One ingested node row.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NodeRecord {
    /// Identifier carried by the source data. Informational only; graph
    /// identity is the row position.
    pub declared_id: i64,
    /// Free-form category tag such as `SolarPlant` or `House`.
    pub category: String,
    /// Scalar meter reading aggregated by the segment tree.
    pub meter: i64,
    /// Optional declared connection to another node.
    pub connection: Option<Connection>,
}

impl NodeRecord {
    /// Creates a record without a declared connection.
    ///
    /// # Examples
    /// ```
    /// use gridlink_core::NodeRecord;
    ///
    /// let record = NodeRecord::new(7, "House", 120).with_connection(3, 2);
    /// assert_eq!(record.connection.map(|c| c.target), Some(3));
    /// ```
    #[must_use]
    pub fn new(declared_id: i64, category: impl Into<String>, meter: i64) -> Self {
        Self {
            declared_id,
            category: category.into(),
            meter,
            connection: None,
        }
    }

    /// Attaches a declared connection to the record.
    #[must_use]
    pub fn with_connection(mut self, target: i64, weight: i64) -> Self {
        self.connection = Some(Connection { target, weight });
        self
    }
}

/// An undirected weighted link between two nodes.
///
/// `source` is the node that declared the link; `(u, v, w)` and `(v, u, w)`
/// describe the same connection.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct GridEdge {
    source: usize,
    target: usize,
    weight: u32,
}

impl GridEdge {
    /// Creates a link between `source` and `target`.
    #[must_use]
    pub const fn new(source: usize, target: usize, weight: u32) -> Self {
        Self {
            source,
            target,
            weight,
        }
    }

    /// Returns the declaring endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub const fn source(&self) -> usize { self.source }

    /// Returns the connected endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub const fn target(&self) -> usize { self.target }

    /// Returns the link weight.
    #[must_use]
    #[rustfmt::skip]
    pub const fn weight(&self) -> u32 { self.weight }

    /// Returns `true` when `source <= target`.
    #[must_use]
    pub const fn is_canonical(&self) -> bool {
        self.source <= self.target
    }

    /// Returns `true` when the link joins `left` and `right` in either
    /// orientation.
    #[must_use]
    pub const fn joins(&self, left: usize, right: usize) -> bool {
        (self.source == left && self.target == right)
            || (self.source == right && self.target == left)
    }
}

/// A declared connection that did not become a link.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SkippedLink {
    /// The target lies outside `[0, node_count)`.
    TargetOutOfRange {
        /// Node that declared the connection.
        node: usize,
        /// Raw declared target.
        target: i64,
    },
    /// The weight is negative, which shortest-path search cannot accept.
    NegativeWeight {
        /// Node that declared the connection.
        node: usize,
        /// Raw declared weight.
        weight: i64,
    },
}

impl SkippedLink {
    /// Returns the node whose connection was skipped.
    #[must_use]
    pub const fn node(&self) -> usize {
        match self {
            Self::TargetOutOfRange { node, .. } | Self::NegativeWeight { node, .. } => *node,
        }
    }
}

/// A neighbour entry in the adjacency array.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Neighbour {
    /// Adjacent node id.
    pub node: usize,
    /// Weight of the connecting link.
    pub weight: u32,
}

/// A frozen grid graph.
///
/// The graph exposes no mutation once built. Every analysis borrows it
/// immutably and owns its own working state.
#[derive(Clone, Debug)]
pub struct GridGraph {
    nodes: Vec<NodeRecord>,
    links: Vec<GridEdge>,
    offsets: Vec<usize>,
    adjacency: Vec<Neighbour>,
    skipped: Vec<SkippedLink>,
}

impl GridGraph {
    /// Builds a graph from `records`, rejecting more than `capacity` of them.
    ///
    /// # Errors
    /// Returns [`GraphError::CapacityExceeded`] when `records` yields more
    /// than `capacity` items.
    ///
    /// # Examples
    /// ```
    /// use gridlink_core::{GridGraph, NodeRecord};
    ///
    /// let graph = GridGraph::from_records(
    ///     vec![
    ///         NodeRecord::new(0, "SolarPlant", 10).with_connection(1, 4),
    ///         NodeRecord::new(1, "House", 5),
    ///     ],
    ///     16,
    /// )?;
    /// assert_eq!(graph.node_count(), 2);
    /// assert_eq!(graph.directed_edge_count(), 2);
    /// # Ok::<(), gridlink_core::GraphError>(())
    /// ```
    pub fn from_records(
        records: impl IntoIterator<Item = NodeRecord>,
        capacity: usize,
    ) -> Result<Self, GraphError> {
        let mut builder = GridGraphBuilder::with_capacity(capacity);
        for record in records {
            builder.push(record)?;
        }
        Ok(builder.build())
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` when the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns every node record in row order.
    #[must_use]
    pub fn nodes(&self) -> &[NodeRecord] {
        &self.nodes
    }

    /// Returns the record for `node`.
    ///
    /// # Errors
    /// Returns [`GraphError::NodeOutOfBounds`] when `node` is not in the graph.
    pub fn node(&self, node: usize) -> Result<&NodeRecord, GraphError> {
        self.nodes.get(node).ok_or(GraphError::NodeOutOfBounds {
            node,
            node_count: self.nodes.len(),
        })
    }

    /// Returns the neighbours of `node` in link order.
    ///
    /// # Errors
    /// Returns [`GraphError::NodeOutOfBounds`] when `node` is not in the graph.
    pub fn neighbours(&self, node: usize) -> Result<&[Neighbour], GraphError> {
        if node >= self.nodes.len() {
            return Err(GraphError::NodeOutOfBounds {
                node,
                node_count: self.nodes.len(),
            });
        }
        Ok(&self.adjacency[self.offsets[node]..self.offsets[node + 1]])
    }

    /// Returns every accepted link in declaration order.
    #[must_use]
    pub fn links(&self) -> &[GridEdge] {
        &self.links
    }

    /// Returns the links eligible for spanning forest construction.
    ///
    /// Only links declared with `source <= target` are emitted, so a single
    /// declaration never contributes the same unordered pair twice.
    #[must_use]
    pub fn spanning_candidates(&self) -> Vec<GridEdge> {
        self.links
            .iter()
            .copied()
            .filter(GridEdge::is_canonical)
            .collect()
    }

    /// Returns the number of directed adjacency entries.
    #[must_use]
    pub fn directed_edge_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns the declared connections that were rejected during build.
    #[must_use]
    pub fn skipped_links(&self) -> &[SkippedLink] {
        &self.skipped
    }

    /// Returns the per-node meter readings in row order.
    #[must_use]
    pub fn meter_values(&self) -> Vec<i64> {
        self.nodes.iter().map(|node| node.meter).collect()
    }

    /// Returns the node that `node` declared a valid link to, if any.
    #[must_use]
    pub fn declared_neighbour(&self, node: usize) -> Option<usize> {
        let connection = self.nodes.get(node)?.connection?;
        usize::try_from(connection.target)
            .ok()
            .filter(|target| *target < self.nodes.len())
    }
}

#[cfg(test)]
mod tests;
