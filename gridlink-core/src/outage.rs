//! Connectivity after link failures.
//!
//! A simulation never mutates its inputs: it unions every surviving link
//! into a fresh [`DisjointSet`] and reports the nodes that no longer share a
//! class with the reference node.

use std::collections::BTreeSet;

use thiserror::Error;
use tracing::debug;

use crate::{
    error::define_error_codes,
    graph::GridEdge,
    union_find::{DisjointSet, DisjointSetError},
};

/// Errors returned by the failure simulator.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum OutageError {
    /// A disabled link index does not address the link list.
    #[error("disabled link index {index} is out of bounds for {link_count} links")]
    LinkIndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// Number of links supplied.
        link_count: usize,
    },
    /// The reference node is not in the network.
    #[error("reference node {reference} is out of bounds for {node_count} nodes")]
    ReferenceOutOfBounds {
        /// The requested reference node.
        reference: usize,
        /// Number of nodes in the network.
        node_count: usize,
    },
    /// A link references a node outside the network.
    #[error("outage link is invalid: {source}")]
    InvalidLink {
        /// Underlying disjoint-set error.
        #[from]
        source: DisjointSetError,
    },
}

define_error_codes! {
    /// Stable codes describing [`OutageError`] variants.
    enum OutageErrorCode for OutageError {
        /// A disabled link index does not address the link list.
        LinkIndexOutOfBounds => LinkIndexOutOfBounds { .. } => "OUTAGE_LINK_INDEX_OUT_OF_BOUNDS",
        /// The reference node is not in the network.
        ReferenceOutOfBounds => ReferenceOutOfBounds { .. } => "OUTAGE_REFERENCE_OUT_OF_BOUNDS",
        /// A link references a node outside the network.
        InvalidLink => InvalidLink { .. } => "OUTAGE_INVALID_LINK",
    }
}

/// Connectivity classes of a network after some links were removed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Partition {
    classes: Vec<usize>,
    component_count: usize,
}

impl Partition {
    /// Returns the class label of `node`, if it exists.
    ///
    /// Labels are dense in `[0, component_count)` and assigned in order of
    /// first appearance.
    #[must_use]
    pub fn class_of(&self, node: usize) -> Option<usize> {
        self.classes.get(node).copied()
    }

    /// Returns the number of classes.
    #[must_use]
    #[rustfmt::skip]
    pub fn component_count(&self) -> usize { self.component_count }

    /// Returns the number of nodes covered.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.classes.len() }

    /// Returns `true` when the partition covers no nodes.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.classes.is_empty() }

    /// Returns `true` when both nodes exist and share a class.
    #[must_use]
    pub fn same_class(&self, left: usize, right: usize) -> bool {
        matches!(
            (self.class_of(left), self.class_of(right)),
            (Some(a), Some(b)) if a == b
        )
    }
}

/// Result of one outage simulation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OutageReport {
    /// Node whose class defines "still connected".
    pub reference: usize,
    /// Nodes outside the reference class, ascending.
    pub disconnected: Vec<usize>,
    /// Number of classes after the outage.
    pub component_count: usize,
}

/// Partitions `[0, node_count)` using every link not listed in `disabled`.
///
/// `disabled` holds indices into `links`; order and duplicates are ignored.
///
/// # Errors
/// Returns [`OutageError::LinkIndexOutOfBounds`] for an index `>= links.len()`
/// and [`OutageError::InvalidLink`] when a surviving link leaves the network.
pub fn partition(
    node_count: usize,
    links: &[GridEdge],
    disabled: &[usize],
) -> Result<Partition, OutageError> {
    let disabled = disabled_set(links.len(), disabled)?;
    let mut set = DisjointSet::new(node_count);
    for (index, link) in links.iter().enumerate() {
        if !disabled.contains(&index) {
            set.union(link.source(), link.target())?;
        }
    }

    let mut labels: Vec<Option<usize>> = vec![None; node_count];
    let mut classes = Vec::with_capacity(node_count);
    let mut next = 0_usize;
    for node in 0..node_count {
        let root = set.find(node)?;
        let label = *labels[root].get_or_insert_with(|| {
            next += 1;
            next - 1
        });
        classes.push(label);
    }

    Ok(Partition {
        classes,
        component_count: set.components(),
    })
}

/// Simulates removing `disabled` links and reports nodes cut off from
/// `reference`.
///
/// # Errors
/// Returns [`OutageError::ReferenceOutOfBounds`] when `reference >=
/// node_count`, plus every error of [`partition`].
///
/// # Examples
/// ```
/// use gridlink_core::{GridEdge, simulate_outage};
///
/// let links = [GridEdge::new(0, 1, 1), GridEdge::new(1, 2, 1)];
/// let report = simulate_outage(3, &links, &[1], 0)?;
/// assert_eq!(report.disconnected, vec![2]);
/// assert_eq!(report.component_count, 2);
/// # Ok::<(), gridlink_core::OutageError>(())
/// ```
pub fn simulate_outage(
    node_count: usize,
    links: &[GridEdge],
    disabled: &[usize],
    reference: usize,
) -> Result<OutageReport, OutageError> {
    if reference >= node_count {
        return Err(OutageError::ReferenceOutOfBounds {
            reference,
            node_count,
        });
    }
    let partition = partition(node_count, links, disabled)?;
    let disconnected: Vec<usize> = (0..node_count)
        .filter(|node| !partition.same_class(reference, *node))
        .collect();

    debug!(
        node_count,
        links = links.len(),
        disabled = disabled.len(),
        disconnected = disconnected.len(),
        "outage simulated"
    );

    Ok(OutageReport {
        reference,
        disconnected,
        component_count: partition.component_count(),
    })
}

fn disabled_set(link_count: usize, disabled: &[usize]) -> Result<BTreeSet<usize>, OutageError> {
    disabled
        .iter()
        .map(|&index| {
            if index < link_count {
                Ok(index)
            } else {
                Err(OutageError::LinkIndexOutOfBounds { index, link_count })
            }
        })
        .collect()
}
