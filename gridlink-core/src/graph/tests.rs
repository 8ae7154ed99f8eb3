//! Unit tests for graph ingestion and adjacency layout.

use rstest::rstest;

use crate::error::GraphError;

use super::{GridEdge, GridGraph, GridGraphBuilder, Neighbour, NodeRecord, SkippedLink};

fn record(target: Option<(i64, i64)>) -> NodeRecord {
    let base = NodeRecord::new(0, "House", 0);
    match target {
        Some((target, weight)) => base.with_connection(target, weight),
        None => base,
    }
}

fn graph(rows: &[Option<(i64, i64)>]) -> GridGraph {
    GridGraph::from_records(rows.iter().copied().map(record), rows.len())
        .expect("capacity matches row count")
}

#[test]
fn builder_reports_capacity_exceeded() {
    let mut builder = GridGraphBuilder::with_capacity(2);
    builder.push(record(None)).expect("first record fits");
    builder.push(record(None)).expect("second record fits");
    let err = builder
        .push(record(None))
        .expect_err("third record must not fit");
    assert_eq!(err, GraphError::CapacityExceeded { capacity: 2 });
    assert_eq!(builder.len(), 2);
}

#[test]
fn from_records_rejects_oversized_input() {
    let rows = (0..4).map(|_| record(None));
    let err = GridGraph::from_records(rows, 3).expect_err("four rows exceed capacity");
    assert_eq!(err.code().as_str(), "GRAPH_CAPACITY_EXCEEDED");
}

#[test]
fn adjacency_is_symmetric() {
    let graph = graph(&[Some((1, 4)), Some((2, 1)), None]);
    assert_eq!(graph.directed_edge_count(), 4);
    assert_eq!(
        graph.neighbours(1).expect("node exists"),
        &[
            Neighbour { node: 0, weight: 4 },
            Neighbour { node: 2, weight: 1 },
        ]
    );
    assert_eq!(
        graph.neighbours(2).expect("node exists"),
        &[Neighbour { node: 1, weight: 1 }]
    );
}

#[rstest]
#[case::past_end(3)]
#[case::negative(-1)]
fn out_of_range_targets_are_skipped(#[case] target: i64) {
    let graph = graph(&[Some((target, 2)), Some((2, 1)), None]);
    assert_eq!(graph.links(), &[GridEdge::new(1, 2, 1)]);
    assert_eq!(
        graph.skipped_links(),
        &[SkippedLink::TargetOutOfRange { node: 0, target }]
    );
}

#[test]
fn negative_weights_are_rejected() {
    let graph = graph(&[Some((1, -3)), None]);
    assert!(graph.links().is_empty());
    assert_eq!(
        graph.skipped_links(),
        &[SkippedLink::NegativeWeight { node: 0, weight: -3 }]
    );
    assert_eq!(graph.skipped_links()[0].node(), 0);
}

#[test]
fn zero_weights_are_clamped() {
    let graph = graph(&[Some((1, 0)), None]);
    assert_eq!(graph.links(), &[GridEdge::new(0, 1, 1)]);
}

#[test]
fn spanning_candidates_keep_canonical_links_only() {
    let graph = graph(&[Some((1, 4)), Some((0, 9)), Some((2, 5))]);
    assert_eq!(graph.links().len(), 3);
    assert_eq!(
        graph.spanning_candidates(),
        vec![GridEdge::new(0, 1, 4), GridEdge::new(2, 2, 5)]
    );
}

#[test]
fn neighbours_rejects_unknown_nodes() {
    let graph = graph(&[None, None]);
    assert_eq!(
        graph.neighbours(2),
        Err(GraphError::NodeOutOfBounds {
            node: 2,
            node_count: 2
        })
    );
    assert!(graph.node(5).is_err());
}

#[test]
fn declared_neighbour_follows_valid_connections() {
    let graph = graph(&[Some((2, 1)), Some((7, 1)), None]);
    assert_eq!(graph.declared_neighbour(0), Some(2));
    assert_eq!(graph.declared_neighbour(1), None);
    assert_eq!(graph.declared_neighbour(2), None);
}

#[test]
fn empty_graph_is_representable() {
    let graph = GridGraphBuilder::with_capacity(4).build();
    assert!(graph.is_empty());
    assert!(graph.meter_values().is_empty());
    assert!(graph.neighbours(0).is_err());
}
