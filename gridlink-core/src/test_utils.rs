//! Shared test utilities for `gridlink-core`.

use gridlink_test_support::scenario::{FIVE_NODE_CATEGORIES, FIVE_NODE_COUNT, FIVE_NODE_ROWS};

use crate::graph::{GridGraph, NodeRecord};

/// Builds node records from `(connected_to, weight, meter)` rows.
///
/// Every record is tagged `House` and its declared id is its row position.
pub(crate) fn records_from_rows(rows: &[(i64, i64, i64)]) -> Vec<NodeRecord> {
    rows.iter()
        .enumerate()
        .map(|(row, (target, weight, meter))| {
            let id = i64::try_from(row).expect("row fits in i64");
            NodeRecord::new(id, "House", *meter).with_connection(*target, *weight)
        })
        .collect()
}

/// Builds a graph from `(connected_to, weight, meter)` rows.
pub(crate) fn graph_from_rows(rows: &[(i64, i64, i64)]) -> GridGraph {
    GridGraph::from_records(records_from_rows(rows), rows.len().max(1)).expect("rows fit")
}

/// Builds the five-node reference network with its category tags.
pub(crate) fn scenario_graph() -> GridGraph {
    let records = records_from_rows(&FIVE_NODE_ROWS)
        .into_iter()
        .zip(FIVE_NODE_CATEGORIES)
        .map(|(mut record, category)| {
            category.clone_into(&mut record.category);
            record
        });
    GridGraph::from_records(records, FIVE_NODE_COUNT).expect("scenario fits")
}
