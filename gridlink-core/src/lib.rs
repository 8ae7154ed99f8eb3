//! gridlink core library.
//!
//! Analyses over an infrastructure grid: minimum spanning forest, cheapest
//! routes, meter range aggregates, link-failure simulation and
//! generation-source ranking. A [`GridGraph`] is assembled once from
//! [`NodeRecord`]s and then only read; [`GridAnalysis`] runs every stage
//! against it and returns an [`AnalysisReport`].

mod analysis;
mod builder;
mod error;
mod graph;
mod heap;
mod mst;
mod outage;
mod report;
mod segment_tree;
mod shortest_path;
mod source;
mod union_find;

#[cfg(test)]
mod test_utils;

pub use crate::{
    analysis::GridAnalysis,
    builder::{
        DEFAULT_FAILED_LINKS, DEFAULT_METER_ADJUSTMENT, DEFAULT_METER_WINDOW, GridAnalysisBuilder,
        MeterAdjustment, OutageScope,
    },
    error::{GraphError, GraphErrorCode, GridError, GridErrorCode, Result},
    graph::{
        Connection, DEFAULT_NODE_CAPACITY, GridEdge, GridGraph, GridGraphBuilder, MIN_LINK_WEIGHT,
        Neighbour, NodeRecord, SkippedLink,
    },
    heap::{BoundedMaxHeap, HeapError, HeapErrorCode, IndexedMinHeap},
    mst::{MinimumSpanningForest, MstError, MstErrorCode, kruskal, spanning_forest},
    outage::{OutageError, OutageErrorCode, OutageReport, Partition, partition, simulate_outage},
    report::{AnalysisReport, AppliedAdjustment, MeterSummary, OutageSummary, RouteSummary},
    segment_tree::{SegmentTree, SegmentTreeError, SegmentTreeErrorCode},
    shortest_path::{PathError, PathErrorCode, Route, ShortestPaths, shortest_path, shortest_paths},
    source::{
        DEFAULT_SOURCE_CATEGORIES, RankedSource, SEEDED_SCORE_RANGE, SOURCE_HEAP_CAPACITY,
        SourceScoring, SourceSelector, select_source,
    },
    union_find::{DisjointSet, DisjointSetError, DisjointSetErrorCode},
};
