//! Output types of a [`crate::GridAnalysis`] run.

use crate::{
    builder::{MeterAdjustment, OutageScope},
    graph::GridEdge,
    mst::MinimumSpanningForest,
    outage::OutageReport,
    shortest_path::Route,
    source::RankedSource,
};

/// Everything one analysis run produced.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AnalysisReport {
    node_count: usize,
    skipped_links: usize,
    source: Option<RankedSource>,
    spanning: MinimumSpanningForest,
    route: RouteSummary,
    meter: MeterSummary,
    outage: OutageSummary,
}

impl AnalysisReport {
    pub(crate) fn new(
        node_count: usize,
        skipped_links: usize,
        source: Option<RankedSource>,
        spanning: MinimumSpanningForest,
        route: RouteSummary,
        meter: MeterSummary,
        outage: OutageSummary,
    ) -> Self {
        Self {
            node_count,
            skipped_links,
            source,
            spanning,
            route,
            meter,
            outage,
        }
    }

    /// Returns the number of analysed nodes.
    #[must_use]
    #[rustfmt::skip]
    pub fn node_count(&self) -> usize { self.node_count }

    /// Returns how many declared connections were rejected at ingestion.
    #[must_use]
    #[rustfmt::skip]
    pub fn skipped_links(&self) -> usize { self.skipped_links }

    /// Returns the selected generation source, if any node qualified.
    #[must_use]
    #[rustfmt::skip]
    pub fn source(&self) -> Option<&RankedSource> { self.source.as_ref() }

    /// Returns the minimum spanning forest.
    #[must_use]
    #[rustfmt::skip]
    pub fn spanning(&self) -> &MinimumSpanningForest { &self.spanning }

    /// Returns the route section.
    #[must_use]
    #[rustfmt::skip]
    pub fn route(&self) -> &RouteSummary { &self.route }

    /// Returns the meter aggregate section.
    #[must_use]
    #[rustfmt::skip]
    pub fn meter(&self) -> &MeterSummary { &self.meter }

    /// Returns the outage section.
    #[must_use]
    #[rustfmt::skip]
    pub fn outage(&self) -> &OutageSummary { &self.outage }
}

/// Requested endpoints and the cheapest route between them.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RouteSummary {
    /// Route source node.
    pub source: usize,
    /// Resolved destination node.
    pub destination: usize,
    /// Cheapest route, `None` when the destination is unreachable.
    pub route: Option<Route>,
}

/// Meter sums before and after the optional point update.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MeterSummary {
    /// Inclusive window that was queried.
    pub window: (usize, usize),
    /// Sum over every node before the update.
    pub total_before: i64,
    /// Sum over the window before the update.
    pub window_before: i64,
    /// The applied update, if one was configured and in range.
    pub adjustment: Option<AppliedAdjustment>,
    /// A configured update whose index lay outside the rows.
    pub ignored_adjustment: Option<MeterAdjustment>,
    /// Sum over every node after the update.
    pub total_after: i64,
    /// Sum over the window after the update.
    pub window_after: i64,
}

/// A meter update as it was applied.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AppliedAdjustment {
    /// Requested adjustment.
    pub requested: MeterAdjustment,
    /// Reading before the update.
    pub previous: i64,
    /// Reading written by the update.
    pub value: i64,
}

/// Outcome of the configured link failures.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OutageSummary {
    /// Link list the indices addressed.
    pub scope: OutageScope,
    /// Number of links in that list.
    pub scope_len: usize,
    /// Links that were disabled, in request order.
    pub failed: Vec<GridEdge>,
    /// Requested indices that fell outside the scope.
    pub ignored_links: Vec<usize>,
    /// Resulting connectivity.
    pub report: OutageReport,
}
