//! The analysis pipeline over one frozen [`GridGraph`].
//!
//! Stages run in a fixed order and each owns its working state: source
//! ranking, spanning forest, route, meter aggregate, then the outage, which
//! reuses the spanning forest's link lists.

use tracing::{Span, field, info, instrument, warn};

use crate::{
    Result,
    builder::{MeterAdjustment, OutageScope},
    error::GridError,
    graph::GridGraph,
    mst::{MinimumSpanningForest, spanning_forest},
    outage::simulate_outage,
    report::{AnalysisReport, AppliedAdjustment, MeterSummary, OutageSummary, RouteSummary},
    segment_tree::SegmentTree,
    shortest_path::shortest_path,
    source::SourceSelector,
};

/// A validated analysis configuration.
///
/// # Examples
/// ```
/// use gridlink_core::{GridAnalysisBuilder, GridGraph, NodeRecord};
///
/// let records = [(1, 4), (2, 1), (0, 7)]
///     .into_iter()
///     .map(|(target, weight)| NodeRecord::new(0, "House", 10).with_connection(target, weight));
/// let graph = GridGraph::from_records(records, 8)?;
/// let report = GridAnalysisBuilder::new()
///     .with_meter_adjustment(None)
///     .with_failed_links([1])
///     .build()?
///     .run(&graph)?;
/// assert_eq!(report.spanning().total_weight(), 5);
/// assert_eq!(report.route().destination, 1);
/// assert_eq!(report.meter().total_after, 30);
/// assert_eq!(report.outage().report.disconnected, vec![1, 2]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct GridAnalysis {
    pub(crate) route_source: usize,
    pub(crate) route_destination: Option<usize>,
    pub(crate) meter_window: (usize, usize),
    pub(crate) meter_adjustment: Option<MeterAdjustment>,
    pub(crate) failed_links: Vec<usize>,
    pub(crate) outage_scope: OutageScope,
    pub(crate) outage_reference: usize,
    pub(crate) selector: SourceSelector,
}

impl GridAnalysis {
    /// Returns the route source node.
    #[must_use]
    #[rustfmt::skip]
    pub fn route_source(&self) -> usize { self.route_source }

    /// Returns the requested failed-link indices.
    #[must_use]
    #[rustfmt::skip]
    pub fn failed_links(&self) -> &[usize] { &self.failed_links }

    /// Returns the link list failed indices address.
    #[must_use]
    #[rustfmt::skip]
    pub fn outage_scope(&self) -> OutageScope { self.outage_scope }

    /// Returns the generation-source selector.
    #[must_use]
    #[rustfmt::skip]
    pub fn selector(&self) -> &SourceSelector { &self.selector }

    /// Runs every stage against `graph`.
    ///
    /// # Errors
    /// Returns [`GridError::EmptyGraph`] for a graph with no nodes, and the
    /// wrapped component error when a configured node lies outside the
    /// graph: route endpoints ([`GridError::Path`]) or the outage reference
    /// ([`GridError::Outage`]). A meter adjustment or failed-link index
    /// outside the graph is ignored with a warning and listed in the report.
    #[instrument(
        name = "analysis.run",
        err,
        skip(self, graph),
        fields(nodes = graph.node_count(), links = graph.links().len()),
    )]
    pub fn run(&self, graph: &GridGraph) -> Result<AnalysisReport> {
        if graph.is_empty() {
            warn!("graph has no nodes, refusing to analyse");
            return Err(GridError::EmptyGraph);
        }

        let source = self.selector.select(graph)?;
        match &source {
            Some(best) => info!(
                node = best.node,
                category = %best.category,
                score = best.score,
                "generation source selected"
            ),
            None => info!("no generation source candidates"),
        }

        let spanning = self.spanning(graph)?;
        let route = self.route(graph)?;
        let meter = self.meter(graph)?;
        let outage = self.outage(graph.node_count(), &spanning)?;

        Ok(AnalysisReport::new(
            graph.node_count(),
            graph.skipped_links().len(),
            source,
            spanning,
            route,
            meter,
            outage,
        ))
    }

    #[instrument(
        name = "analysis.spanning",
        err,
        skip(self, graph),
        fields(total_weight = field::Empty, components = field::Empty),
    )]
    fn spanning(&self, graph: &GridGraph) -> Result<MinimumSpanningForest> {
        let forest = spanning_forest(graph)?;
        let span = Span::current();
        span.record("total_weight", forest.total_weight());
        span.record("components", forest.component_count());
        if forest.is_tree() {
            info!(edges = forest.edges().len(), "spanning tree computed");
        } else {
            warn!(
                components = forest.component_count(),
                "graph is disconnected, computed a spanning forest"
            );
        }
        Ok(forest)
    }

    #[instrument(
        name = "analysis.route",
        err,
        skip(self, graph),
        fields(source = self.route_source, destination = field::Empty),
    )]
    fn route(&self, graph: &GridGraph) -> Result<RouteSummary> {
        let source = self.route_source;
        let destination = self
            .route_destination
            .or_else(|| graph.declared_neighbour(source))
            .unwrap_or(source);
        Span::current().record("destination", destination);

        let route = shortest_path(graph, source, destination)?;
        match &route {
            Some(found) => info!(
                distance = found.distance,
                hops = found.hop_count(),
                "route found"
            ),
            None => info!("destination unreachable"),
        }
        Ok(RouteSummary {
            source,
            destination,
            route,
        })
    }

    #[instrument(
        name = "analysis.meter",
        err,
        skip(self, graph),
        fields(window_start = self.meter_window.0, window_end = self.meter_window.1),
    )]
    fn meter(&self, graph: &GridGraph) -> Result<MeterSummary> {
        let (start, end) = self.meter_window;
        let mut tree = SegmentTree::build(&graph.meter_values());
        let total_before = tree.total();
        let window_before = tree.range_sum(start, end);

        let mut ignored_adjustment = None;
        let adjustment = match self.meter_adjustment {
            Some(requested) => match tree.get(requested.index) {
                Some(previous) => {
                    let value = previous.saturating_add(requested.delta);
                    tree.update(requested.index, value)?;
                    Some(AppliedAdjustment {
                        requested,
                        previous,
                        value,
                    })
                }
                None => {
                    warn!(
                        index = requested.index,
                        rows = tree.len(),
                        "meter adjustment index outside rows, ignoring"
                    );
                    ignored_adjustment = Some(requested);
                    None
                }
            },
            None => None,
        };

        let summary = MeterSummary {
            window: self.meter_window,
            total_before,
            window_before,
            adjustment,
            ignored_adjustment,
            total_after: tree.total(),
            window_after: tree.range_sum(start, end),
        };
        info!(
            total = summary.total_after,
            window = summary.window_after,
            "meter aggregate computed"
        );
        Ok(summary)
    }

    #[instrument(
        name = "analysis.outage",
        err,
        skip(self, spanning),
        fields(scope = ?self.outage_scope, disconnected = field::Empty),
    )]
    fn outage(
        &self,
        node_count: usize,
        spanning: &MinimumSpanningForest,
    ) -> Result<OutageSummary> {
        let links = match self.outage_scope {
            OutageScope::SpanningTree => spanning.edges(),
            OutageScope::AllLinks => spanning.sorted_candidates(),
        };

        let (applied, ignored_links): (Vec<usize>, Vec<usize>) = self
            .failed_links
            .iter()
            .copied()
            .partition(|index| *index < links.len());
        for index in &ignored_links {
            warn!(
                index,
                scope_len = links.len(),
                "failed link index outside scope, ignoring"
            );
        }

        let report = simulate_outage(node_count, links, &applied, self.outage_reference)?;
        Span::current().record("disconnected", report.disconnected.len());
        info!(
            disconnected = report.disconnected.len(),
            components = report.component_count,
            "outage simulated"
        );
        Ok(OutageSummary {
            scope: self.outage_scope,
            scope_len: links.len(),
            failed: applied.iter().map(|index| links[*index]).collect(),
            ignored_links,
            report,
        })
    }
}
