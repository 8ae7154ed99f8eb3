//! Builder utilities for configuring a [`GridAnalysis`].
//!
//! Every setting has a default that reproduces the reference walkthrough of
//! the grid export: route from node 0 to its declared neighbour, aggregate
//! meters over rows 0..=99, raise meter 10 by 500, and fail candidate links
//! 2, 5 and 10 in ascending weight order.

use crate::{
    Result,
    analysis::GridAnalysis,
    error::GridError,
    source::{SourceScoring, SourceSelector},
};

/// Default inclusive meter window.
pub const DEFAULT_METER_WINDOW: (usize, usize) = (0, 99);

/// Default failed link indices.
pub const DEFAULT_FAILED_LINKS: [usize; 3] = [2, 5, 10];

/// Which link list outage indices address.
///
/// # Examples
/// ```
/// use gridlink_core::OutageScope;
///
/// assert_eq!(OutageScope::default(), OutageScope::AllLinks);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum OutageScope {
    /// Indices address the accepted spanning tree edges in acceptance order.
    SpanningTree,
    /// Indices address every candidate link in ascending weight order.
    #[default]
    AllLinks,
}

/// A point update applied to the meter aggregate.
///
/// The leaf at `index` is overwritten with its current value plus `delta`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MeterAdjustment {
    /// Row whose meter is adjusted.
    pub index: usize,
    /// Amount added to the current reading.
    pub delta: i64,
}

/// Default meter adjustment.
pub const DEFAULT_METER_ADJUSTMENT: MeterAdjustment = MeterAdjustment {
    index: 10,
    delta: 500,
};

/// Configures and constructs [`GridAnalysis`] instances.
///
/// # Examples
/// ```
/// use gridlink_core::{GridAnalysisBuilder, OutageScope};
///
/// let analysis = GridAnalysisBuilder::new()
///     .with_route(3, Some(7))
///     .with_failed_links([0, 1])
///     .with_outage_scope(OutageScope::SpanningTree)
///     .build()
///     .expect("configuration is valid");
/// assert_eq!(analysis.route_source(), 3);
/// assert_eq!(analysis.failed_links(), &[0, 1]);
/// ```
#[derive(Clone, Debug)]
pub struct GridAnalysisBuilder {
    route_source: usize,
    route_destination: Option<usize>,
    meter_window: (usize, usize),
    meter_adjustment: Option<MeterAdjustment>,
    failed_links: Vec<usize>,
    outage_scope: OutageScope,
    outage_reference: usize,
    source_scoring: SourceScoring,
    source_categories: Option<Vec<String>>,
}

impl Default for GridAnalysisBuilder {
    fn default() -> Self {
        Self {
            route_source: 0,
            route_destination: None,
            meter_window: DEFAULT_METER_WINDOW,
            meter_adjustment: Some(DEFAULT_METER_ADJUSTMENT),
            failed_links: DEFAULT_FAILED_LINKS.to_vec(),
            outage_scope: OutageScope::default(),
            outage_reference: 0,
            source_scoring: SourceScoring::default(),
            source_categories: None,
        }
    }
}

impl GridAnalysisBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use gridlink_core::GridAnalysisBuilder;
    ///
    /// let builder = GridAnalysisBuilder::new();
    /// assert_eq!(builder.meter_window(), (0, 99));
    /// assert_eq!(builder.failed_links(), &[2, 5, 10]);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the route endpoints. A `None` destination resolves to the
    /// source's declared neighbour at run time.
    #[must_use]
    pub fn with_route(mut self, source: usize, destination: Option<usize>) -> Self {
        self.route_source = source;
        self.route_destination = destination;
        self
    }

    /// Returns the route source node.
    #[must_use]
    #[rustfmt::skip]
    pub fn route_source(&self) -> usize { self.route_source }

    /// Returns the explicit route destination, if any.
    #[must_use]
    #[rustfmt::skip]
    pub fn route_destination(&self) -> Option<usize> { self.route_destination }

    /// Sets the inclusive meter window.
    #[must_use]
    pub fn with_meter_window(mut self, start: usize, end: usize) -> Self {
        self.meter_window = (start, end);
        self
    }

    /// Returns the inclusive meter window.
    #[must_use]
    #[rustfmt::skip]
    pub fn meter_window(&self) -> (usize, usize) { self.meter_window }

    /// Sets or clears the meter point update.
    #[must_use]
    pub fn with_meter_adjustment(mut self, adjustment: Option<MeterAdjustment>) -> Self {
        self.meter_adjustment = adjustment;
        self
    }

    /// Returns the meter point update, if any.
    #[must_use]
    #[rustfmt::skip]
    pub fn meter_adjustment(&self) -> Option<MeterAdjustment> { self.meter_adjustment }

    /// Replaces the failed link indices.
    #[must_use]
    pub fn with_failed_links(mut self, links: impl IntoIterator<Item = usize>) -> Self {
        self.failed_links = links.into_iter().collect();
        self
    }

    /// Returns the failed link indices.
    #[must_use]
    #[rustfmt::skip]
    pub fn failed_links(&self) -> &[usize] { &self.failed_links }

    /// Selects which link list failed indices address.
    #[must_use]
    pub fn with_outage_scope(mut self, scope: OutageScope) -> Self {
        self.outage_scope = scope;
        self
    }

    /// Returns the link list failed indices address.
    #[must_use]
    #[rustfmt::skip]
    pub fn outage_scope(&self) -> OutageScope { self.outage_scope }

    /// Sets the node whose class counts as "still connected".
    #[must_use]
    pub fn with_outage_reference(mut self, reference: usize) -> Self {
        self.outage_reference = reference;
        self
    }

    /// Returns the outage reference node.
    #[must_use]
    #[rustfmt::skip]
    pub fn outage_reference(&self) -> usize { self.outage_reference }

    /// Sets how generation sources are scored.
    #[must_use]
    pub fn with_source_scoring(mut self, scoring: SourceScoring) -> Self {
        self.source_scoring = scoring;
        self
    }

    /// Returns the generation-source scoring mode.
    #[must_use]
    #[rustfmt::skip]
    pub fn source_scoring(&self) -> SourceScoring { self.source_scoring }

    /// Replaces the generation-source category names.
    #[must_use]
    pub fn with_source_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.source_categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    /// Validates the configuration and constructs a [`GridAnalysis`].
    ///
    /// # Errors
    /// Returns [`GridError::InvalidMeterWindow`] when the window start lies
    /// after its end.
    ///
    /// # Examples
    /// ```
    /// use gridlink_core::{GridAnalysisBuilder, GridError};
    ///
    /// let err = GridAnalysisBuilder::new()
    ///     .with_meter_window(9, 2)
    ///     .build()
    ///     .expect_err("inverted window");
    /// assert_eq!(err, GridError::InvalidMeterWindow { start: 9, end: 2 });
    /// ```
    pub fn build(self) -> Result<GridAnalysis> {
        let (start, end) = self.meter_window;
        if start > end {
            return Err(GridError::InvalidMeterWindow { start, end });
        }

        let mut selector = SourceSelector::new(self.source_scoring);
        if let Some(categories) = self.source_categories {
            selector = selector.with_categories(categories);
        }

        Ok(GridAnalysis {
            route_source: self.route_source,
            route_destination: self.route_destination,
            meter_window: self.meter_window,
            meter_adjustment: self.meter_adjustment,
            failed_links: self.failed_links,
            outage_scope: self.outage_scope,
            outage_reference: self.outage_reference,
            selector,
        })
    }
}
