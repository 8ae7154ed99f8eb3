//! Column positions and load options.

use gridlink_core::DEFAULT_NODE_CAPACITY;

/// Zero-based positions of the columns the provider reads.
///
/// # Examples
/// ```
/// use gridlink_providers_csv::ColumnLayout;
///
/// let layout = ColumnLayout::default();
/// assert_eq!((layout.connected_to, layout.meter), (7, 11));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ColumnLayout {
    /// Declared node identifier.
    pub id: usize,
    /// Category tag such as `SolarPlant`.
    pub category: usize,
    /// Row position of the connected node.
    pub connected_to: usize,
    /// Line resistance, read as a float and rounded.
    pub resistance: usize,
    /// Monthly meter reading.
    pub meter: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            id: 0,
            category: 1,
            connected_to: 7,
            resistance: 8,
            meter: 11,
        }
    }
}

/// Options controlling a CSV load.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CsvOptions {
    /// Maximum number of data rows accepted.
    pub capacity: usize,
    /// Column positions.
    pub layout: ColumnLayout,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_NODE_CAPACITY,
            layout: ColumnLayout::default(),
        }
    }
}

impl CsvOptions {
    /// Overrides the row capacity.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Overrides the column layout.
    #[must_use]
    pub fn with_layout(mut self, layout: ColumnLayout) -> Self {
        self.layout = layout;
        self
    }
}
