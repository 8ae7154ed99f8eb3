//! Builders for grid CSV text in the twelve-column export layout.
//!
//! Columns: `NodeID, Type, Latitude, Longitude, Capacity, Region, Status,
//! ConnectedTo, LineResistance, Voltage, Load, MonthlyMeter`.

use std::fmt::Write as _;

use crate::scenario::{FIVE_NODE_CATEGORIES, FIVE_NODE_ROWS};

/// Header line written by [`GridCsvBuilder`].
pub const HEADER: &str = "NodeID,Type,Latitude,Longitude,Capacity,Region,Status,\
ConnectedTo,LineResistance,Voltage,Load,MonthlyMeter";

/// Accumulates grid rows and renders them as CSV text.
///
/// # Examples
/// ```
/// use gridlink_test_support::csv::GridCsvBuilder;
///
/// let text = GridCsvBuilder::new().row(0, "House", "1", "2.4", "30").finish();
/// assert_eq!(text.lines().count(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct GridCsvBuilder {
    rows: Vec<String>,
}

impl GridCsvBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a well-formed row. Text arguments are written verbatim so
    /// tests can inject malformed fields.
    #[must_use]
    pub fn row(
        mut self,
        id: i64,
        category: &str,
        connected_to: &str,
        resistance: &str,
        meter: &str,
    ) -> Self {
        let mut line = String::new();
        let _ = write!(
            line,
            "{id},{category},6.9271,79.8612,250,Western,Active,{connected_to},{resistance},11,40,{meter}"
        );
        self.rows.push(line);
        self
    }

    /// Appends an arbitrary raw line.
    #[must_use]
    pub fn raw(mut self, line: impl Into<String>) -> Self {
        self.rows.push(line.into());
        self
    }

    /// Appends `count` filler rows that connect each row to the next.
    #[must_use]
    pub fn chain(mut self, count: usize) -> Self {
        let start = self.rows.len();
        for offset in 0..count {
            let position = start + offset;
            let id = i64::try_from(position).unwrap_or(i64::MAX);
            self = self.row(id, "House", &(position + 1).to_string(), "1.0", "1");
        }
        self
    }

    /// Renders the header and every row, newline terminated.
    #[must_use]
    pub fn finish(self) -> String {
        let mut text = String::from(HEADER);
        text.push('\n');
        for row in self.rows {
            text.push_str(&row);
            text.push('\n');
        }
        text
    }
}

/// Renders the five-node scenario as CSV text.
#[must_use]
pub fn five_node_csv() -> String {
    FIVE_NODE_ROWS
        .iter()
        .zip(FIVE_NODE_CATEGORIES)
        .enumerate()
        .fold(GridCsvBuilder::new(), |builder, (row, ((target, weight, meter), category))| {
            let id = i64::try_from(row).unwrap_or(i64::MAX);
            builder.row(
                id,
                category,
                &target.to_string(),
                &format!("{weight}.0"),
                &meter.to_string(),
            )
        })
        .finish()
}
