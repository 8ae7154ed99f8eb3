//! Row splitting and per-field defaulting.

use gridlink_core::NodeRecord;
use tracing::debug;

use crate::layout::ColumnLayout;

/// Category assigned when a row has none.
pub(crate) const UNKNOWN_CATEGORY: &str = "Unknown";

/// Weight assigned when the resistance is missing or malformed.
pub(crate) const DEFAULT_RESISTANCE: i64 = 1;

/// A part of a row the provider decodes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RowField {
    /// The whole line, which was not valid UTF-8 and was decoded lossily.
    Encoding,
    /// Declared node id.
    Id,
    /// Node category such as `SolarPlant`.
    Category,
    /// Declared connection target.
    ConnectedTo,
    /// Line resistance of the declared connection.
    Resistance,
    /// Monthly meter reading.
    Meter,
}

/// A field that was missing or malformed and replaced by its default.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RowIssue {
    /// Zero-based data row (node id).
    pub row: usize,
    /// One-based line number in the input, header included.
    pub line: usize,
    /// Field that was defaulted.
    pub field: RowField,
    /// Raw text, `None` when the column was absent.
    pub raw: Option<String>,
}

/// Splits a line on commas outside double quotes. Quotes are dropped and
/// surrounding whitespace is trimmed from every field.
pub(crate) fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    for ch in line.chars() {
        match ch {
            '"' => quoted = !quoted,
            ',' if !quoted => {
                fields.push(current.trim().to_owned());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_owned());
    fields
}

/// Collects issues for one row while its fields are decoded.
pub(crate) struct RowParser<'a> {
    row: usize,
    line: usize,
    fields: &'a [String],
    issues: &'a mut Vec<RowIssue>,
}

impl<'a> RowParser<'a> {
    pub(crate) fn new(
        row: usize,
        line: usize,
        fields: &'a [String],
        issues: &'a mut Vec<RowIssue>,
    ) -> Self {
        Self {
            row,
            line,
            fields,
            issues,
        }
    }

    /// Decodes the row into a record, defaulting any unusable field.
    pub(crate) fn record(mut self, layout: &ColumnLayout) -> NodeRecord {
        let fallback_id = i64::try_from(self.row).unwrap_or(i64::MAX);
        let id = self
            .decode(layout.id, RowField::Id, |raw| raw.parse::<i64>().ok())
            .unwrap_or(fallback_id);
        let category = self
            .decode(layout.category, RowField::Category, |raw| {
                (!raw.is_empty()).then(|| raw.to_owned())
            })
            .unwrap_or_else(|| UNKNOWN_CATEGORY.to_owned());
        let target = self.decode(layout.connected_to, RowField::ConnectedTo, |raw| {
            raw.parse::<i64>().ok()
        });
        let weight = self
            .decode(layout.resistance, RowField::Resistance, parse_resistance)
            .unwrap_or(DEFAULT_RESISTANCE);
        let meter = self
            .decode(layout.meter, RowField::Meter, |raw| raw.parse::<i64>().ok())
            .unwrap_or(0);

        let record = NodeRecord::new(id, category, meter);
        match target {
            Some(target) => record.with_connection(target, weight),
            None => record,
        }
    }

    fn decode<T>(
        &mut self,
        column: usize,
        field: RowField,
        parse: impl FnOnce(&str) -> Option<T>,
    ) -> Option<T> {
        let raw = self.fields.get(column);
        let value = raw.and_then(|text| parse(text));
        if value.is_none() {
            debug!(
                row = self.row,
                line = self.line,
                field = ?field,
                raw = raw.map(String::as_str),
                "defaulting unusable field"
            );
            self.issues.push(RowIssue {
                row: self.row,
                line: self.line,
                field,
                raw: raw.cloned(),
            });
        }
        value
    }
}

/// Reads a resistance as a float and rounds it to the nearest integer.
fn parse_resistance(raw: &str) -> Option<i64> {
    let value = raw.parse::<f64>().ok().filter(|value| value.is_finite())?;
    // `as` saturates floats outside the `i64` range.
    let rounded = value.round() as i64;
    Some(rounded)
}
