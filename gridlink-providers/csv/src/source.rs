//! Loading grid CSV exports.

use std::{
    borrow::Cow,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use gridlink_core::{GridGraph, NodeRecord};
use tracing::{debug, info, instrument, warn};

use crate::{
    errors::CsvProviderError,
    layout::CsvOptions,
    parse::{RowField, RowIssue, RowParser, split_fields},
};

/// Node records decoded from a grid CSV.
///
/// The first line is a header and is skipped, as is any line shorter than
/// two characters. Every other line becomes one record whose position is its
/// node id. A line that is not valid UTF-8 is decoded lossily and reported as
/// a [`RowField::Encoding`] issue.
///
/// # Examples
/// ```
/// use gridlink_providers_csv::{CsvGridSource, CsvOptions};
///
/// let text = "NodeID,Type\n0,SolarPlant\n1,House\n";
/// let source = CsvGridSource::try_from_reader("demo", text.as_bytes(), CsvOptions::default())?;
/// assert_eq!(source.len(), 2);
/// assert_eq!(source.records()[0].category, "SolarPlant");
/// # Ok::<(), gridlink_providers_csv::CsvProviderError>(())
/// ```
#[derive(Clone, Debug)]
pub struct CsvGridSource {
    name: String,
    records: Vec<NodeRecord>,
    issues: Vec<RowIssue>,
    capacity: usize,
}

impl CsvGridSource {
    /// Loads a grid CSV from `path`.
    ///
    /// # Errors
    /// Returns [`CsvProviderError::Io`] when the file cannot be opened, plus
    /// every error of [`Self::try_from_reader`].
    pub fn try_from_path(
        name: impl Into<String>,
        path: impl AsRef<Path>,
        options: CsvOptions,
    ) -> Result<Self, CsvProviderError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CsvProviderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::try_from_reader(name, BufReader::new(file), options)
    }

    /// Loads a grid CSV from any buffered reader.
    ///
    /// # Errors
    /// Returns [`CsvProviderError::Read`] when the stream fails and
    /// [`CsvProviderError::CapacityExceeded`] when the input holds more data
    /// rows than `options.capacity`.
    #[instrument(
        name = "csv.load",
        err,
        skip(name, reader, options),
        fields(capacity = options.capacity),
    )]
    pub fn try_from_reader<R: BufRead>(
        name: impl Into<String>,
        mut reader: R,
        options: CsvOptions,
    ) -> Result<Self, CsvProviderError> {
        let name = name.into();
        let mut records = Vec::new();
        let mut issues = Vec::new();
        let mut buffer = Vec::new();

        for number in 1.. {
            buffer.clear();
            let read = reader
                .read_until(b'\n', &mut buffer)
                .map_err(|source| CsvProviderError::Read {
                    line: number,
                    source,
                })?;
            if read == 0 {
                break;
            }
            let bytes = trim_line_ending(&buffer);
            let line = String::from_utf8_lossy(bytes);
            if number == 1 || line.len() < 2 {
                continue;
            }
            if records.len() >= options.capacity {
                return Err(CsvProviderError::CapacityExceeded {
                    capacity: options.capacity,
                });
            }
            let row = records.len();
            if let Cow::Owned(decoded) = &line {
                debug!(row, line = number, "decoding invalid UTF-8 lossily");
                issues.push(RowIssue {
                    row,
                    line: number,
                    field: RowField::Encoding,
                    raw: Some(decoded.clone()),
                });
            }
            let fields = split_fields(&line);
            records.push(RowParser::new(row, number, &fields, &mut issues).record(&options.layout));
        }

        if issues.is_empty() {
            info!(source = %name, rows = records.len(), "grid csv loaded");
        } else {
            warn!(
                source = %name,
                rows = records.len(),
                defaulted_fields = issues.len(),
                "grid csv loaded with defaulted fields"
            );
        }

        Ok(Self {
            name,
            records,
            issues,
            capacity: options.capacity,
        })
    }

    /// Returns the data source name.
    #[must_use]
    #[rustfmt::skip]
    pub fn name(&self) -> &str { &self.name }

    /// Returns the number of decoded rows.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.records.len() }

    /// Returns `true` when no rows were decoded.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    /// Returns the decoded records in row order.
    #[must_use]
    #[rustfmt::skip]
    pub fn records(&self) -> &[NodeRecord] { &self.records }

    /// Returns every defaulted field in input order.
    #[must_use]
    #[rustfmt::skip]
    pub fn issues(&self) -> &[RowIssue] { &self.issues }

    /// Freezes the records into a [`GridGraph`] under the load's capacity.
    ///
    /// # Errors
    /// Returns [`CsvProviderError::Graph`] if the graph store rejects the
    /// records.
    pub fn into_graph(self) -> Result<GridGraph, CsvProviderError> {
        Ok(GridGraph::from_records(self.records, self.capacity)?)
    }
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
