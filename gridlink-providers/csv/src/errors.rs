use std::{io, path::PathBuf};

use gridlink_core::GraphError;
use thiserror::Error;

/// Fatal failures while loading a grid CSV.
///
/// Malformed fields are never fatal; they are defaulted and reported as
/// [`crate::RowIssue`]s instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CsvProviderError {
    /// The input file could not be opened.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// Reading from the underlying stream failed.
    #[error("failed to read line {line}: {source}")]
    Read {
        /// One-based line number being read.
        line: usize,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The input holds more data rows than the configured capacity.
    #[error("dataset too large for configured capacity of {capacity} rows")]
    CapacityExceeded {
        /// Maximum number of data rows accepted.
        capacity: usize,
    },
    /// The graph store rejected the decoded records.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl CsvProviderError {
    /// Returns a stable machine-readable code for the failure.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "CSV_IO",
            Self::Read { .. } => "CSV_READ",
            Self::CapacityExceeded { .. } => "CSV_CAPACITY_EXCEEDED",
            Self::Graph(source) => source.code().as_str(),
        }
    }
}
