//! Benchmark setup error type.
//!
//! Aggregates the errors that may arise while preparing benchmark inputs so
//! setup functions can propagate failures with `?`.

use gridlink_core::{GraphError, MstError, OutageError, PathError};

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Building the synthetic graph failed.
    #[error("graph construction failed: {0}")]
    Graph(#[from] GraphError),
    /// Spanning forest computation failed.
    #[error("MST computation failed: {0}")]
    Mst(#[from] MstError),
    /// Route search failed.
    #[error("route search failed: {0}")]
    Path(#[from] PathError),
    /// Outage simulation failed.
    #[error("outage simulation failed: {0}")]
    Outage(#[from] OutageError),
    /// A zero value was passed where a non-zero integer was required.
    #[error("expected a non-zero value for {context}")]
    ZeroValue {
        /// A description of the parameter that was unexpectedly zero.
        context: &'static str,
    },
}
