//! Command-line interface orchestration for gridlink.
//!
//! The `analyse` command loads a grid CSV export, runs every analysis stage
//! over it, and hands an [`ExecutionSummary`] to [`render_summary`].

mod commands;

pub use commands::{
    AnalyseCommand, Cli, CliError, Command, ExecutionSummary, OutageScopeArg, render_summary,
    run_cli,
};

#[cfg(test)]
mod test_helpers;
