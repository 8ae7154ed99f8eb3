//! Command implementations and argument parsing for the gridlink CLI.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use gridlink_core::{
    AnalysisReport, DEFAULT_FAILED_LINKS, DEFAULT_METER_ADJUSTMENT, DEFAULT_METER_WINDOW,
    DEFAULT_NODE_CAPACITY, GridAnalysisBuilder, GridError, MeterAdjustment, OutageScope,
    SourceScoring,
};
use gridlink_providers_csv::{CsvGridSource, CsvOptions, CsvProviderError};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

const DEFAULT_MST_SAMPLE: usize = 10;
const DEFAULT_OUTAGE_SAMPLE: usize = 15;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "gridlink", about = "Analyse an infrastructure grid exported as CSV.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run every analysis over a grid CSV export.
    Analyse(AnalyseCommand),
}

/// Options accepted by the `analyse` command.
#[derive(Debug, Args, Clone)]
pub struct AnalyseCommand {
    /// Path to the grid CSV export.
    pub path: PathBuf,

    /// Override name for the data source (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,

    /// Route source node.
    #[arg(long, default_value_t = 0)]
    pub source: usize,

    /// Route destination node (defaults to the source's declared neighbour).
    #[arg(long)]
    pub destination: Option<usize>,

    /// First row of the meter window, inclusive.
    #[arg(long = "window-start", default_value_t = DEFAULT_METER_WINDOW.0)]
    pub window_start: usize,

    /// Last row of the meter window, inclusive.
    #[arg(long = "window-end", default_value_t = DEFAULT_METER_WINDOW.1)]
    pub window_end: usize,

    /// Row whose meter reading is adjusted.
    #[arg(long = "adjust-index", default_value_t = DEFAULT_METER_ADJUSTMENT.index)]
    pub adjust_index: usize,

    /// Amount added to the adjusted meter reading.
    #[arg(
        long = "adjust-delta",
        default_value_t = DEFAULT_METER_ADJUSTMENT.delta,
        allow_negative_numbers = true,
    )]
    pub adjust_delta: i64,

    /// Skip the meter adjustment.
    #[arg(long = "no-adjust")]
    pub no_adjust: bool,

    /// Index of a link to fail; repeat for several.
    #[arg(long = "fail-link", default_values_t = DEFAULT_FAILED_LINKS)]
    pub fail_links: Vec<usize>,

    /// Run the outage simulation with no failed links.
    #[arg(long = "no-failures", conflicts_with = "fail_links")]
    pub no_failures: bool,

    /// Link list that failed indices address.
    #[arg(long = "outage-scope", value_enum, default_value_t = OutageScopeArg::AllLinks)]
    pub outage_scope: OutageScopeArg,

    /// Node whose class counts as still connected.
    #[arg(long, default_value_t = 0)]
    pub reference: usize,

    /// Seed for generation-source scores.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Score generation sources by meter reading instead of a seeded draw.
    #[arg(long = "score-by-meter")]
    pub score_by_meter: bool,

    /// Maximum number of data rows accepted.
    #[arg(long, default_value_t = DEFAULT_NODE_CAPACITY)]
    pub capacity: usize,

    /// Number of spanning tree edges printed.
    #[arg(long = "mst-sample", default_value_t = DEFAULT_MST_SAMPLE)]
    pub mst_sample: usize,

    /// Number of disconnected nodes printed.
    #[arg(long = "outage-sample", default_value_t = DEFAULT_OUTAGE_SAMPLE)]
    pub outage_sample: usize,
}

impl AnalyseCommand {
    /// Creates a command for `path` with every other option at its default.
    #[must_use]
    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            name: None,
            source: 0,
            destination: None,
            window_start: DEFAULT_METER_WINDOW.0,
            window_end: DEFAULT_METER_WINDOW.1,
            adjust_index: DEFAULT_METER_ADJUSTMENT.index,
            adjust_delta: DEFAULT_METER_ADJUSTMENT.delta,
            no_adjust: false,
            fail_links: DEFAULT_FAILED_LINKS.to_vec(),
            no_failures: false,
            outage_scope: OutageScopeArg::AllLinks,
            reference: 0,
            seed: 0,
            score_by_meter: false,
            capacity: DEFAULT_NODE_CAPACITY,
            mst_sample: DEFAULT_MST_SAMPLE,
            outage_sample: DEFAULT_OUTAGE_SAMPLE,
        }
    }

    fn analysis_builder(&self) -> GridAnalysisBuilder {
        let adjustment = (!self.no_adjust).then_some(MeterAdjustment {
            index: self.adjust_index,
            delta: self.adjust_delta,
        });
        let failed_links: &[usize] = if self.no_failures {
            &[]
        } else {
            &self.fail_links
        };
        let scoring = if self.score_by_meter {
            SourceScoring::MeterReading
        } else {
            SourceScoring::Seeded { seed: self.seed }
        };
        GridAnalysisBuilder::new()
            .with_route(self.source, self.destination)
            .with_meter_window(self.window_start, self.window_end)
            .with_meter_adjustment(adjustment)
            .with_failed_links(failed_links.iter().copied())
            .with_outage_scope(self.outage_scope.into())
            .with_outage_reference(self.reference)
            .with_source_scoring(scoring)
    }
}

/// Command-line spelling of [`OutageScope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutageScopeArg {
    /// Index the accepted spanning tree edges.
    SpanningTree,
    /// Index every candidate link in ascending weight order.
    AllLinks,
}

impl From<OutageScopeArg> for OutageScope {
    fn from(value: OutageScopeArg) -> Self {
        match value {
            OutageScopeArg::SpanningTree => Self::SpanningTree,
            OutageScopeArg::AllLinks => Self::AllLinks,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Loading the grid CSV failed.
    #[error(transparent)]
    Csv(#[from] CsvProviderError),
    /// Configuring or running the analysis failed.
    #[error(transparent)]
    Core(#[from] GridError),
}

impl CliError {
    /// Returns the stable code of the failure.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Csv(error) => error.code(),
            Self::Core(error) => error.code().as_str(),
        }
    }

    /// Returns the code of the component error wrapped by a core failure.
    #[must_use]
    pub fn component_code(&self) -> Option<&'static str> {
        match self {
            Self::Csv(_) => None,
            Self::Core(error) => error.component_code(),
        }
    }
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Name of the loaded data source.
    pub data_source: String,
    /// Fields replaced by defaults while loading.
    pub defaulted_fields: usize,
    /// Analysis output.
    pub report: AnalysisReport,
    /// Number of spanning tree edges to print.
    pub mst_sample: usize,
    /// Number of disconnected nodes to print.
    pub outage_sample: usize,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading or analysis fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use gridlink_cli::cli::{AnalyseCommand, Cli, Command, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "NodeID,Type\n0,SolarPlant\n1,House\n")?;
/// let mut command = AnalyseCommand::for_path(file.path());
/// command.no_adjust = true;
/// let summary = run_cli(Cli { command: Command::Analyse(command) })?;
/// assert_eq!(summary.report.node_count(), 2);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Analyse(command) => {
            Span::current().record("command", field::display("analyse"));
            run_analyse(command)
        }
    }
}

#[instrument(
    name = "cli.analyse",
    err,
    skip(command),
    fields(path = field::Empty, rows = field::Empty),
)]
pub(super) fn run_analyse(command: AnalyseCommand) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    span.record("path", field::display(command.path.display()));

    let analysis = command.analysis_builder().build()?;
    let name = derive_data_source_name(&command.path, command.name.as_deref());
    let options = CsvOptions::default().with_capacity(command.capacity);
    let source = CsvGridSource::try_from_path(name, &command.path, options)?;
    span.record("rows", source.len());

    let data_source = source.name().to_owned();
    let defaulted_fields = source.issues().len();
    let graph = source.into_graph()?;
    let report = analysis.run(&graph)?;

    info!(
        data_source = data_source.as_str(),
        nodes = report.node_count(),
        mst_cost = report.spanning().total_weight(),
        "analysis completed"
    );
    Ok(ExecutionSummary {
        data_source,
        defaulted_fields,
        report,
        mst_sample: command.mst_sample,
        outage_sample: command.outage_sample,
    })
}

pub(super) fn derive_data_source_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }

    path.file_stem()
        .and_then(|value| value.to_str())
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| "grid".to_owned())
}

/// Renders `summary` to `writer` as a sectioned text report.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    let report = &summary.report;
    writeln!(
        writer,
        "loaded rows: {} from {} (skipped links: {}, defaulted fields: {})",
        report.node_count(),
        summary.data_source,
        report.skipped_links(),
        summary.defaulted_fields,
    )?;

    writeln!(writer, "\n== generation source ==")?;
    match report.source() {
        Some(best) => writeln!(
            writer,
            "best source: node {} (id {}, {}) score {}",
            best.node, best.declared_id, best.category, best.score
        )?,
        None => writeln!(writer, "best source: none")?,
    }

    render_spanning(report, summary.mst_sample, &mut writer)?;
    render_route(report, &mut writer)?;
    render_meter(report, &mut writer)?;
    render_outage(report, summary.outage_sample, &mut writer)
}

fn render_spanning(
    report: &AnalysisReport,
    sample: usize,
    writer: &mut impl Write,
) -> io::Result<()> {
    let forest = report.spanning();
    writeln!(writer, "\n== minimum spanning tree ==")?;
    writeln!(writer, "total cost: {}", forest.total_weight())?;
    writeln!(writer, "edges: {}", forest.edges().len())?;
    if !forest.is_tree() {
        writeln!(
            writer,
            "graph is disconnected: spanning forest with {} components",
            forest.component_count()
        )?;
    }
    for edge in forest.edges().iter().take(sample) {
        writeln!(
            writer,
            "  {} - {} ({})",
            edge.source(),
            edge.target(),
            edge.weight()
        )?;
    }
    Ok(())
}

fn render_route(report: &AnalysisReport, writer: &mut impl Write) -> io::Result<()> {
    let summary = report.route();
    writeln!(writer, "\n== shortest path ==")?;
    match &summary.route {
        Some(route) => {
            writeln!(
                writer,
                "distance {} -> {}: {}",
                summary.source, summary.destination, route.distance
            )?;
            let path: Vec<String> = route.nodes.iter().map(ToString::to_string).collect();
            writeln!(writer, "path: {}", path.join(" -> "))
        }
        None => writeln!(
            writer,
            "no path from {} to {}",
            summary.source, summary.destination
        ),
    }
}

fn render_meter(report: &AnalysisReport, writer: &mut impl Write) -> io::Result<()> {
    let meter = report.meter();
    let (start, end) = meter.window;
    writeln!(writer, "\n== meter aggregate ==")?;
    writeln!(writer, "total before update: {}", meter.total_before)?;
    writeln!(
        writer,
        "window [{start}, {end}] before update: {}",
        meter.window_before
    )?;
    match meter.adjustment {
        Some(applied) => writeln!(
            writer,
            "update: node {} {} -> {}",
            applied.requested.index, applied.previous, applied.value
        )?,
        None => match meter.ignored_adjustment {
            Some(ignored) => writeln!(
                writer,
                "update: node {} ignored (outside {} rows)",
                ignored.index,
                report.node_count()
            )?,
            None => writeln!(writer, "update: none")?,
        },
    }
    writeln!(writer, "total after update: {}", meter.total_after)?;
    writeln!(
        writer,
        "window [{start}, {end}] after update: {}",
        meter.window_after
    )
}

fn render_outage(
    report: &AnalysisReport,
    sample: usize,
    writer: &mut impl Write,
) -> io::Result<()> {
    let outage = report.outage();
    writeln!(writer, "\n== outage simulation ==")?;
    let scope = match outage.scope {
        OutageScope::SpanningTree => "spanning tree",
        OutageScope::AllLinks => "all links",
    };
    writeln!(writer, "scope: {scope} ({} links)", outage.scope_len)?;
    for link in &outage.failed {
        writeln!(
            writer,
            "failed link: {} - {} ({})",
            link.source(),
            link.target(),
            link.weight()
        )?;
    }
    if !outage.ignored_links.is_empty() {
        writeln!(writer, "ignored indices: {:?}", outage.ignored_links)?;
    }
    let disconnected = &outage.report.disconnected;
    writeln!(
        writer,
        "disconnected from node {}: {}",
        outage.report.reference,
        disconnected.len()
    )?;
    for node in disconnected.iter().take(sample) {
        writeln!(writer, "  {node}")?;
    }
    if disconnected.len() > sample {
        writeln!(writer, "  ... {} more", disconnected.len() - sample)?;
    }
    Ok(())
}
