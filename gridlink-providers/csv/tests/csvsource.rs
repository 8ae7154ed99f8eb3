//! File-backed loading of grid CSV exports.

use std::io::Write;

use gridlink_core::{GridAnalysisBuilder, spanning_forest};
use gridlink_providers_csv::{CsvGridSource, CsvOptions, CsvProviderError, RowField};
use gridlink_test_support::csv::{GridCsvBuilder, five_node_csv};
use tempfile::NamedTempFile;

fn write_temp(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(text.as_bytes()).expect("write csv");
    file
}

#[test]
fn loads_scenario_from_disk_and_analyses_it() {
    let file = write_temp(&five_node_csv());
    let graph = CsvGridSource::try_from_path("scenario", file.path(), CsvOptions::default())
        .expect("readable csv")
        .into_graph()
        .expect("fits");
    assert_eq!(spanning_forest(&graph).expect("non-empty").total_weight(), 10);

    let report = GridAnalysisBuilder::new()
        .with_route(0, Some(4))
        .with_meter_adjustment(None)
        .with_failed_links([1])
        .build()
        .expect("valid configuration")
        .run(&graph)
        .expect("analysis succeeds");
    assert_eq!(report.outage().report.disconnected, vec![3, 4]);
}

#[test]
fn missing_file_reports_its_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.csv");
    let error = CsvGridSource::try_from_path("absent", &path, CsvOptions::default())
        .expect_err("missing file");
    match &error {
        CsvProviderError::Io { path: reported, .. } => assert_eq!(reported, &path),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(error.code(), "CSV_IO");
    assert!(error.to_string().contains("absent.csv"));
}

#[test]
fn defaulted_fields_survive_into_the_graph() {
    let text = GridCsvBuilder::new()
        .row(0, "SolarPlant", "1", "abc", "12")
        .row(1, "House", "7", "1.0", "oops")
        .finish();
    let file = write_temp(&text);
    let source = CsvGridSource::try_from_path("messy", file.path(), CsvOptions::default())
        .expect("readable csv");

    let fields: Vec<RowField> = source.issues().iter().map(|issue| issue.field).collect();
    assert_eq!(fields, vec![RowField::Resistance, RowField::Meter]);

    let graph = source.into_graph().expect("fits");
    assert_eq!(graph.links()[0].weight(), 1);
    assert_eq!(graph.skipped_links().len(), 1);
    assert_eq!(graph.meter_values(), vec![12, 0]);
}
