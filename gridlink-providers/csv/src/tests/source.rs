use gridlink_test_support::csv::{GridCsvBuilder, five_node_csv};
use rstest::rstest;

use std::io::{self, BufReader, Read};

use crate::{ColumnLayout, CsvGridSource, CsvOptions, CsvProviderError, RowField};

fn load(text: &str, options: CsvOptions) -> Result<CsvGridSource, CsvProviderError> {
    CsvGridSource::try_from_reader("test", text.as_bytes(), options)
}

#[test]
fn scenario_csv_loads_five_clean_rows() {
    let source = load(&five_node_csv(), CsvOptions::default()).expect("valid csv");
    assert_eq!(source.len(), 5);
    assert!(source.issues().is_empty());
    assert_eq!(source.name(), "test");
    let graph = source.into_graph().expect("fits");
    assert_eq!(graph.links().len(), 5);
}

#[test]
fn header_and_short_lines_are_skipped() {
    let text = GridCsvBuilder::new()
        .raw("")
        .raw("x")
        .row(0, "House", "1", "1", "1")
        .raw("\r")
        .finish();
    let source = load(&text, CsvOptions::default()).expect("valid csv");
    assert_eq!(source.len(), 1);
}

#[test]
fn header_only_input_is_empty() {
    let source = load("NodeID,Type\n", CsvOptions::default()).expect("valid csv");
    assert!(source.is_empty());
}

#[rstest]
#[case::at_capacity(3, true)]
#[case::over_capacity(2, false)]
fn capacity_is_enforced(#[case] capacity: usize, #[case] accepted: bool) {
    let text = GridCsvBuilder::new().chain(3).finish();
    let result = load(&text, CsvOptions::default().with_capacity(capacity));
    match result {
        Ok(source) => {
            assert!(accepted);
            assert_eq!(source.len(), 3);
        }
        Err(error) => {
            assert!(!accepted);
            assert!(matches!(error, CsvProviderError::CapacityExceeded { capacity: 2 }));
            assert_eq!(error.code(), "CSV_CAPACITY_EXCEEDED");
        }
    }
}

#[test]
fn custom_layout_reads_other_columns() {
    let layout = ColumnLayout {
        id: 0,
        category: 1,
        connected_to: 2,
        resistance: 3,
        meter: 4,
    };
    let text = "id,type,to,r,m\n0,HydroPlant,1,4.0,90\n1,House,0,4.0,10\n";
    let source = load(text, CsvOptions::default().with_layout(layout)).expect("valid csv");
    assert!(source.issues().is_empty());
    assert_eq!(source.records()[0].meter, 90);
    let graph = source.into_graph().expect("fits");
    assert_eq!(graph.spanning_candidates().len(), 1);
}

fn with_invalid_byte(text: &str, marker: &str) -> Vec<u8> {
    let mut bytes = text.as_bytes().to_vec();
    let at = text.find(marker).expect("marker present");
    bytes[at] = 0xff;
    bytes
}

#[test]
fn invalid_utf8_row_is_decoded_lossily() {
    let text = GridCsvBuilder::new()
        .row(0, "SolarPlant", "1", "1.0", "10")
        .row(1, "Ho#use", "2", "1.0", "20")
        .row(2, "House", "0", "1.0", "30")
        .finish();
    let bytes = with_invalid_byte(&text, "#");
    let source = CsvGridSource::try_from_reader("test", bytes.as_slice(), CsvOptions::default())
        .expect("loads");
    assert_eq!(source.len(), 3);
    assert_eq!(source.records()[1].category, "Ho\u{fffd}use");
    assert_eq!(source.records()[1].meter, 20);
    assert_eq!(source.records()[2].category, "House");

    assert_eq!(source.issues().len(), 1);
    let issue = &source.issues()[0];
    assert_eq!((issue.row, issue.line, issue.field), (1, 3, RowField::Encoding));
    assert!(issue.raw.as_deref().is_some_and(|raw| raw.starts_with("1,Ho\u{fffd}use,")));
}

#[test]
fn invalid_utf8_header_is_still_skipped() {
    let text = GridCsvBuilder::new().row(0, "House", "0", "1.0", "5").finish();
    let bytes = with_invalid_byte(&text, "NodeID");
    let source = CsvGridSource::try_from_reader("test", bytes.as_slice(), CsvOptions::default())
        .expect("loads");
    assert_eq!(source.len(), 1);
    assert!(source.issues().is_empty());
}

struct BrokenStream {
    sent_header: bool,
}

impl Read for BrokenStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.sent_header {
            return Err(io::Error::new(io::ErrorKind::ConnectionReset, "stream dropped"));
        }
        self.sent_header = true;
        let header = b"NodeID,Type\n";
        let len = header.len().min(buf.len());
        buf[..len].copy_from_slice(&header[..len]);
        Ok(len)
    }
}

#[test]
fn stream_failures_stay_fatal() {
    let reader = BufReader::new(BrokenStream { sent_header: false });
    let error = CsvGridSource::try_from_reader("test", reader, CsvOptions::default())
        .expect_err("stream fails after the header");
    assert!(matches!(error, CsvProviderError::Read { line: 2, .. }));
    assert_eq!(error.code(), "CSV_READ");
}
