//! Recording ingestion tests against on-disk CSV files
//!
//! Round-trips realistic vibrometer exports through a temp file and the
//! parser, and asserts the fail-fast behaviour on malformed exports.

use std::io::Write;

use liftmetrics::pipeline::recompute;
use liftmetrics::{parse_csv, FilterConfig, ParseError};

/// Write CSV text to a temp file and read it back, like the CLI does.
fn write_and_read(text: &str) -> String {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(text.as_bytes()).expect("write csv");
    std::fs::read_to_string(file.path()).expect("read csv")
}

#[test]
fn vibrometer_export_parses_and_runs() {
    // Typical export: extra index/time columns, mixed-case headers
    let mut csv = String::from("Index,Time,AX,AY,AZ\n");
    for i in 0..4000 {
        let t = i as f64 / 400.0;
        let az = if t < 2.0 { 30.0 } else if t < 8.0 { 0.0 } else { -30.0 };
        csv.push_str(&format!("{i},{t:.4},0.5,-0.5,{az:.4}\n"));
    }

    let text = write_and_read(&csv);
    let raw = parse_csv(&text, 400.0).expect("parse ok");
    assert_eq!(raw.len(), 4000);

    // The bogus Time column is ignored; time is index-derived
    assert_eq!(raw[0].time, 0.0);
    assert!((raw[400].time - 1.0).abs() < 1e-12);

    let state = recompute(&raw, &FilterConfig::default(), 400.0).expect("pipeline ok");
    assert_eq!(state.processed.len(), 4000);
    assert!(state.boundaries.is_valid);
}

#[test]
fn missing_columns_fail_before_any_processing() {
    let text = write_and_read("time,az\n0.0,1.0\n");
    let err = parse_csv(&text, 1600.0).unwrap_err();
    match err {
        ParseError::MissingColumns { columns } => {
            assert_eq!(columns, vec!["ax".to_string(), "ay".to_string()]);
        }
        other => panic!("expected MissingColumns, got {other:?}"),
    }
}

#[test]
fn corrupt_cell_reports_row_and_column() {
    let text = write_and_read("ax,ay,az\n1,2,3\n1,2,NaN?\n");
    let err = parse_csv(&text, 1600.0).unwrap_err();
    match err {
        ParseError::BadNumber { line, column, .. } => {
            assert_eq!(line, 3);
            assert_eq!(column, "az");
        }
        other => panic!("expected BadNumber, got {other:?}"),
    }
}

#[test]
fn empty_file_is_missing_header() {
    let text = write_and_read("");
    assert!(matches!(
        parse_csv(&text, 1600.0),
        Err(ParseError::MissingHeader)
    ));
}
