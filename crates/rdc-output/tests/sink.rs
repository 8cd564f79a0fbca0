use std::fs;

use polars::prelude::*;
use rdc_output::{CsvDirectorySink, MemorySink, OutputError, Persisted, Sink};
use tempfile::TempDir;

fn frame(values: &[&str]) -> DataFrame {
    DataFrame::new(vec![
        Series::new("store_code".into(), values.to_vec()).into(),
    ])
    .unwrap()
}

#[test]
fn csv_sink_replaces_previous_contents() {
    let dir = TempDir::new().unwrap();
    let sink = CsvDirectorySink::new(dir.path().join("out"));

    let first = sink
        .persist(&mut frame(&["A", "B", "C"]), "dim_store_details")
        .unwrap();
    let second = sink
        .persist(&mut frame(&["Z"]), "dim_store_details")
        .unwrap();
    assert_eq!(first, second);

    let Persisted::File(path) = second else {
        panic!("expected a file");
    };
    assert_eq!(path.file_name().unwrap(), "dim_store_details.csv");
    assert_eq!(fs::read_to_string(&path).unwrap(), "store_code\nZ\n");
    // Only the table file remains; no staging leftovers.
    assert_eq!(fs::read_dir(path.parent().unwrap()).unwrap().count(), 1);
}

#[test]
fn csv_sink_writes_nulls_as_empty_cells() {
    let dir = TempDir::new().unwrap();
    let sink = CsvDirectorySink::new(dir.path());
    let mut df = DataFrame::new(vec![
        Series::new("a".into(), vec![Some("x"), None]).into(),
        Series::new("b".into(), vec!["1", "2"]).into(),
    ])
    .unwrap();
    sink.persist(&mut df, "t").unwrap();
    let written = fs::read_to_string(dir.path().join("t.csv")).unwrap();
    assert_eq!(written, "a,b\nx,1\n,2\n");
}

#[test]
fn csv_sink_writes_datetimes_to_the_second() {
    let dir = TempDir::new().unwrap();
    let sink = CsvDirectorySink::new(dir.path());
    let datetime = Series::new("datetime".into(), vec![1_348_092_006_000i64])
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))
        .unwrap();
    let mut df = DataFrame::new(vec![datetime.into()]).unwrap();
    sink.persist(&mut df, "dim_date_times").unwrap();
    let written = fs::read_to_string(dir.path().join("dim_date_times.csv")).unwrap();
    assert_eq!(written, "datetime\n2012-09-19 22:00:06\n");
}

#[test]
fn invalid_table_name_is_rejected() {
    let dir = TempDir::new().unwrap();
    let sink = CsvDirectorySink::new(dir.path());
    let err = sink.persist(&mut frame(&["A"]), "../escape").unwrap_err();
    assert!(matches!(err, OutputError::InvalidTableName(_)));
}

#[test]
fn memory_sink_keeps_latest_table() {
    let sink = MemorySink::new();
    sink.persist(&mut frame(&["A", "B"]), "dim_store_details").unwrap();
    sink.persist(&mut frame(&["C"]), "dim_store_details").unwrap();
    assert_eq!(sink.table_names(), vec!["dim_store_details".to_string()]);
    assert_eq!(sink.table("dim_store_details").unwrap().height(), 1);
}
