//! End-to-end runs of the extract, clean and persist flow.

use std::fs;
use std::path::PathBuf;

use rdc_cli::{Disposition, clean_entity};
use rdc_ingest::FileExtractor;
use rdc_model::{CleaningOptions, EntityKind};
use rdc_output::{CsvDirectorySink, MemorySink, Persisted};
use tempfile::TempDir;

const STORES_CSV: &str = "\
index,address,longitude,lat,locality,store_code,staff_numbers,opening_date,store_type,latitude,country_code,continent
0,N/A,N/A,,N/A,WEB-1388012W,325,2010-06-12,Web Portal,N/A,GB,eeEurope
1,\"4 Quay St
Bristol\",-2.59,51.45,Bristol,BR-4A12BC3D,3n9,October 2012 08,Local,,GB,Europe
2,x,1.0,,Leeds,NULL,12,2001-01-01,Local,53.8,GB,Europe
3,GHT1JK2LO3,GHT1JK2LO3,GHT1JK2LO3,GHT1JK2LO3,GHT1JK2LO3,GHT1JK2LO3,GHT1JK2LO3,GHT1JK2LO3,GHT1JK2LO3,GHT1JK2LO3,GHT1JK2LO3
";

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    path
}

#[test]
fn store_extract_is_cleaned_and_persisted() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "stores.csv", STORES_CSV);
    let sink = MemorySink::new();

    let result = clean_entity(
        EntityKind::Store,
        &FileExtractor::new(&input),
        &sink,
        &CleaningOptions::default(),
        false,
    )
    .unwrap();

    assert_eq!(
        result.disposition,
        Disposition::Persisted(Persisted::Memory("dim_store_details".to_string()))
    );
    assert_eq!(result.report.input_rows, 4);
    assert_eq!(result.report.output_rows, 2);
    let table = sink.table("dim_store_details").unwrap();
    assert_eq!(table.height(), 2);
    assert!(table.column("lat").is_err());
    assert!(table.column("index").is_ok());
}

#[test]
fn csv_sink_writes_destination_file() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "stores.csv", STORES_CSV);
    let sink = CsvDirectorySink::new(dir.path().join("out"));

    let result = clean_entity(
        EntityKind::Store,
        &FileExtractor::new(&input),
        &sink,
        &CleaningOptions::default(),
        false,
    )
    .unwrap();

    let Disposition::Persisted(Persisted::File(path)) = result.disposition else {
        panic!("expected a persisted file");
    };
    let written = fs::read_to_string(path).unwrap();
    assert!(written.starts_with("index,address,longitude,locality,store_code"));
    assert!(written.contains("WEB-1388012W"));
    assert!(written.contains("\"4 Quay St,Bristol\"") || written.contains("4 Quay St,Bristol"));
}

#[test]
fn gate_failure_never_reaches_the_sink() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "stores.csv", STORES_CSV);
    let sink = MemorySink::new();
    let options = CleaningOptions::default().with_expected_rows(EntityKind::Store, 3);

    let err = clean_entity(
        EntityKind::Store,
        &FileExtractor::new(&input),
        &sink,
        &options,
        false,
    )
    .unwrap_err();

    assert!(format!("{err:#}").contains("expected 3 rows"));
    assert!(sink.table_names().is_empty());
}

#[test]
fn missing_column_never_reaches_the_sink() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "cards.csv", "card_number,expiry_date\n4111,09/26\n");
    let sink = MemorySink::new();

    let err = clean_entity(
        EntityKind::Card,
        &FileExtractor::new(&input),
        &sink,
        &CleaningOptions::default(),
        false,
    )
    .unwrap_err();

    assert!(format!("{err:#}").contains("card_provider"));
    assert!(sink.table_names().is_empty());
}

#[test]
fn failed_extraction_is_skipped() {
    let sink = MemorySink::new();
    let result = clean_entity(
        EntityKind::Card,
        &FileExtractor::new("/nonexistent/cards.csv"),
        &sink,
        &CleaningOptions::default(),
        false,
    )
    .unwrap();

    assert_eq!(result.disposition, Disposition::SkippedEmpty);
    assert!(sink.table_names().is_empty());
}

#[test]
fn dry_run_reports_without_persisting() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "stores.csv", STORES_CSV);
    let sink = MemorySink::new();

    let result = clean_entity(
        EntityKind::Store,
        &FileExtractor::new(&input),
        &sink,
        &CleaningOptions::default(),
        true,
    )
    .unwrap();

    assert_eq!(result.disposition, Disposition::DryRun);
    assert_eq!(result.report.output_rows, 2);
    assert!(sink.table_names().is_empty());
}

#[test]
fn date_event_document_is_reshaped_and_persisted() {
    let dir = TempDir::new().unwrap();
    let input = write(
        &dir,
        "date_details.json",
        r#"{
            "timestamp": {"0": "22:00:06", "1": "17:02:06"},
            "month": {"0": "9", "1": "2"},
            "year": {"0": "2012", "1": "1997"},
            "day": {"0": "19", "1": "26"},
            "time_period": {"0": "Evening", "1": "Midday"},
            "date_uuid": {"0": "3b7ca996", "1": "adc86836"}
        }"#,
    );
    let sink = MemorySink::new();

    let result = clean_entity(
        EntityKind::DateEvent,
        &FileExtractor::new(&input),
        &sink,
        &CleaningOptions::default(),
        false,
    )
    .unwrap();

    assert_eq!(result.report.output_rows, 2);
    let table = sink.table("dim_date_times").unwrap();
    assert_eq!(
        table.get_column_names_str(),
        vec!["time_period", "date_uuid", "datetime"]
    );
}
