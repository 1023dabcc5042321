//! Tests for file sources.

use std::io::Write;

use mrdc_ingest::{CsvSource, IngestError, JsonSource, Source, SourceSpec};
use tempfile::NamedTempFile;

fn temp_file(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

#[test]
fn csv_columns_stay_text() {
    let file = temp_file(
        ".csv",
        "index,card_number,expiry_date\n0,0042,09/23\n1,??4971858637664481,10/25\n",
    );
    let df = CsvSource::new(file.path()).extract().unwrap();
    assert_eq!(df.height(), 2);
    let numbers = df.column("card_number").unwrap().str().unwrap();
    assert_eq!(numbers.get(0), Some("0042"));
    assert_eq!(numbers.get(1), Some("??4971858637664481"));
}

#[test]
fn csv_missing_file() {
    let err = CsvSource::new("/nonexistent/users.csv").extract().unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn json_column_oriented_document() {
    let file = temp_file(
        ".json",
        r#"{"timestamp": {"0": "22:00:06", "1": "09:04:01"},
            "month": {"0": "9", "1": "12"}}"#,
    );
    let df = JsonSource::new(file.path()).extract().unwrap();
    assert_eq!(df.height(), 2);
    let month = df.column("month").unwrap().str().unwrap();
    assert_eq!(month.get(1), Some("12"));
}

#[test]
fn json_parse_error() {
    let file = temp_file(".json", "{not json");
    let err = JsonSource::new(file.path()).extract().unwrap_err();
    assert!(matches!(err, IngestError::JsonParse { .. }));
}

#[test]
fn source_spec_from_toml() {
    let spec: SourceSpec = toml::from_str(
        r#"
kind = "store_api"
number_stores_url = "https://example.test/number_stores"
store_url = "https://example.test/store_details/"
"#,
    )
    .unwrap();
    assert_eq!(spec.kind_name(), "store_api");
    assert!(matches!(
        spec,
        SourceSpec::StoreApi { ref api_key_env, .. } if api_key_env == "MRDC_API_KEY"
    ));
}
