//! DataFrame construction from JSON records.
//!
//! Every column is built as optional strings. Typing happens in the cleaners,
//! which need the raw text to repair it.

use std::collections::BTreeMap;

use polars::prelude::{Column, DataFrame, NamedFrom, Series};
use serde_json::{Map, Value};

use crate::error::{IngestError, Result};

/// Render a JSON scalar as text. `null` becomes a missing value.
pub fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// Build a string DataFrame from record objects.
///
/// Columns appear in first-seen order. Keys absent from a record yield
/// missing values.
pub fn build_frame_from_records(records: &[Map<String, Value>]) -> Result<DataFrame> {
    let mut names: Vec<&str> = Vec::new();
    for record in records {
        for key in record.keys() {
            if !names.contains(&key.as_str()) {
                names.push(key);
            }
        }
    }

    let mut columns: Vec<Column> = Vec::with_capacity(names.len());
    for name in names {
        let values: Vec<Option<String>> = records
            .iter()
            .map(|record| record.get(name).and_then(value_to_string))
            .collect();
        columns.push(Series::new(name.into(), values).into());
    }
    Ok(DataFrame::new(columns)?)
}

/// Convert a column-oriented object (`{"col": {"0": v, "1": v}}`) into
/// records ordered by numeric row label.
pub fn records_from_columns(
    object: &Map<String, Value>,
    origin: &str,
) -> Result<Vec<Map<String, Value>>> {
    let mut rows: BTreeMap<u64, Map<String, Value>> = BTreeMap::new();
    for (column, cells) in object {
        let Value::Object(cells) = cells else {
            return Err(IngestError::JsonLayout {
                origin: origin.to_string(),
                reason: format!("column '{column}' is not an object of row labels"),
            });
        };
        for (label, value) in cells {
            let row = label.parse::<u64>().map_err(|_| IngestError::JsonLayout {
                origin: origin.to_string(),
                reason: format!("row label '{label}' is not an integer"),
            })?;
            rows.entry(row)
                .or_default()
                .insert(column.clone(), value.clone());
        }
    }
    Ok(rows.into_values().collect())
}

/// Build a frame from any supported JSON document layout.
pub fn build_frame_from_json(document: Value, origin: &str) -> Result<DataFrame> {
    match document {
        Value::Array(items) => {
            let mut records = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::Object(record) => records.push(record),
                    _ => {
                        return Err(IngestError::JsonLayout {
                            origin: origin.to_string(),
                            reason: "array items must be objects".to_string(),
                        });
                    }
                }
            }
            build_frame_from_records(&records)
        }
        Value::Object(object) => build_frame_from_records(&records_from_columns(&object, origin)?),
        _ => Err(IngestError::JsonLayout {
            origin: origin.to_string(),
            reason: "expected an array or an object".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_records_with_missing_keys() {
        let document = json!([
            {"index": 0, "name": "a"},
            {"index": 1, "extra": null}
        ]);
        let df = build_frame_from_json(document, "test").unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 3);
        let name = df.column("name").unwrap().str().unwrap();
        assert_eq!(name.get(0), Some("a"));
        assert_eq!(name.get(1), None);
        let index = df.column("index").unwrap().str().unwrap();
        assert_eq!(index.get(1), Some("1"));
    }

    #[test]
    fn test_columns_keep_document_order() {
        let document = json!([
            {"store_code": "WEB-1388012W", "address": "N/A", "index": 0},
            {"index": 1, "store_code": "BL-8387506C", "lat": null}
        ]);
        let df = build_frame_from_json(document, "test").unwrap();
        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["store_code", "address", "index", "lat"]);
    }

    #[test]
    fn test_column_oriented_rows_sorted_numerically() {
        let document = json!({
            "month": {"10": "9", "2": "12"},
            "year": {"2": "1997", "10": "2012"}
        });
        let df = build_frame_from_json(document, "test").unwrap();
        let month = df.column("month").unwrap().str().unwrap();
        assert_eq!(month.get(0), Some("12"));
        assert_eq!(month.get(1), Some("9"));
    }

    #[test]
    fn test_scalar_document_rejected() {
        let err = build_frame_from_json(json!(3), "test").unwrap_err();
        assert!(matches!(err, IngestError::JsonLayout { .. }));
    }
}
