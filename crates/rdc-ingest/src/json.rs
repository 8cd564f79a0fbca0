//! JSON extracts.
//!
//! Two document shapes are supported: a columnar object of parallel field
//! mappings (date events) and an array of flat records (API responses).

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{IngestError, Result};
use crate::table::RawTable;

/// Shape of a JSON document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonShape {
    /// Object whose values are all key-to-value mappings.
    Columnar,
    /// Array of flat objects.
    Records,
}

/// Parse a JSON file.
pub fn read_json_document(path: &Path) -> Result<Value> {
    let bytes = fs::read(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => IngestError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        },
    })?;
    serde_json::from_slice(&bytes).map_err(|source| IngestError::JsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Classify a document, or `None` when it has neither supported shape.
pub fn detect_shape(document: &Value) -> Option<JsonShape> {
    match document {
        Value::Object(map) if map.values().all(Value::is_object) => Some(JsonShape::Columnar),
        Value::Array(items) if items.iter().all(Value::is_object) => Some(JsonShape::Records),
        _ => None,
    }
}

/// Flatten an array of records into a raw table.
///
/// Columns follow first appearance across records; a key missing from a
/// record is a null cell. Scalars keep their JSON text, strings their content.
pub fn records_to_table(path: &Path, document: &Value) -> Result<RawTable> {
    let Some(items) = document.as_array() else {
        return Err(IngestError::UnsupportedShape {
            path: path.to_path_buf(),
            reason: "expected an array of records".to_string(),
        });
    };
    let mut headers: Vec<String> = Vec::new();
    for item in items {
        if let Some(record) = item.as_object() {
            for key in record.keys() {
                if !headers.contains(key) {
                    headers.push(key.clone());
                }
            }
        }
    }
    let mut table = RawTable::new(headers.clone());
    for item in items {
        let row = headers
            .iter()
            .map(|key| item.get(key).and_then(cell_text))
            .collect();
        table.push_row(row);
    }
    Ok(table)
}

fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_detect_shape() {
        assert_eq!(
            detect_shape(&json!({ "a": { "0": 1 } })),
            Some(JsonShape::Columnar)
        );
        assert_eq!(detect_shape(&json!([{ "a": 1 }])), Some(JsonShape::Records));
        assert_eq!(detect_shape(&json!([1, 2])), None);
        assert_eq!(detect_shape(&json!({ "a": 1 })), None);
    }

    #[test]
    fn test_records_union_keys() {
        let doc = json!([
            { "store_code": "BR-1", "staff_numbers": 12 },
            { "store_code": "WEB-1388012W", "lat": null, "extra": "x" },
        ]);
        let table = records_to_table(Path::new("stores.json"), &doc).unwrap();
        // serde_json maps iterate in key order.
        assert_eq!(table.headers, vec!["staff_numbers", "store_code", "extra", "lat"]);
        assert_eq!(table.rows[0][0].as_deref(), Some("12"));
        assert_eq!(table.rows[0][3], None);
        assert_eq!(table.rows[1][0], None);
        assert_eq!(table.rows[1][1].as_deref(), Some("WEB-1388012W"));
    }
}
