//! Columnar date-event documents and datetime assembly.
//!
//! Date events arrive as one JSON object whose fields are parallel mappings
//! from row key to value. The reshaper turns them into a row-oriented frame;
//! [`combine_datetime`] later folds the date parts and time into one column.

use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use polars::prelude::{Column, DataFrame, DataType, TimeUnit};
use serde_json::{Map, Value};

use rdc_model::{EntityKind, schema_for};

use crate::data_utils::column_values;
use crate::error::{Result, TransformError};

/// Column produced by [`combine_datetime`].
pub const DATETIME_COLUMN: &str = "datetime";

/// Date part columns consumed by [`combine_datetime`].
pub const DATE_PART_COLUMNS: [&str; 4] = ["timestamp", "day", "month", "year"];

const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"];

/// Reshape a columnar date-event document into a frame.
pub fn reshape_date_events(document: &Value) -> Result<DataFrame> {
    let fields: Vec<&str> = schema_for(EntityKind::DateEvent).field_names().collect();
    reshape_columnar(document, &fields)
}

/// Reshape parallel field mappings into one column per field.
///
/// Rows follow the keys of the first field, sorted numerically when every key
/// is an integer. A field missing from the document is an error; a row key
/// missing from one field's mapping yields a null cell.
pub fn reshape_columnar(document: &Value, fields: &[&str]) -> Result<DataFrame> {
    let object = document.as_object().ok_or_else(|| {
        TransformError::MalformedSource("expected a JSON object of field mappings".to_string())
    })?;
    let mappings = fields
        .iter()
        .map(|field| field_mapping(object, field))
        .collect::<Result<Vec<_>>>()?;
    let Some(first) = mappings.first() else {
        return Ok(DataFrame::empty());
    };
    let keys = ordered_keys(first);
    let columns = fields
        .iter()
        .zip(&mappings)
        .map(|(field, mapping)| {
            let values: Vec<Option<String>> = keys
                .iter()
                .map(|key| mapping.get(key.as_str()).and_then(scalar_text))
                .collect();
            Column::new((*field).into(), values)
        })
        .collect::<Vec<_>>();
    Ok(DataFrame::new(columns)?)
}

fn field_mapping<'a>(object: &'a Map<String, Value>, field: &str) -> Result<&'a Map<String, Value>> {
    let value = object
        .get(field)
        .ok_or_else(|| TransformError::MissingField(field.to_string()))?;
    value.as_object().ok_or_else(|| {
        TransformError::MalformedSource(format!("field `{field}` is not a key-to-value mapping"))
    })
}

fn ordered_keys(mapping: &Map<String, Value>) -> Vec<String> {
    let mut keys: Vec<String> = mapping.keys().cloned().collect();
    if keys.iter().all(|key| key.parse::<u64>().is_ok()) {
        keys.sort_by(|a, b| compare_numeric(a, b));
    } else {
        keys.sort();
    }
    keys
}

fn compare_numeric(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        _ => a.cmp(b),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// Assemble a datetime from day, month, year and time-of-day strings.
pub fn assemble_datetime(
    year: &str,
    month: &str,
    day: &str,
    time: &str,
) -> Option<NaiveDateTime> {
    let year = year.trim().parse::<i32>().ok()?;
    let month = month.trim().parse::<u32>().ok()?;
    let day = day.trim().parse::<u32>().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(time.trim(), format).ok())?;
    Some(date.and_time(time))
}

/// Replace the date part columns with a single millisecond datetime column.
///
/// Combination is all-or-nothing: if any row fails to assemble the frame is
/// left untouched and an error names the failing rows. Returns rows combined.
pub fn combine_datetime(df: &mut DataFrame) -> Result<usize> {
    let [timestamp, day, month, year] = DATE_PART_COLUMNS.map(|name| {
        column_values(df, name).ok_or_else(|| TransformError::MissingColumn {
            kind: EntityKind::DateEvent,
            column: name.to_string(),
        })
    });
    let (timestamp, day, month, year) = (timestamp?, day?, month?, year?);

    let mut millis = Vec::with_capacity(df.height());
    let mut failed = 0;
    let mut first_failure = None;
    for idx in 0..df.height() {
        let assembled = match (&year[idx], &month[idx], &day[idx], &timestamp[idx]) {
            (Some(y), Some(m), Some(d), Some(t)) => assemble_datetime(y, m, d, t),
            _ => None,
        };
        match assembled {
            Some(dt) => millis.push(Some(dt.and_utc().timestamp_millis())),
            None => {
                failed += 1;
                first_failure.get_or_insert_with(|| format!(
                    "{}-{}-{} {}",
                    year[idx].as_deref().unwrap_or("?"),
                    month[idx].as_deref().unwrap_or("?"),
                    day[idx].as_deref().unwrap_or("?"),
                    timestamp[idx].as_deref().unwrap_or("?"),
                ));
            }
        }
    }
    if let Some(sample) = first_failure {
        return Err(TransformError::DateTimeCombine {
            failed,
            total: df.height(),
            sample,
        });
    }

    let combined = Column::new(DATETIME_COLUMN.into(), millis)
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?;
    df.with_column(combined)?;
    for name in DATE_PART_COLUMNS {
        df.drop_in_place(name)?;
    }
    Ok(df.height())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn numeric_keys_sort_numerically() {
        let doc = json!({ "a": { "10": "x", "2": "y", "1": "z" } });
        let df = reshape_columnar(&doc, &["a"]).unwrap();
        assert_eq!(
            column_values(&df, "a").unwrap(),
            vec![Some("z".to_string()), Some("y".to_string()), Some("x".to_string())]
        );
    }

    #[test]
    fn missing_row_key_is_null() {
        let doc = json!({ "a": { "0": 1, "1": 2 }, "b": { "0": "only" } });
        let df = reshape_columnar(&doc, &["a", "b"]).unwrap();
        assert_eq!(
            column_values(&df, "b").unwrap(),
            vec![Some("only".to_string()), None]
        );
        assert_eq!(column_values(&df, "a").unwrap()[1].as_deref(), Some("2"));
    }

    #[test]
    fn missing_field_is_an_error() {
        let doc = json!({ "a": { "0": 1 } });
        let err = reshape_columnar(&doc, &["a", "b"]).unwrap_err();
        assert!(matches!(err, TransformError::MissingField(ref f) if f == "b"));
    }

    #[test]
    fn assembles_datetime() {
        let dt = assemble_datetime("2012", "9", "19", "22:00:06").unwrap();
        assert_eq!(dt.to_string(), "2012-09-19 22:00:06");
        assert!(assemble_datetime("2012", "13", "19", "22:00:06").is_none());
        assert!(assemble_datetime("2012", "9", "19", "late").is_none());
    }
}
