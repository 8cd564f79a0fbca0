//! DataFrame value extraction helpers.
//!
//! Internal utilities for reading cells as strings, replacing columns and
//! filtering rows by a keep-mask.

use polars::prelude::{
    AnyValue, BooleanChunked, Column, DataFrame, DataType, NewChunkedArray, PolarsResult,
};

/// Converts a Polars AnyValue to a String representation.
/// Returns empty string for Null, properly formats numeric types.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Converts a cell to a string, keeping nulls as `None`.
pub fn cell_string(value: AnyValue<'_>) -> Option<String> {
    match value {
        AnyValue::Null => None,
        other => Some(any_to_string(other)),
    }
}

/// Formats a floating-point number as a string without trailing zeros.
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

/// Parses a string as f64, returning None for invalid or empty strings and NaN.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|number| !number.is_nan())
}

/// Whether the column exists and holds strings.
pub fn is_string_column(df: &DataFrame, name: &str) -> bool {
    df.column(name)
        .is_ok_and(|column| column.dtype() == &DataType::String)
}

/// Names of all string-typed columns, in frame order.
pub fn string_column_names(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|column| column.dtype() == &DataType::String)
        .map(|column| column.name().to_string())
        .collect()
}

/// Read every cell of a column as an optional string.
///
/// Non-string columns are rendered with [`any_to_string`]. Returns `None` when
/// the column does not exist.
pub fn column_values(df: &DataFrame, name: &str) -> Option<Vec<Option<String>>> {
    let column = df.column(name).ok()?;
    if let Ok(ca) = column.str() {
        return Some(ca.into_iter().map(|v| v.map(str::to_string)).collect());
    }
    let values = (0..df.height())
        .map(|idx| cell_string(column.get(idx).unwrap_or(AnyValue::Null)))
        .collect();
    Some(values)
}

/// Replace (or append) a string column.
pub fn replace_string_column(
    df: &mut DataFrame,
    name: &str,
    values: Vec<Option<String>>,
) -> PolarsResult<()> {
    df.with_column(Column::new(name.into(), values))?;
    Ok(())
}

/// Keep only rows whose mask entry is `true`. Returns the number of rows removed.
pub fn retain_rows(df: &mut DataFrame, keep: &[bool]) -> PolarsResult<usize> {
    let removed = keep.iter().filter(|k| !**k).count();
    if removed == 0 {
        return Ok(0);
    }
    let mask = BooleanChunked::from_slice("keep".into(), keep);
    *df = df.filter(&mask)?;
    Ok(removed)
}

/// Whether a string contains any decimal digit.
pub fn has_digit(value: &str) -> bool {
    value.chars().any(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_numeric_strips_trailing_zeros() {
        assert_eq!(format_numeric(10.0), "10");
        assert_eq!(format_numeric(10.5), "10.5");
        assert_eq!(format_numeric(100.0), "100");
    }

    #[test]
    fn parse_f64_rejects_nan() {
        assert_eq!(parse_f64(" 2.5 "), Some(2.5));
        assert_eq!(parse_f64("NaN"), None);
        assert_eq!(parse_f64("nan"), None);
        assert_eq!(parse_f64(""), None);
    }

    #[test]
    fn retain_rows_filters_by_mask() {
        let mut df = DataFrame::new(vec![Column::new("a".into(), vec!["x", "y", "z"])]).unwrap();
        let removed = retain_rows(&mut df, &[true, false, true]).unwrap();
        assert_eq!(removed, 1);
        assert_eq!(
            column_values(&df, "a").unwrap(),
            vec![Some("x".to_string()), Some("z".to_string())]
        );
    }

    #[test]
    fn column_values_renders_numbers() {
        let df = DataFrame::new(vec![Column::new("n".into(), vec![Some(1.5f64), None])]).unwrap();
        assert_eq!(
            column_values(&df, "n").unwrap(),
            vec![Some("1.5".to_string()), None]
        );
        assert!(column_values(&df, "missing").is_none());
    }
}
