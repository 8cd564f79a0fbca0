//! Three-stage record deduplication.

use std::collections::HashSet;

use polars::prelude::{DataFrame, PolarsResult};

use rdc_model::{DedupKeys, DedupReport};

use crate::data_utils::{column_values, retain_rows};

/// Stands in for a null cell inside a composite key.
const NULL_MARKER: &str = "\u{0}";
const KEY_SEPARATOR: char = '\u{1f}';

/// Remove later rows that repeat the key formed by `keys`, keeping the first.
///
/// Rows whose key cells are all null are never treated as duplicates. Key
/// columns absent from the frame are ignored; with none present nothing is
/// removed. Returns rows removed.
pub fn dedupe_by_keys(df: &mut DataFrame, keys: &[&str]) -> PolarsResult<usize> {
    let key_values: Vec<Vec<Option<String>>> = keys
        .iter()
        .filter_map(|name| column_values(df, name))
        .collect();
    if key_values.is_empty() {
        return Ok(0);
    }
    let keep = first_occurrences(df.height(), &key_values, true);
    retain_rows(df, &keep)
}

/// Remove rows identical in every column to an earlier row. Returns rows removed.
pub fn dedupe_full_rows(df: &mut DataFrame) -> PolarsResult<usize> {
    let names: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();
    let all_values: Vec<Vec<Option<String>>> = names
        .iter()
        .filter_map(|name| column_values(df, name))
        .collect();
    if all_values.is_empty() {
        return Ok(0);
    }
    let keep = first_occurrences(df.height(), &all_values, false);
    retain_rows(df, &keep)
}

fn first_occurrences(
    height: usize,
    columns: &[Vec<Option<String>>],
    keep_all_null: bool,
) -> Vec<bool> {
    let mut seen = HashSet::with_capacity(height);
    let mut keep = Vec::with_capacity(height);
    for idx in 0..height {
        if keep_all_null && columns.iter().all(|values| values[idx].is_none()) {
            keep.push(true);
            continue;
        }
        let mut composite = String::new();
        for (pos, values) in columns.iter().enumerate() {
            if pos > 0 {
                composite.push(KEY_SEPARATOR);
            }
            composite.push_str(values[idx].as_deref().unwrap_or(NULL_MARKER));
        }
        keep.push(seen.insert(composite));
    }
    keep
}

/// Run primary-key, full-row and composite-key deduplication in that order.
pub fn deduplicate(df: &mut DataFrame, keys: &DedupKeys) -> PolarsResult<DedupReport> {
    let by_primary_key = dedupe_by_keys(df, &[keys.primary])?;
    let by_full_row = dedupe_full_rows(df)?;
    let by_composite_key = dedupe_by_keys(df, keys.composite)?;
    Ok(DedupReport {
        by_primary_key,
        by_full_row,
        by_composite_key,
    })
}
