//! Currency stripping, numeric coercion and column housekeeping.

use polars::prelude::{Column, DataFrame, PolarsResult};

use super::{ColumnChange, rewrite_text_column};
use crate::data_utils::{column_values, is_string_column, parse_f64};

/// Remove currency symbol text from every string cell of a column.
pub fn strip_currency(
    df: &mut DataFrame,
    column: &str,
    symbols: &[String],
) -> PolarsResult<ColumnChange> {
    if !is_string_column(df, column) {
        df.column(column)?;
        return Ok(ColumnChange::default());
    }
    rewrite_text_column(df, column, |value| Some(remove_symbols(value, symbols)))
}

fn remove_symbols(value: &str, symbols: &[String]) -> String {
    symbols
        .iter()
        .filter(|symbol| !symbol.is_empty())
        .fold(value.to_string(), |acc, symbol| acc.replace(symbol.as_str(), ""))
}

/// Coerce a column to `Float64`; cells that do not parse become null.
pub fn coerce_numeric(df: &mut DataFrame, column: &str) -> PolarsResult<ColumnChange> {
    let Some(values) = column_values(df, column) else {
        df.column(column)?;
        return Ok(ColumnChange::default());
    };
    let mut change = ColumnChange::default();
    let numbers: Vec<Option<f64>> = values
        .iter()
        .map(|value| {
            let parsed = value.as_deref().and_then(parse_f64);
            if value.is_some() && parsed.is_none() {
                change.nulled += 1;
            }
            parsed
        })
        .collect();
    df.with_column(Column::new(column.into(), numbers))?;
    Ok(change)
}

/// Rename a column. A missing source column is an error.
pub fn rename_column(df: &mut DataFrame, from: &str, to: &str) -> PolarsResult<()> {
    df.rename(from, to.into())?;
    Ok(())
}

/// Drop the named columns, ignoring any that are absent. Returns how many were dropped.
pub fn drop_columns(df: &mut DataFrame, columns: &[&str]) -> usize {
    let mut dropped = 0;
    for name in columns {
        if df.drop_in_place(name).is_ok() {
            dropped += 1;
        }
    }
    dropped
}
