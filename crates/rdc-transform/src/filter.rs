//! Row filters: corrupted-token detection and required-field checks.

use polars::prelude::{DataFrame, PolarsResult};

use rdc_model::RowExemption;

use crate::data_utils::{column_values, retain_rows, string_column_names};

/// Length of the random tokens that replace whole rows in corrupted extracts.
pub const CORRUPTED_TOKEN_LEN: usize = 10;

/// Whether a cell looks like a corruption token.
///
/// A token is exactly ten characters, all letters or digits, mixing both.
/// Pure numbers (phone fragments, EANs) and pure words are never tokens.
pub fn is_corrupted_token(value: &str) -> bool {
    let mut len = 0;
    let mut letters = false;
    let mut digits = false;
    for c in value.chars() {
        len += 1;
        if c.is_ascii_digit() {
            digits = true;
        } else if c.is_alphabetic() {
            letters = true;
        } else {
            return false;
        }
    }
    len == CORRUPTED_TOKEN_LEN && letters && digits
}

/// Rows whose exemption column value is in the exemption list.
fn exempt_rows(df: &DataFrame, exemption: Option<&RowExemption>) -> Vec<bool> {
    let height = df.height();
    let Some(exemption) = exemption else {
        return vec![false; height];
    };
    match column_values(df, &exemption.column) {
        Some(values) => values
            .iter()
            .map(|value| exemption.matches(value.as_deref()))
            .collect(),
        None => vec![false; height],
    }
}

/// Drop every row with a corruption token in any string column.
///
/// Rows matched by `exemption` are kept regardless. Returns rows removed.
pub fn remove_invalid_rows(
    df: &mut DataFrame,
    exemption: Option<&RowExemption>,
) -> PolarsResult<usize> {
    let mut keep = exempt_rows(df, exemption);
    let mut invalid = vec![false; df.height()];
    for name in string_column_names(df) {
        let Some(values) = column_values(df, &name) else {
            continue;
        };
        for (idx, value) in values.iter().enumerate() {
            if value.as_deref().is_some_and(is_corrupted_token) {
                invalid[idx] = true;
            }
        }
    }
    for (slot, bad) in keep.iter_mut().zip(invalid) {
        *slot = *slot || !bad;
    }
    retain_rows(df, &keep)
}

/// Drop rows where any of `columns` is null, keeping exempt rows.
///
/// Returns rows removed. A column that is absent counts as null everywhere.
pub fn drop_rows_missing(
    df: &mut DataFrame,
    columns: &[&str],
    exemption: Option<&RowExemption>,
) -> PolarsResult<usize> {
    let mut keep = exempt_rows(df, exemption);
    let mut complete = vec![true; df.height()];
    for name in columns {
        match column_values(df, name) {
            Some(values) => {
                for (idx, value) in values.iter().enumerate() {
                    if value.is_none() {
                        complete[idx] = false;
                    }
                }
            }
            None => complete.fill(false),
        }
    }
    for (slot, ok) in keep.iter_mut().zip(complete) {
        *slot = *slot || ok;
    }
    retain_rows(df, &keep)
}

#[cfg(test)]
mod tests {
    use polars::prelude::Column;

    use super::*;

    #[test]
    fn token_heuristic() {
        assert!(is_corrupted_token("GHT1JK2LO3"));
        assert!(is_corrupted_token("1A2B3C4D5E"));
        assert!(!is_corrupted_token("1234567890"));
        assert!(!is_corrupted_token("ABCDEFGHIJ"));
        assert!(!is_corrupted_token("GHT1JK2LO"));
        assert!(!is_corrupted_token("GHT1-K2LO3"));
        assert!(!is_corrupted_token("GHT1JK2LO34"));
    }

    #[test]
    fn exempt_rows_survive() {
        let mut df = DataFrame::new(vec![
            Column::new("store_code".into(), vec![Some("WEB-1388012W"), Some("AB1CD2EF3G"), None]),
            Column::new("locality".into(), vec![None, Some("Leeds"), None]),
        ])
        .unwrap();
        let exemption = RowExemption::new("store_code", ["WEB-1388012W"]);
        let removed = remove_invalid_rows(&mut df, Some(&exemption)).unwrap();
        assert_eq!(removed, 1);
        let removed = drop_rows_missing(&mut df, &["store_code", "locality"], Some(&exemption))
            .unwrap();
        assert_eq!(removed, 1);
        assert_eq!(
            column_values(&df, "store_code").unwrap(),
            vec![Some("WEB-1388012W".to_string())]
        );
    }
}
