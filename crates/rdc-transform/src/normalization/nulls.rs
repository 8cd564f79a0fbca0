//! Null spelling standardization.

use polars::prelude::{DataFrame, PolarsResult};

use super::ColumnChange;
use crate::data_utils::{column_values, replace_string_column, string_column_names};

/// Replace every exact occurrence of a null token in a string column with null.
///
/// Matching is exact and case-sensitive: `"null"` is not `"NULL"`. Columns of
/// other types are left untouched, so the operation is idempotent.
pub fn standardize_nulls(df: &mut DataFrame, tokens: &[String]) -> PolarsResult<ColumnChange> {
    let mut total = ColumnChange::default();
    for name in string_column_names(df) {
        let Some(values) = column_values(df, &name) else {
            continue;
        };
        let hits = values
            .iter()
            .filter(|v| v.as_deref().is_some_and(|s| is_null_token(s, tokens)))
            .count();
        if hits == 0 {
            continue;
        }
        let cleaned: Vec<Option<String>> = values
            .into_iter()
            .map(|v| v.filter(|s| !is_null_token(s, tokens)))
            .collect();
        replace_string_column(df, &name, cleaned)?;
        total.nulled += hits;
    }
    Ok(total)
}

fn is_null_token(value: &str, tokens: &[String]) -> bool {
    tokens.iter().any(|token| token == value)
}

#[cfg(test)]
mod tests {
    use polars::prelude::Column;

    use super::*;

    fn tokens() -> Vec<String> {
        ["NULL", "None", "N/A", ""].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn replaces_exact_tokens_only() {
        let mut df = DataFrame::new(vec![Column::new(
            "a".into(),
            vec!["NULL", "null", "N/A", "", "kept"],
        )])
        .unwrap();
        let change = standardize_nulls(&mut df, &tokens()).unwrap();
        assert_eq!(change.nulled, 3);
        assert_eq!(
            column_values(&df, "a").unwrap(),
            vec![None, Some("null".to_string()), None, None, Some("kept".to_string())]
        );
    }

    #[test]
    fn numeric_columns_are_untouched() {
        let mut df = DataFrame::new(vec![Column::new("n".into(), vec![1i64, 2])]).unwrap();
        let change = standardize_nulls(&mut df, &tokens()).unwrap();
        assert_eq!(change.nulled, 0);
        assert_eq!(df.column("n").unwrap().null_count(), 0);
    }
}
