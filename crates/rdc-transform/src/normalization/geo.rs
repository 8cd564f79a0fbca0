//! Location fields: countries, continents, store types and latitude.

use polars::prelude::{DataFrame, PolarsResult};

use super::{ColumnChange, rewrite_text_column};
use crate::data_utils::{column_values, has_digit, replace_string_column};

/// Country codes longer than this are treated as corrupted.
pub const MAX_COUNTRY_CODE_LEN: usize = 3;

/// Known country code misspellings and their corrections.
const COUNTRY_CODE_FIXES: &[(&str, &str)] = &[("GGB", "GB")];

/// Null country names containing a digit.
pub fn clean_country(df: &mut DataFrame, column: &str) -> PolarsResult<ColumnChange> {
    rewrite_text_column(df, column, keep_without_digit)
}

/// Null store types containing a digit.
pub fn clean_store_type(df: &mut DataFrame, column: &str) -> PolarsResult<ColumnChange> {
    rewrite_text_column(df, column, keep_without_digit)
}

/// Validate country codes and correct known misspellings.
pub fn clean_country_code(df: &mut DataFrame, column: &str) -> PolarsResult<ColumnChange> {
    rewrite_text_column(df, column, country_code_value)
}

pub(crate) fn country_code_value(value: &str) -> Option<String> {
    if has_digit(value) || value.chars().count() > MAX_COUNTRY_CODE_LEN {
        return None;
    }
    let fixed = COUNTRY_CODE_FIXES
        .iter()
        .find(|(wrong, _)| *wrong == value)
        .map_or(value, |&(_, right)| right);
    Some(fixed.to_string())
}

/// Repair doubled `ee` typos in continent names and null digit-bearing values.
pub fn clean_continent(df: &mut DataFrame, column: &str) -> PolarsResult<ColumnChange> {
    rewrite_text_column(df, column, continent_value)
}

pub(crate) fn continent_value(value: &str) -> Option<String> {
    let repaired = value.replace("ee", "");
    keep_without_digit(&repaired)
}

fn keep_without_digit(value: &str) -> Option<String> {
    (!has_digit(value)).then(|| value.to_string())
}

/// Coalesce the alternate latitude column into the primary one.
///
/// Where the primary cell is null the alternate value is taken, then the
/// alternate column is dropped.
pub fn merge_latitude(
    df: &mut DataFrame,
    primary: &str,
    alternate: &str,
) -> PolarsResult<ColumnChange> {
    let Some(alternates) = column_values(df, alternate) else {
        return Ok(ColumnChange::default());
    };
    let primaries = match column_values(df, primary) {
        Some(values) => values,
        None => vec![None; alternates.len()],
    };
    let mut change = ColumnChange::default();
    let merged: Vec<Option<String>> = primaries
        .into_iter()
        .zip(alternates)
        .map(|(main, alt)| match main {
            Some(value) => Some(value),
            None => {
                if alt.is_some() {
                    change.changed += 1;
                }
                alt
            }
        })
        .collect();
    replace_string_column(df, primary, merged)?;
    df.drop_in_place(alternate)?;
    Ok(change)
}

#[cfg(test)]
mod tests {
    use polars::prelude::Column;

    use super::*;

    #[test]
    fn country_code_rules() {
        assert_eq!(country_code_value("GGB").as_deref(), Some("GB"));
        assert_eq!(country_code_value("DE").as_deref(), Some("DE"));
        assert_eq!(country_code_value("GBRX"), None);
        assert_eq!(country_code_value("G1"), None);
    }

    #[test]
    fn continent_typo_is_repaired() {
        assert_eq!(continent_value("eeEurope").as_deref(), Some("Europe"));
        assert_eq!(continent_value("eeAmerica").as_deref(), Some("America"));
        assert_eq!(continent_value("QMAE0WX1"), None);
    }

    #[test]
    fn latitude_merge_prefers_primary() {
        let mut df = DataFrame::new(vec![
            Column::new("latitude".into(), vec![Some("51.5"), None, None]),
            Column::new("lat".into(), vec![Some("9.9"), Some("52.1"), None]),
        ])
        .unwrap();
        let change = merge_latitude(&mut df, "latitude", "lat").unwrap();
        assert_eq!(change.changed, 1);
        assert!(df.column("lat").is_err());
        assert_eq!(
            column_values(&df, "latitude").unwrap(),
            vec![Some("51.5".to_string()), Some("52.1".to_string()), None]
        );
    }

    #[test]
    fn continent_of_only_typo_letters_is_nulled() {
        let mut df =
            DataFrame::new(vec![Column::new("continent".into(), vec!["ee", "eeEurope"])]).unwrap();
        let change = clean_continent(&mut df, "continent").unwrap();
        assert_eq!(change.nulled, 1);
        assert_eq!(
            column_values(&df, "continent").unwrap(),
            vec![None, Some("Europe".to_string())]
        );
    }
}
