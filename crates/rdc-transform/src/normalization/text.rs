//! Free-text column cleanup.

use polars::prelude::{DataFrame, PolarsResult};

use super::{ColumnChange, rewrite_text_column};
use crate::data_utils::{column_values, has_digit, is_string_column, replace_string_column};

/// Collapse embedded line breaks in an address to commas.
pub fn single_line_address(df: &mut DataFrame, column: &str) -> PolarsResult<ColumnChange> {
    if !is_string_column(df, column) {
        df.column(column)?;
        return Ok(ColumnChange::default());
    }
    rewrite_text_column(df, column, |value| Some(flatten_lines(value)))
}

pub(crate) fn flatten_lines(value: &str) -> String {
    value.replace("\r\n", ",").replace(['\n', '\r'], ",")
}

/// Strip everything but digits from a phone number.
///
/// A value with no digits at all becomes null.
pub fn clean_phone_number(df: &mut DataFrame, column: &str) -> PolarsResult<ColumnChange> {
    rewrite_text_column(df, column, digits_only)
}

/// Digits of `value`, or `None` when there are none.
pub fn digits_only(value: &str) -> Option<String> {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    (!digits.is_empty()).then_some(digits)
}

/// Remove stray `?` characters from card numbers.
///
/// Only textual cells are touched; a numerically typed column passes through.
pub fn clean_card_number(df: &mut DataFrame, column: &str) -> PolarsResult<ColumnChange> {
    if !is_string_column(df, column) {
        df.column(column)?;
        return Ok(ColumnChange::default());
    }
    rewrite_text_column(df, column, |value| Some(value.replace('?', "")))
}

/// Keep only digits in staff counts, nulling values that have none.
pub fn clean_staff_numbers(df: &mut DataFrame, column: &str) -> PolarsResult<ColumnChange> {
    rewrite_text_column(df, column, digits_only)
}

/// Null localities that are not text or that contain a digit.
pub fn clean_locality(df: &mut DataFrame, column: &str) -> PolarsResult<ColumnChange> {
    if is_string_column(df, column) {
        return rewrite_text_column(df, column, |value| {
            (!has_digit(value)).then(|| value.to_string())
        });
    }
    let Some(values) = column_values(df, column) else {
        df.column(column)?;
        return Ok(ColumnChange::default());
    };
    let change = ColumnChange {
        nulled: values.iter().filter(|v| v.is_some()).count(),
        changed: 0,
    };
    replace_string_column(df, column, vec![None; values.len()])?;
    Ok(change)
}

#[cfg(test)]
mod tests {
    use polars::prelude::Column;

    use super::*;

    #[test]
    fn flatten_lines_handles_all_breaks() {
        assert_eq!(flatten_lines("1 High St\nLondon"), "1 High St,London");
        assert_eq!(flatten_lines("a\r\nb\rc"), "a,b,c");
    }

    #[test]
    fn digits_only_strips_formatting() {
        assert_eq!(digits_only("+44 (0)20-7946 0958").as_deref(), Some("4402079460958"));
        assert_eq!(digits_only("n/a"), None);
    }

    #[test]
    fn locality_with_digit_is_nulled() {
        let mut df =
            DataFrame::new(vec![Column::new("locality".into(), vec!["Bristol", "B4ZZ9"])])
                .unwrap();
        let change = clean_locality(&mut df, "locality").unwrap();
        assert_eq!(change.nulled, 1);
        assert_eq!(
            column_values(&df, "locality").unwrap(),
            vec![Some("Bristol".to_string()), None]
        );
    }

    #[test]
    fn numeric_locality_is_nulled() {
        let mut df = DataFrame::new(vec![Column::new("locality".into(), vec![1i64, 2])]).unwrap();
        let change = clean_locality(&mut df, "locality").unwrap();
        assert_eq!(change.nulled, 2);
        assert_eq!(df.column("locality").unwrap().null_count(), 2);
    }

    #[test]
    fn numeric_card_numbers_pass_through() {
        let mut df =
            DataFrame::new(vec![Column::new("card_number".into(), vec![4111i64, 5500])]).unwrap();
        clean_card_number(&mut df, "card_number").unwrap();
        assert_eq!(df.column("card_number").unwrap().dtype(), &polars::prelude::DataType::Int64);
    }

    #[test]
    fn card_number_of_only_question_marks_is_nulled() {
        let mut df = DataFrame::new(vec![Column::new(
            "card_number".into(),
            vec![Some("???"), Some("??4111"), None],
        )])
        .unwrap();
        let change = clean_card_number(&mut df, "card_number").unwrap();
        assert_eq!(change.nulled, 1);
        assert_eq!(
            column_values(&df, "card_number").unwrap(),
            vec![None, Some("4111".to_string()), None]
        );
    }
}
