//! Column normalizers for retail extracts.
//!
//! Each normalizer rewrites a single named column (or the whole frame, for
//! null standardization) and reports how many cells it nulled or changed:
//! - **nulls**: raw null spellings to the null sentinel
//! - **text**: addresses, phone numbers, card numbers, staff counts, localities
//! - **geo**: countries, country codes, continents, store types, latitude
//! - **weight**: free-text weights to kilograms
//! - **numeric**: currency stripping and numeric coercion
//! - **datetime**: tolerant date parsing

pub mod datetime;
pub mod geo;
pub mod nulls;
pub mod numeric;
pub mod text;
pub mod weight;

use std::ops::AddAssign;

use polars::prelude::{DataFrame, PolarsResult};

use crate::data_utils::{column_values, replace_string_column};

pub use datetime::{DateParser, DatePattern, ParsedDate, parse_date, parse_date_columns};
pub use geo::{
    clean_continent, clean_country, clean_country_code, clean_store_type, merge_latitude,
};
pub use nulls::standardize_nulls;
pub use numeric::{coerce_numeric, drop_columns, rename_column, strip_currency};
pub use text::{
    clean_card_number, clean_locality, clean_phone_number, clean_staff_numbers,
    single_line_address,
};
pub use weight::{LITRE_TO_KG, WeightUnit, convert_weight_column, to_kilograms};

/// Cell-level outcome of a normalizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnChange {
    /// Non-null cells that became null.
    pub nulled: usize,
    /// Non-null cells rewritten to a different non-null value.
    pub changed: usize,
}

impl ColumnChange {
    pub(crate) fn record(&mut self, before: Option<&str>, after: Option<&str>) {
        match (before, after) {
            (Some(_), None) => self.nulled += 1,
            (Some(old), Some(new)) if old != new => self.changed += 1,
            _ => {}
        }
    }
}

impl AddAssign for ColumnChange {
    fn add_assign(&mut self, rhs: Self) {
        self.nulled += rhs.nulled;
        self.changed += rhs.changed;
    }
}

/// Rewrite a column cell by cell as text.
///
/// Nulls stay null; `f` sees every non-null cell (rendered as a string when
/// the column is not textual) and returns `None` to null it. An empty result
/// is nulled too, so no rewrite leaves a raw null spelling behind. The column
/// is written back as strings.
pub(crate) fn rewrite_text_column<F>(
    df: &mut DataFrame,
    name: &str,
    f: F,
) -> PolarsResult<ColumnChange>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(values) = column_values(df, name) else {
        // Surface the polars error for the missing column.
        df.column(name)?;
        return Ok(ColumnChange::default());
    };
    let mut change = ColumnChange::default();
    let rewritten: Vec<Option<String>> = values
        .iter()
        .map(|value| {
            let new = value
                .as_deref()
                .and_then(&f)
                .filter(|rewritten| !rewritten.is_empty());
            change.record(value.as_deref(), new.as_deref());
            new
        })
        .collect();
    replace_string_column(df, name, rewritten)?;
    Ok(change)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_counts_nulls_and_rewrites() {
        let mut change = ColumnChange::default();
        change.record(Some("a"), None);
        change.record(Some("a"), Some("b"));
        change.record(Some("a"), Some("a"));
        change.record(None, None);
        assert_eq!(change, ColumnChange { nulled: 1, changed: 1 });
    }

    #[test]
    fn empty_rewrites_become_null() {
        let mut df = DataFrame::new(vec![polars::prelude::Column::new(
            "code".into(),
            vec![Some("??"), Some("a?b"), None],
        )])
        .unwrap();
        let change = rewrite_text_column(&mut df, "code", |v| Some(v.replace('?', ""))).unwrap();
        assert_eq!(change, ColumnChange { nulled: 1, changed: 1 });
        assert_eq!(
            column_values(&df, "code").unwrap(),
            vec![None, Some("ab".to_string()), None]
        );
    }
}
