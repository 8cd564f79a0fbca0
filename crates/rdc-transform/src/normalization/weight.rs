//! Free-text weight conversion to kilograms.

use std::sync::LazyLock;

use polars::prelude::{Column, DataFrame, PolarsResult};
use regex::Regex;

use super::ColumnChange;
use crate::data_utils::column_values;

/// Kilograms per litre used for volume-labelled products (water density).
pub const LITRE_TO_KG: f64 = 1.0;

static WEIGHT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.?\d*)(.*)$").expect("Invalid weight regex"));

/// Unit recognised in a weight string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightUnit {
    Kilograms,
    /// Grams, and millilitres treated as grams.
    Grams,
    Litres,
}

impl WeightUnit {
    /// Classify a lowercased unit suffix.
    pub fn from_suffix(unit: &str) -> Option<Self> {
        if unit.contains("kg") || unit.contains("kilogram") {
            Some(Self::Kilograms)
        } else if unit.contains('g') || unit.contains("gram") {
            Some(Self::Grams)
        } else if unit.contains("ml")
            || unit.contains("milliliter")
            || unit.contains("millilitre")
        {
            Some(Self::Grams)
        } else if unit.contains("liter") || unit.contains("litre") || unit == "l" {
            Some(Self::Litres)
        } else {
            None
        }
    }

    pub fn to_kilograms(self, amount: f64) -> f64 {
        match self {
            Self::Kilograms => amount,
            Self::Grams => amount / 1000.0,
            Self::Litres => amount * LITRE_TO_KG,
        }
    }
}

/// Split a weight into its leading number and the lowercased remainder.
///
/// Spaces are removed first, so `"1 kg"` and `"1kg"` agree. The number is the
/// first run of digits with an optional fractional part; everything after it
/// is the unit.
pub fn split_weight(raw: &str) -> Option<(f64, String)> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let captures = WEIGHT_REGEX.captures(&compact)?;
    let amount = captures[1].trim_end_matches('.').parse::<f64>().ok()?;
    Some((amount, captures[2].to_lowercase()))
}

/// Convert a free-text weight to kilograms.
///
/// Returns `None` when there is no number or the unit is unrecognised.
pub fn to_kilograms(raw: &str) -> Option<f64> {
    let (amount, unit) = split_weight(raw)?;
    WeightUnit::from_suffix(&unit).map(|unit| unit.to_kilograms(amount))
}

/// Replace the free-text `source` column with a numeric `target` column in kilograms.
pub fn convert_weight_column(
    df: &mut DataFrame,
    source: &str,
    target: &str,
) -> PolarsResult<ColumnChange> {
    let Some(values) = column_values(df, source) else {
        df.column(source)?;
        return Ok(ColumnChange::default());
    };
    let mut change = ColumnChange::default();
    let kilograms: Vec<Option<f64>> = values
        .iter()
        .map(|value| {
            let converted = value.as_deref().and_then(to_kilograms);
            match (value, converted) {
                (Some(_), None) => change.nulled += 1,
                (Some(_), Some(_)) => change.changed += 1,
                _ => {}
            }
            converted
        })
        .collect();
    df.with_column(Column::new(target.into(), kilograms))?;
    df.drop_in_place(source)?;
    Ok(change)
}
