//! Property tests for the value-level cleaning rules.

use polars::prelude::*;
use proptest::prelude::*;
use rdc_transform::data_utils::column_values;
use rdc_transform::normalization::{standardize_nulls, to_kilograms};
use rdc_transform::{is_corrupted_token, parse_date};

fn null_tokens() -> Vec<String> {
    ["NULL", "None", "N/A", ""].iter().map(|s| s.to_string()).collect()
}

fn cell() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("NULL".to_string())),
        Just(Some("None".to_string())),
        Just(Some("N/A".to_string())),
        Just(Some(String::new())),
        "[A-Za-z0-9 /]{0,12}".prop_map(Some),
    ]
}

proptest! {
    #[test]
    fn null_standardization_is_idempotent(values in prop::collection::vec(cell(), 0..40)) {
        let tokens = null_tokens();
        let mut df = DataFrame::new(vec![Column::new("c".into(), values)]).unwrap();
        standardize_nulls(&mut df, &tokens).unwrap();
        let once = column_values(&df, "c").unwrap();
        let second = standardize_nulls(&mut df, &tokens).unwrap();
        prop_assert_eq!(second.nulled, 0);
        prop_assert_eq!(column_values(&df, "c").unwrap(), once.clone());
        for value in once.iter().flatten() {
            prop_assert!(!tokens.contains(value));
        }
    }

    #[test]
    fn mixed_ten_char_alphanumerics_are_tokens(value in "[A-Za-z0-9]{10}") {
        let letters = value.chars().any(|c| c.is_ascii_alphabetic());
        let digits = value.chars().any(|c| c.is_ascii_digit());
        prop_assert_eq!(is_corrupted_token(&value), letters && digits);
    }

    #[test]
    fn pure_numbers_are_never_tokens(value in "[0-9]{1,20}") {
        prop_assert!(!is_corrupted_token(&value));
    }

    #[test]
    fn other_lengths_are_never_tokens(value in "[A-Z0-9]{0,9}|[A-Z0-9]{11,16}") {
        prop_assert!(!is_corrupted_token(&value));
    }

    #[test]
    fn date_parsing_never_panics(value in "\\PC{0,24}") {
        let _ = parse_date(&value);
    }

    #[test]
    fn grams_divide_by_a_thousand(amount in 1u32..100_000) {
        let kg = to_kilograms(&format!("{amount}g")).unwrap();
        prop_assert!((kg - f64::from(amount) / 1000.0).abs() < 1e-12);
    }
}
