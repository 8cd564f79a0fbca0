//! Data model for cleaning retail dimension extracts.
//!
//! - **entity**: the closed set of entity kinds and their destination tables
//! - **schema**: fixed per-entity source fields and dedup keys
//! - **options**: run options (null spellings, exemptions, row-count guards)
//! - **report**: per-step and per-run reports

pub mod entity;
pub mod error;
pub mod options;
pub mod report;
pub mod schema;

pub use entity::EntityKind;
pub use error::{ModelError, Result};
pub use options::{
    CleaningOptions, DEFAULT_CURRENCY_SYMBOLS, DEFAULT_NULL_TOKENS, LEGACY_USER_ROW_COUNT,
    RowExemption, WEB_STORE_CODE,
};
pub use report::{DedupReport, RunReport, StepReport};
pub use schema::{DedupKeys, EntitySchema, FieldSpec, SemanticType, schema_for};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_kind_parses_aliases() {
        assert_eq!("users".parse::<EntityKind>().unwrap(), EntityKind::User);
        assert_eq!(
            "date-events".parse::<EntityKind>().unwrap(),
            EntityKind::DateEvent
        );
        assert_eq!(" Store ".parse::<EntityKind>().unwrap(), EntityKind::Store);
        assert!("invoices".parse::<EntityKind>().is_err());
    }

    #[test]
    fn options_round_trip_through_json() {
        let options = CleaningOptions::legacy();
        let json = serde_json::to_string(&options).expect("serialize options");
        let round: CleaningOptions = serde_json::from_str(&json).expect("deserialize options");
        assert_eq!(
            round.expected_rows_for(EntityKind::User),
            Some(LEGACY_USER_ROW_COUNT)
        );
        assert_eq!(round.store_exemption.values, vec![WEB_STORE_CODE.to_string()]);
    }
}
