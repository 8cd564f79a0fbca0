//! Fixed per-entity source schemas.
//!
//! Field names and target semantic types are fixed per entity kind; nothing here
//! is configurable at runtime. Extracts may carry extra columns (row indexes and
//! similar), but every field listed for a kind must be present before cleaning.

use serde::Serialize;

use crate::entity::EntityKind;
use SemanticType::{Date, DateTime, Identifier, Money, Number, Text, WeightKg};

/// Target semantic type of a cleaned field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SemanticType {
    /// Free text, kept as a string.
    Text,
    /// Identifier used for joins or deduplication, kept as a string.
    Identifier,
    /// Calendar date.
    Date,
    /// Part of a calendar date and time of day, combined into one timestamp.
    DateTime,
    /// Plain numeric value.
    Number,
    /// Monetary amount in pounds sterling.
    Money,
    /// Mass in kilograms.
    WeightKg,
}

impl SemanticType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Identifier => "identifier",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Number => "number",
            Self::Money => "money",
            Self::WeightKg => "weight (kg)",
        }
    }
}

/// A named source field and the semantic type it is cleaned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub semantic: SemanticType,
}

const fn field(name: &'static str, semantic: SemanticType) -> FieldSpec {
    FieldSpec { name, semantic }
}

/// Fields identifying logical row identity for deduplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DedupKeys {
    /// Single unique identifier column.
    pub primary: &'static str,
    /// Secondary composite key used by the fuzzy pass.
    pub composite: &'static [&'static str],
}

/// The fixed schema for one entity kind.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EntitySchema {
    pub kind: EntityKind,
    pub fields: &'static [FieldSpec],
    pub dedup: Option<DedupKeys>,
}

impl EntitySchema {
    /// Names of the required source fields, in schema order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }

    /// Look up a field by exact name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

const USER_FIELDS: &[FieldSpec] = &[
    field("first_name", Text),
    field("last_name", Text),
    field("date_of_birth", Date),
    field("company", Text),
    field("email_address", Text),
    field("address", Text),
    field("country", Text),
    field("country_code", Text),
    field("phone_number", Text),
    field("join_date", Date),
    field("user_uuid", Identifier),
];

const CARD_FIELDS: &[FieldSpec] = &[
    field("card_number", Identifier),
    field("expiry_date", Text),
    field("card_provider", Text),
    field("date_payment_confirmed", Date),
];

const STORE_FIELDS: &[FieldSpec] = &[
    field("address", Text),
    field("longitude", Text),
    field("lat", Text),
    field("locality", Text),
    field("store_code", Identifier),
    field("staff_numbers", Text),
    field("opening_date", Date),
    field("store_type", Text),
    field("latitude", Text),
    field("country_code", Text),
    field("continent", Text),
];

const PRODUCT_FIELDS: &[FieldSpec] = &[
    field("product_name", Text),
    field("product_price", Money),
    field("weight", WeightKg),
    field("category", Text),
    field("EAN", Identifier),
    field("date_added", Date),
    field("uuid", Identifier),
    field("removed", Text),
    field("product_code", Identifier),
];

const ORDER_FIELDS: &[FieldSpec] = &[
    field("date_uuid", Identifier),
    field("user_uuid", Identifier),
    field("card_number", Identifier),
    field("store_code", Identifier),
    field("product_code", Identifier),
    field("product_quantity", Number),
];

const DATE_EVENT_FIELDS: &[FieldSpec] = &[
    field("timestamp", DateTime),
    field("month", DateTime),
    field("year", DateTime),
    field("day", DateTime),
    field("time_period", Text),
    field("date_uuid", Identifier),
];

/// Return the fixed schema for an entity kind.
pub fn schema_for(kind: EntityKind) -> EntitySchema {
    let (fields, dedup) = match kind {
        EntityKind::User => (
            USER_FIELDS,
            Some(DedupKeys {
                primary: "user_uuid",
                composite: &["first_name", "last_name", "date_of_birth"],
            }),
        ),
        EntityKind::Card => (CARD_FIELDS, None),
        EntityKind::Store => (STORE_FIELDS, None),
        EntityKind::Product => (PRODUCT_FIELDS, None),
        EntityKind::Order => (ORDER_FIELDS, None),
        EntityKind::DateEvent => (DATE_EVENT_FIELDS, None),
    };
    EntitySchema {
        kind,
        fields,
        dedup,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_users_carry_dedup_keys() {
        for kind in EntityKind::ALL {
            let schema = schema_for(kind);
            assert_eq!(schema.dedup.is_some(), kind == EntityKind::User, "{kind}");
        }
    }

    #[test]
    fn user_composite_key_fields_are_in_schema() {
        let schema = schema_for(EntityKind::User);
        let keys = schema.dedup.expect("user dedup keys");
        assert!(schema.field(keys.primary).is_some());
        for name in keys.composite {
            assert!(schema.field(name).is_some(), "{name}");
        }
    }

    #[test]
    fn date_event_parts_fold_into_a_timestamp() {
        let schema = schema_for(EntityKind::DateEvent);
        for name in ["timestamp", "month", "year", "day"] {
            let field = schema.field(name).expect("date part field");
            assert_eq!(field.semantic, DateTime, "{name}");
        }
        assert_eq!(schema.field("date_uuid").map(|f| f.semantic), Some(Identifier));
    }
}
