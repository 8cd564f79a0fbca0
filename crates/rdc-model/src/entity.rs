//! Entity kinds handled by the cleaning pipeline.
//!
//! Each kind selects a fixed schema ([`crate::schema`]) and a fixed, ordered list
//! of cleaning steps. The set is closed; there is no runtime registration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// The kind of record a raw extract holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Registered users (legacy user table).
    User,
    /// Payment card details.
    Card,
    /// Store details.
    Store,
    /// Product catalogue.
    Product,
    /// Orders table.
    Order,
    /// Sale date/time events (columnar JSON source).
    DateEvent,
}

impl EntityKind {
    /// All kinds in the order the loader usually processes them.
    pub const ALL: [EntityKind; 6] = [
        EntityKind::User,
        EntityKind::Card,
        EntityKind::Store,
        EntityKind::Product,
        EntityKind::Order,
        EntityKind::DateEvent,
    ];

    /// Stable lowercase code used on the command line and in config files.
    pub fn code(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Card => "card",
            Self::Store => "store",
            Self::Product => "product",
            Self::Order => "order",
            Self::DateEvent => "date_event",
        }
    }

    /// Human-readable description.
    pub fn description(self) -> &'static str {
        match self {
            Self::User => "Registered users",
            Self::Card => "Payment card details",
            Self::Store => "Store details",
            Self::Product => "Product catalogue",
            Self::Order => "Orders",
            Self::DateEvent => "Sale date events",
        }
    }

    /// Destination table the cleaned records replace.
    pub fn destination_table(self) -> &'static str {
        match self {
            Self::User => "dim_users",
            Self::Card => "dim_card_details",
            Self::Store => "dim_store_details",
            Self::Product => "dim_products",
            Self::Order => "orders_table",
            Self::DateEvent => "dim_date_times",
        }
    }

    /// Whether the raw extract arrives as a columnar JSON object rather than a table.
    pub fn is_columnar_source(self) -> bool {
        matches!(self, Self::DateEvent)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for EntityKind {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "user" | "users" => Ok(Self::User),
            "card" | "cards" | "card_details" => Ok(Self::Card),
            "store" | "stores" | "store_details" => Ok(Self::Store),
            "product" | "products" => Ok(Self::Product),
            "order" | "orders" => Ok(Self::Order),
            "date_event" | "date_events" | "date_times" => Ok(Self::DateEvent),
            _ => Err(ModelError::UnknownEntity(value.to_string())),
        }
    }
}
