//! Configuration options for a cleaning run.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entity::EntityKind;

/// Raw spellings treated as missing at pipeline entry.
pub const DEFAULT_NULL_TOKENS: [&str; 4] = ["NULL", "None", "N/A", ""];

/// Store identifier that is known to be legitimate even though its row carries
/// missing location fields (the web store).
pub const WEB_STORE_CODE: &str = "WEB-1388012W";

/// Currency prefixes stripped from product prices. The first entry is the
/// pound sign as it appears after a UTF-8/Latin-1 round trip.
pub const DEFAULT_CURRENCY_SYMBOLS: [&str; 2] = ["Â£", "£"];

/// Cleaned row count of the legacy user extract, used as the regression guard in
/// the sample configuration.
pub const LEGACY_USER_ROW_COUNT: usize = 15_284;

/// A set of key values that the row filters must never drop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowExemption {
    /// Column holding the key.
    pub column: String,
    /// Exempted key values, compared exactly.
    pub values: Vec<String>,
}

impl RowExemption {
    pub fn new(column: impl Into<String>, values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether a cell value is exempted.
    pub fn matches(&self, value: Option<&str>) -> bool {
        value.is_some_and(|v| self.values.iter().any(|e| e == v))
    }
}

/// Options controlling a cleaning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningOptions {
    /// Raw spellings replaced by null before any other step.
    pub null_tokens: Vec<String>,

    /// Exemptions for the store row filters.
    pub store_exemption: RowExemption,

    /// Prefixes removed from product prices before numeric coercion.
    pub currency_symbols: Vec<String>,

    /// Expected cleaned row counts. When an entry exists for an entity the run
    /// fails instead of producing output if the count differs.
    pub expected_rows: BTreeMap<EntityKind, usize>,
}

impl Default for CleaningOptions {
    fn default() -> Self {
        Self {
            null_tokens: DEFAULT_NULL_TOKENS.iter().map(|t| (*t).to_string()).collect(),
            store_exemption: RowExemption::new("store_code", [WEB_STORE_CODE]),
            currency_symbols: DEFAULT_CURRENCY_SYMBOLS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            expected_rows: BTreeMap::new(),
        }
    }
}

impl CleaningOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options matching the legacy loader, including the user row-count guard.
    pub fn legacy() -> Self {
        Self::default().with_expected_rows(EntityKind::User, LEGACY_USER_ROW_COUNT)
    }

    /// Require an exact cleaned row count for an entity.
    #[must_use]
    pub fn with_expected_rows(mut self, kind: EntityKind, rows: usize) -> Self {
        self.expected_rows.insert(kind, rows);
        self
    }

    pub fn expected_rows_for(&self, kind: EntityKind) -> Option<usize> {
        self.expected_rows.get(&kind).copied()
    }
}
