//! Entity frame: a record set tagged with its entity kind.

use polars::prelude::DataFrame;
use rdc_model::EntityKind;

/// Where a frame's rows came from.
#[derive(Debug, Clone, Default)]
pub struct FrameMeta {
    /// Source identifier (file path, table name or URI).
    pub source: Option<String>,
}

/// A record set owned by one pipeline run.
///
/// The column set is fixed per entity kind; only explicit rename/drop steps
/// change it.
#[derive(Debug, Clone)]
pub struct EntityFrame {
    pub kind: EntityKind,
    pub data: DataFrame,
    pub meta: Option<FrameMeta>,
}

impl EntityFrame {
    pub fn new(kind: EntityKind, data: DataFrame) -> Self {
        Self {
            kind,
            data,
            meta: None,
        }
    }

    /// Attach a source identifier.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        let meta = self.meta.get_or_insert_with(FrameMeta::default);
        meta.source = Some(source.into());
        self
    }

    pub fn record_count(&self) -> usize {
        self.data.height()
    }

    pub fn source(&self) -> Option<&str> {
        self.meta.as_ref().and_then(|m| m.source.as_deref())
    }

    /// Whether the frame holds neither rows nor columns (a failed extraction).
    pub fn is_empty(&self) -> bool {
        self.data.height() == 0 && self.data.width() == 0
    }
}
