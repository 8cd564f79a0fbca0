use polars::prelude::PolarsError;
use rdc_model::EntityKind;
use thiserror::Error;

/// Hard pipeline errors. Soft value and row errors never surface here; they
/// degrade cells to null or drop rows inside the step that detects them.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("{kind}: required column `{column}` is missing")]
    MissingColumn { kind: EntityKind, column: String },

    #[error("columnar source is missing mandatory field `{0}`")]
    MissingField(String),

    #[error("columnar source is malformed: {0}")]
    MalformedSource(String),

    #[error("cannot combine date/time fields: {failed} of {total} rows failed (first: `{sample}`)")]
    DateTimeCombine {
        failed: usize,
        total: usize,
        sample: String,
    },

    #[error("{kind}: expected {expected} rows after cleaning, got {actual}")]
    RowCountMismatch {
        kind: EntityKind,
        expected: usize,
        actual: usize,
    },

    #[error("dataframe error: {0}")]
    Polars(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, TransformError>;
