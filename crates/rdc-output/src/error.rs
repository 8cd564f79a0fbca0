use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while persisting a cleaned table.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to prepare output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid table name `{0}`")]
    InvalidTableName(String),

    #[error("table store is unusable after a failed write; `{0}` was not persisted")]
    Poisoned(String),

    #[error("dataframe error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),
}

pub type Result<T> = std::result::Result<T, OutputError>;
