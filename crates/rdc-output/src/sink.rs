//! Destinations for cleaned tables.
//!
//! Persisting always replaces the destination table as a whole. A sink never
//! appends to or merges with what a previous run left behind.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use tempfile::NamedTempFile;
use tracing::info;

use crate::error::{OutputError, Result};

/// Layout for datetime cells in written tables.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Where a sink put a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persisted {
    File(PathBuf),
    Memory(String),
}

/// A destination for cleaned tables.
pub trait Sink {
    /// Replace `table` with the contents of `df`.
    fn persist(&self, df: &mut DataFrame, table: &str) -> Result<Persisted>;
}

/// Writes each table as `<dir>/<table>.csv`.
#[derive(Debug, Clone)]
pub struct CsvDirectorySink {
    dir: PathBuf,
}

impl CsvDirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Target path for a table.
    pub fn table_path(&self, table: &str) -> Result<PathBuf> {
        validate_table_name(table)?;
        Ok(self.dir.join(format!("{table}.csv")))
    }
}

impl Sink for CsvDirectorySink {
    fn persist(&self, df: &mut DataFrame, table: &str) -> Result<Persisted> {
        let path = self.table_path(table)?;
        fs::create_dir_all(&self.dir).map_err(|source| OutputError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;
        // Stage beside the target so the final rename stays on one filesystem.
        let mut staged = NamedTempFile::new_in(&self.dir).map_err(|source| OutputError::Write {
            path: path.clone(),
            source,
        })?;
        CsvWriter::new(staged.as_file_mut())
            .include_header(true)
            .with_datetime_format(Some(DATETIME_FORMAT.to_string()))
            .finish(df)?;
        staged.persist(&path).map_err(|err| OutputError::Write {
            path: path.clone(),
            source: err.error,
        })?;
        info!(table, rows = df.height(), path = %path.display(), "table replaced");
        Ok(Persisted::File(path))
    }
}

/// Keeps tables in memory, keyed by name.
#[derive(Debug, Default)]
pub struct MemorySink {
    tables: Mutex<BTreeMap<String, DataFrame>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of a stored table.
    pub fn table(&self, table: &str) -> Option<DataFrame> {
        self.tables.lock().ok()?.get(table).cloned()
    }

    pub fn table_names(&self) -> Vec<String> {
        self.tables
            .lock()
            .map(|tables| tables.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl Sink for MemorySink {
    fn persist(&self, df: &mut DataFrame, table: &str) -> Result<Persisted> {
        validate_table_name(table)?;
        let mut tables = self
            .tables
            .lock()
            .map_err(|_| OutputError::Poisoned(table.to_string()))?;
        tables.insert(table.to_string(), df.clone());
        Ok(Persisted::Memory(table.to_string()))
    }
}

fn validate_table_name(table: &str) -> Result<()> {
    let valid = !table.is_empty()
        && table
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(OutputError::InvalidTableName(table.to_string()))
    }
}
