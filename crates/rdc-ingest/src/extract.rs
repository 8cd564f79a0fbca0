//! Extraction collaborators.
//!
//! An [`Extractor`] produces one raw input per call. Extraction failures are
//! not fatal to a run: [`extract_or_empty`] logs them and substitutes an empty
//! table, which the pipeline and sinks treat as "nothing to do".

use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;
use serde_json::Value;
use tracing::{info, warn};

use crate::csv_table::read_csv_frame;
use crate::error::{IngestError, Result};
use crate::json::{JsonShape, detect_shape, read_json_document, records_to_table};

/// What an extractor hands to the pipeline.
#[derive(Debug, Clone)]
pub enum RawInput {
    /// Row-oriented record set with string cells.
    Table(DataFrame),
    /// Columnar document of parallel field mappings.
    Columnar(Value),
}

impl RawInput {
    /// The empty table used in place of a failed extraction.
    pub fn empty() -> Self {
        RawInput::Table(DataFrame::empty())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            RawInput::Table(df) => df.height() == 0 && df.width() == 0,
            RawInput::Columnar(value) => value.as_object().is_none_or(|map| map.is_empty()),
        }
    }
}

/// A source of raw records.
pub trait Extractor {
    /// Human-readable source identifier for logs.
    fn source(&self) -> String;

    fn extract(&self) -> Result<RawInput>;
}

/// Supported file formats, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Json,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(SourceFormat::Csv),
            "json" => Some(SourceFormat::Json),
            _ => None,
        }
    }
}

/// Extracts from a local CSV or JSON file.
#[derive(Debug, Clone)]
pub struct FileExtractor {
    path: PathBuf,
}

impl FileExtractor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Extractor for FileExtractor {
    fn source(&self) -> String {
        self.path.display().to_string()
    }

    fn extract(&self) -> Result<RawInput> {
        let format = SourceFormat::from_path(&self.path).ok_or_else(|| {
            IngestError::UnsupportedFormat {
                path: self.path.clone(),
            }
        })?;
        match format {
            SourceFormat::Csv => Ok(RawInput::Table(read_csv_frame(&self.path)?)),
            SourceFormat::Json => {
                let document = read_json_document(&self.path)?;
                match detect_shape(&document) {
                    Some(JsonShape::Columnar) => Ok(RawInput::Columnar(document)),
                    Some(JsonShape::Records) => Ok(RawInput::Table(
                        records_to_table(&self.path, &document)?.into_frame()?,
                    )),
                    None => Err(IngestError::UnsupportedShape {
                        path: self.path.clone(),
                        reason: "expected field mappings or an array of records".to_string(),
                    }),
                }
            }
        }
    }
}

/// Run an extractor, substituting an empty table when it fails.
pub fn extract_or_empty(extractor: &dyn Extractor) -> RawInput {
    match extractor.extract() {
        Ok(input) => {
            info!(source = %extractor.source(), "extracted");
            input
        }
        Err(error) => {
            warn!(source = %extractor.source(), %error, "extraction failed, continuing with an empty table");
            RawInput::empty()
        }
    }
}
