//! Raw tables: every cell kept as the exact text the source carried.
//!
//! No type inference happens here. Empty cells stay empty strings so that the
//! cleaning pipeline sees the raw null spellings it is meant to standardize.

use std::collections::BTreeMap;

use polars::prelude::{Column, DataFrame};

use crate::error::Result;

/// Header names and string rows, before conversion to a frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers: unique_headers(&headers),
            rows: Vec::new(),
        }
    }

    /// Append a row, padding or truncating it to the header width.
    pub fn push_row(&mut self, mut row: Vec<Option<String>>) {
        row.resize(self.headers.len(), None);
        self.rows.push(row);
    }

    /// Build a frame with one string column per header.
    pub fn into_frame(self) -> Result<DataFrame> {
        let mut columns: Vec<Vec<Option<String>>> =
            vec![Vec::with_capacity(self.rows.len()); self.headers.len()];
        for row in self.rows {
            for (idx, cell) in row.into_iter().enumerate() {
                columns[idx].push(cell);
            }
        }
        let columns = self
            .headers
            .iter()
            .zip(columns)
            .map(|(name, values)| Column::new(name.as_str().into(), values))
            .collect();
        Ok(DataFrame::new(columns)?)
    }
}

/// Trim header names, strip a byte-order mark and make every name unique.
///
/// Blank headers (typically an unnamed index column) become `unnamed_{idx}`;
/// repeated names get a `_{n}` suffix.
pub fn unique_headers(raw: &[String]) -> Vec<String> {
    let mut seen: BTreeMap<String, usize> = BTreeMap::new();
    raw.iter()
        .enumerate()
        .map(|(idx, name)| {
            let trimmed = name.trim().trim_matches('\u{feff}');
            let base = if trimmed.is_empty() {
                format!("unnamed_{idx}")
            } else {
                trimmed.to_string()
            };
            let count = seen.entry(base.clone()).or_insert(0);
            *count += 1;
            if *count == 1 {
                base
            } else {
                format!("{base}_{}", *count - 1)
            }
        })
        .collect()
}
