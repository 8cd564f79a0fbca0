//! CSV extracts.

use std::path::Path;

use csv::ReaderBuilder;
use polars::prelude::DataFrame;

use crate::error::{IngestError, Result};
use crate::table::RawTable;

/// Read a CSV file into a raw table. The first non-blank record is the header.
pub fn read_csv_table(path: &Path) -> Result<RawTable> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
    let mut table: Option<RawTable> = None;
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
        match table.as_mut() {
            None => {
                if record.iter().all(|cell| cell.trim().is_empty()) {
                    continue;
                }
                let headers = record.iter().map(str::to_string).collect();
                table = Some(RawTable::new(headers));
            }
            Some(table) => {
                table.push_row(record.iter().map(|cell| Some(cell.to_string())).collect());
            }
        }
    }
    Ok(table.unwrap_or_default())
}

/// Read a CSV file straight into an all-string frame.
pub fn read_csv_frame(path: &Path) -> Result<DataFrame> {
    read_csv_table(path)?.into_frame()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_cells_are_kept_verbatim() {
        let file = create_temp_csv("a,b\n NULL ,\n\"x\ny\",N/A\n");
        let table = read_csv_table(file.path()).unwrap();
        assert_eq!(table.headers, vec!["a", "b"]);
        assert_eq!(
            table.rows[0],
            vec![Some(" NULL ".to_string()), Some(String::new())]
        );
        assert_eq!(table.rows[1][0].as_deref(), Some("x\ny"));
    }

    #[test]
    fn test_empty_file_gives_empty_table() {
        let file = create_temp_csv("");
        let df = read_csv_frame(file.path()).unwrap();
        assert_eq!(df.width(), 0);
        assert_eq!(df.height(), 0);
    }

    #[test]
    fn test_missing_file() {
        let result = read_csv_table(Path::new("/nonexistent/users.csv"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }
}
