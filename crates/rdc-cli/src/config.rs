//! Cleaning options from files and flags.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rdc_model::{CleaningOptions, EntityKind};

/// Load options from a JSON file, or defaults when no file is given.
///
/// Fields missing from the file keep their defaults.
pub fn load_options(path: Option<&Path>) -> Result<CleaningOptions> {
    let Some(path) = path else {
        return Ok(CleaningOptions::default());
    };
    let text =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse config {}", path.display()))
}

/// Apply command-line overrides on top of loaded options.
pub fn apply_overrides(
    options: CleaningOptions,
    kind: EntityKind,
    expect_rows: Option<usize>,
) -> CleaningOptions {
    match expect_rows {
        Some(rows) => options.with_expected_rows(kind, rows),
        None => options,
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_missing_path_gives_defaults() {
        let options = load_options(None).unwrap();
        assert!(options.expected_rows.is_empty());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"expected_rows": {{"user": 15284}}}}"#).unwrap();
        let options = load_options(Some(file.path())).unwrap();
        assert_eq!(options.expected_rows_for(EntityKind::User), Some(15_284));
        assert_eq!(options.null_tokens, CleaningOptions::default().null_tokens);
    }

    #[test]
    fn test_flag_overrides_file() {
        let options = CleaningOptions::legacy();
        let options = apply_overrides(options, EntityKind::User, Some(10));
        assert_eq!(options.expected_rows_for(EntityKind::User), Some(10));
    }

    #[test]
    fn test_bad_json_is_reported() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = load_options(Some(file.path())).unwrap_err();
        assert!(err.to_string().starts_with("parse config"));
    }
}
