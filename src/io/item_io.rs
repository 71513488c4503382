use std::fs;
use std::path::{Path, PathBuf};

use crate::model::item::ItemRow;

/// Error type for loading items and configuration from disk
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse items file {path}: {source}")]
    ItemsParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not parse tasksel.toml: {0}")]
    ConfigParseError(#[from] toml::de::Error),
}

/// Load table rows from a JSON items file (an array of row objects).
pub fn load_rows(path: &Path) -> Result<Vec<ItemRow>, LoadError> {
    let text = fs::read_to_string(path).map_err(|e| LoadError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_rows(&text).map_err(|e| LoadError::ItemsParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Parse rows from JSON text
pub fn parse_rows(text: &str) -> Result<Vec<ItemRow>, serde_json::Error> {
    serde_json::from_str(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::item::ItemKind;
    use tempfile::TempDir;

    #[test]
    fn test_load_rows_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("items.json");
        fs::write(
            &path,
            r#"[
  {"kind": "project", "id": 5, "name": "Riverside Tower"},
  {"kind": "task", "id": 1, "projectId": 5},
  {"id": 9, "taskId": 1}
]"#,
        )
        .unwrap();

        let rows = load_rows(&path).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].kind, Some(ItemKind::Project));
        assert_eq!(rows[2].kind, None);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nope.json");
        let err = load_rows(&path).unwrap_err();
        assert!(matches!(err, LoadError::ReadError { .. }));
        assert!(err.to_string().contains("nope.json"));
    }

    #[test]
    fn test_bad_json_is_a_parse_error() {
        assert!(parse_rows(r#"{"id": 1}"#).is_err());
        assert!(parse_rows(r#"[{"kind": "milestone", "id": 1}]"#).is_err());
        assert!(parse_rows(r#"[{"kind": "task"}]"#).is_err());
        assert!(parse_rows("[]").unwrap().is_empty());
    }
}
