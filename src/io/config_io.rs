use std::fs;
use std::path::{Path, PathBuf};

use crate::io::item_io::LoadError;
use crate::model::config::Config;

/// Name of the config file looked up in the working directory
pub const CONFIG_FILE: &str = "tasksel.toml";

/// Read the config at `path`.
pub fn read_config(path: &Path) -> Result<Config, LoadError> {
    let text = fs::read_to_string(path).map_err(|e| LoadError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(toml::from_str(&text)?)
}

/// Resolve the config to use: an explicit path must exist; otherwise
/// `tasksel.toml` in `dir` is used when present, else defaults.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<Config, LoadError> {
    if let Some(path) = explicit {
        return read_config(path);
    }
    let default_path: PathBuf = dir.join(CONFIG_FILE);
    if default_path.exists() {
        read_config(&default_path)
    } else {
        Ok(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::LegacyPolicy;
    use tempfile::TempDir;

    #[test]
    fn test_missing_default_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(None, tmp.path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.classify.legacy, LegacyPolicy::Warn);
    }

    #[test]
    fn test_reads_default_file_in_dir() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "[classify]\nlegacy = \"reject\"\n").unwrap();
        let config = load_config(None, tmp.path()).unwrap();
        assert_eq!(config.classify.legacy, LegacyPolicy::Reject);
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("custom.toml");
        fs::write(&path, "").unwrap();
        let config = load_config(Some(&path), Path::new("/nonexistent")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let tmp = TempDir::new().unwrap();
        let err = load_config(Some(&tmp.path().join("missing.toml")), tmp.path()).unwrap_err();
        assert!(matches!(err, LoadError::ReadError { .. }));
    }

    #[test]
    fn test_unknown_policy_is_a_parse_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "[classify]\nlegacy = \"sometimes\"\n").unwrap();
        let err = load_config(None, tmp.path()).unwrap_err();
        assert!(matches!(err, LoadError::ConfigParseError(_)));
    }
}
