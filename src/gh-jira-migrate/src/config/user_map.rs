//! Identity map file loading.

use crate::config::ConfigError;
use std::collections::HashMap;
use std::path::Path;

/// Loads a source-handle to destination-identity map from a TOML file
/// of `handle = "account-id"` pairs.
///
/// # Errors
///
/// Returns [`ConfigError`] when the file is missing or unparsable.
pub fn load_user_map(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::MissingFile {
            path: path.display().to_string(),
        });
    }

    let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.display().to_string(),
        source: e,
    })?;

    toml::from_str(&raw).map_err(|e| ConfigError::TomlError {
        path: path.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn loads_handle_pairs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("user_map.toml");
        std::fs::write(&path, "alice = \"acc-1\"\nbob = \"acc-2\"\n").unwrap();

        let map = load_user_map(&path).unwrap();
        assert_eq!(map["alice"], "acc-1");
        assert_eq!(map["bob"], "acc-2");
    }

    #[test]
    fn missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let result = load_user_map(&temp.path().join("nope.toml"));
        assert!(matches!(result, Err(ConfigError::MissingFile { .. })));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("user_map.toml");
        std::fs::write(&path, "not valid toml [").unwrap();

        let result = load_user_map(&path);
        assert!(matches!(result, Err(ConfigError::TomlError { .. })));
    }
}
