//! Migration settings parsed from config.toml.

use crate::config::{load_user_map, ConfigError};
use crate::jira::JiraSettings;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// GitHub-side settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GithubSettings {
    /// Repository slug in `owner/name` form.
    pub repo: String,
}

/// Parsed migration configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MigrationConfig {
    /// Labels an issue must carry to be a migration candidate.
    #[serde(default)]
    pub label_filter: Vec<String>,

    /// Labels excluding an issue from migration. The completion labels
    /// are always added to this set at run time.
    #[serde(default)]
    pub label_exclusions: Vec<String>,

    /// Label applied to migrated issues.
    #[serde(default)]
    pub completion_label: String,

    /// Completion label for non-closeable issues, tracked separately.
    #[serde(default)]
    pub squad_completion_label: Option<String>,

    /// Destination identity substituted for unmapped issue authors.
    #[serde(default)]
    pub default_jira_user: String,

    /// Labels marking an issue as not to be closed after migration.
    #[serde(default = "default_no_close_labels")]
    pub no_close_labels: Vec<String>,

    /// Inline source-handle to destination-identity map.
    #[serde(default)]
    pub user_map: HashMap<String, String>,

    /// Optional file whose identity map replaces the inline one.
    #[serde(default)]
    pub user_map_path: Option<PathBuf>,

    /// Whether to query the destination for already-linked issues
    /// before creating a new one.
    #[serde(default)]
    pub check_duplicates: bool,

    /// Directory downloaded images are stored in pending upload.
    #[serde(default = "default_attachments_dir")]
    pub attachments_dir: PathBuf,

    /// GitHub-side settings.
    pub github: GithubSettings,

    /// Jira-side settings.
    pub jira: JiraSettings,
}

fn default_no_close_labels() -> Vec<String> {
    vec!["bugzilla".to_string(), "canary-failure".to_string()]
}

fn default_attachments_dir() -> PathBuf {
    PathBuf::from("images")
}

impl MigrationConfig {
    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file is missing, unparsable, or
    /// fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::read(path)?;
        config.validate(path)?;
        Ok(config)
    }

    /// Reads configuration from a TOML file without validating it, so
    /// callers can overlay their own values first.
    ///
    /// When `user-map-path` is set, the referenced file's identity map
    /// replaces the inline `user-map` table.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file is missing or unparsable.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        info!(path = %path.display(), "Loading configuration");

        if !path.exists() {
            return Err(ConfigError::MissingFile {
                path: path.display().to_string(),
            });
        }

        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;
        let mut config: MigrationConfig =
            toml::from_str(&raw).map_err(|e| ConfigError::TomlError {
                path: path.display().to_string(),
                source: e,
            })?;

        if let Some(user_map_path) = &config.user_map_path {
            debug!(path = %user_map_path.display(), "Loading identity map override");
            config.user_map = load_user_map(user_map_path)?;
        }

        Ok(config)
    }

    /// Validates required settings.
    pub fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let fail = |message: &str| {
            Err(ConfigError::ValidationError {
                path: path.display().to_string(),
                message: message.to_string(),
            })
        };

        if self.label_filter.is_empty() {
            return fail("label-filter must name at least one label");
        }
        if self.completion_label.is_empty() {
            return fail("completion-label is required");
        }
        if self.default_jira_user.is_empty() {
            return fail("default-jira-user is required for creating issues");
        }
        if !self.github.repo.contains('/') {
            return fail("github.repo must be of the form owner/name");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const VALID: &str = r#"
label-filter = ["migrate"]
label-exclusions = ["wontfix"]
completion-label = "migrated-to-jira"
default-jira-user = "acc-default"

[github]
repo = "waldoapp/backend"

[jira]
base-url = "https://jira.example.com"
project-key = "WAL"
source-link-field = "customfield_12316846"

[user-map]
alice = "acc-alice"
"#;

    fn write_config(dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join("config.toml");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_valid_config() {
        let temp = TempDir::new().unwrap();
        let path = write_config(temp.path(), VALID);

        let config = MigrationConfig::load(&path).unwrap();

        assert_eq!(config.label_filter, vec!["migrate"]);
        assert_eq!(config.completion_label, "migrated-to-jira");
        assert_eq!(config.user_map["alice"], "acc-alice");
        assert_eq!(
            config.no_close_labels,
            vec!["bugzilla".to_string(), "canary-failure".to_string()]
        );
        assert!(!config.check_duplicates);
        assert_eq!(config.attachments_dir, PathBuf::from("images"));
        assert_eq!(config.jira.project_key, "WAL");
    }

    #[test]
    fn missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let result = MigrationConfig::load(&temp.path().join("nonexistent.toml"));
        assert!(matches!(result, Err(ConfigError::MissingFile { .. })));
    }

    #[test]
    fn missing_default_user_fails_validation() {
        let temp = TempDir::new().unwrap();
        let contents = VALID.replace("default-jira-user = \"acc-default\"", "");
        let path = write_config(temp.path(), &contents);

        let result = MigrationConfig::load(&path);
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn empty_label_filter_fails_validation() {
        let temp = TempDir::new().unwrap();
        let contents = VALID.replace("label-filter = [\"migrate\"]", "label-filter = []");
        let path = write_config(temp.path(), &contents);

        let result = MigrationConfig::load(&path);
        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn user_map_file_overrides_inline_map() {
        let temp = TempDir::new().unwrap();
        let map_path = temp.path().join("user_map.toml");
        fs::write(&map_path, "bob = \"acc-bob\"\n").unwrap();

        // Top-level key, so it must precede the table sections.
        let contents = format!(
            "user-map-path = \"{}\"\n{VALID}",
            map_path.display().to_string().replace('\\', "/")
        );
        let path = write_config(temp.path(), &contents);

        let config = MigrationConfig::load(&path).unwrap();
        assert_eq!(config.user_map.len(), 1);
        assert_eq!(config.user_map["bob"], "acc-bob");
    }
}
