//! Runner configuration.

use crate::config::MigrationConfig;

/// Secrets used to authenticate against both systems.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// GitHub personal access token.
    pub github_token: String,

    /// Jira API token.
    pub jira_token: String,

    /// Optional browser session cookie for SSO-gated image downloads.
    pub session_cookie: Option<String>,
}

/// Configuration for a migration run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Labels an issue must carry to be a candidate.
    pub label_filter: Vec<String>,

    /// Labels excluding an issue, without the completion labels.
    pub label_exclusions: Vec<String>,

    /// Label applied to migrated issues.
    pub completion_label: String,

    /// Completion label for non-closeable issues.
    pub squad_completion_label: Option<String>,

    /// Labels marking an issue as not to be closed after migration.
    pub no_close_labels: Vec<String>,

    /// Whether to query the destination for duplicates before creating.
    pub check_duplicates: bool,

    /// Whether to preview mappings without mutating either system.
    pub dry_run: bool,
}

impl RunnerConfig {
    /// Builds a runner configuration from parsed settings.
    pub fn from_settings(settings: &MigrationConfig, dry_run: bool) -> Self {
        Self {
            label_filter: settings.label_filter.clone(),
            label_exclusions: settings.label_exclusions.clone(),
            completion_label: settings.completion_label.clone(),
            squad_completion_label: settings.squad_completion_label.clone(),
            no_close_labels: settings.no_close_labels.clone(),
            check_duplicates: settings.check_duplicates,
            dry_run,
        }
    }

    /// The full exclusion set: configured exclusions plus the completion
    /// labels, so already-migrated issues are never fetched again.
    pub fn exclusion_set(&self) -> Vec<String> {
        let mut exclusions = vec![self.completion_label.clone()];
        if let Some(label) = &self.squad_completion_label {
            exclusions.push(label.clone());
        }
        exclusions.extend(self.label_exclusions.iter().cloned());
        exclusions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exclusion_set_always_contains_completion_labels() {
        let config = RunnerConfig {
            label_filter: vec!["migrate".to_string()],
            label_exclusions: vec!["wontfix".to_string()],
            completion_label: "migrated".to_string(),
            squad_completion_label: Some("migrated-squad".to_string()),
            no_close_labels: vec![],
            check_duplicates: false,
            dry_run: false,
        };

        assert_eq!(
            config.exclusion_set(),
            vec!["migrated", "migrated-squad", "wontfix"]
        );
    }
}
