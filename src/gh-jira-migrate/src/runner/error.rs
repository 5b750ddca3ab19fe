//! Runner error types.

use crate::config::ConfigError;
use crate::github::SourceError;
use crate::jira::JiraError;

/// Errors that abort a whole migration run.
///
/// Per-issue failures never surface here; they are recorded in the run
/// summary and processing continues with the next issue.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration loading or validation errors.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Source collaborator errors during pre-flight reads.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Destination collaborator errors outside per-issue processing.
    #[error(transparent)]
    Jira(#[from] JiraError),
}
