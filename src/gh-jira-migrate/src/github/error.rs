//! Source collaborator error types.

use thiserror::Error;

/// Errors that can occur while talking to GitHub.
#[derive(Debug, Error)]
pub enum SourceError {
    /// GitHub API error.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),

    /// The configured repository is not of the `owner/name` form.
    #[error("Invalid repository '{repo}', expected owner/name")]
    InvalidRepo { repo: String },
}
