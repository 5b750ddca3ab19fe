//! Jira client error types.

use thiserror::Error;

/// Errors that can occur while talking to Jira.
#[derive(Debug, Error)]
pub enum JiraError {
    /// HTTP transport error.
    #[error("Jira HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the Jira API.
    #[error("Unexpected Jira response (status {status}): {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// Failed to read a local attachment file.
    #[error("Failed to read attachment '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize an issue payload.
    #[error("Failed to serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The configured cross-reference field id is not of the
    /// `customfield_<id>` form required for JQL queries.
    #[error("Invalid cross-reference field id: {field}")]
    InvalidLinkField { field: String },
}
