//! Jira REST collaborator.
//!
//! This module defines the destination-side seam ([`DestHost`]) and its
//! reqwest-backed implementation ([`JiraClient`]). The orchestrator only
//! talks to the trait, which keeps the migration flow testable against
//! in-memory fakes.

mod client;
mod error;
mod payload;

pub use client::{JiraClient, JiraSettings};
pub use error::JiraError;
pub use payload::{
    CommentPayload, CreateIssueResponse, IssuePayload, NamedField, UserRef, ValueField,
};

use std::path::Path;

/// Write operations the destination issue tracker must expose.
#[async_trait::async_trait]
pub trait DestHost: Send + Sync {
    /// Creates an issue from a mapped payload.
    ///
    /// The response may lack a key even on transport-level success; the
    /// caller decides how to treat that.
    async fn create_issue(&self, payload: &IssuePayload) -> Result<CreateIssueResponse, JiraError>;

    /// Uploads a local file as an attachment on an existing issue,
    /// returning the stored filename.
    async fn add_attachment(&self, key: &str, path: &Path) -> Result<Option<String>, JiraError>;

    /// Adds a comment to an existing issue.
    async fn add_comment(&self, key: &str, payload: &CommentPayload) -> Result<(), JiraError>;

    /// Returns the keys of issues whose cross-reference field equals the
    /// given source URL. Used for duplicate detection.
    async fn find_linked_issues(&self, source_url: &str) -> Result<Vec<String>, JiraError>;

    /// Transitions an issue to the workflow state with the given symbolic
    /// name. Returns false when no such transition is available.
    async fn transition_issue(&self, key: &str, status_name: &str) -> Result<bool, JiraError>;

    /// Browsable URL for an issue key.
    fn browse_url(&self, key: &str) -> String;
}
