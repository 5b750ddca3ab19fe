//! GitHub source collaborator.
//!
//! Read/write operations against the repository issues are migrated from,
//! behind the [`SourceHost`] seam so the orchestrator can run against
//! in-memory fakes in tests.

mod client;
mod error;
mod models;

pub use client::GithubClient;
pub use error::SourceError;
pub use models::{SourceComment, SourceIssue};

/// Operations the source issue tracker must expose.
#[async_trait::async_trait]
pub trait SourceHost: Send + Sync {
    /// Lists open issues carrying every filter label and none of the
    /// exclusion labels. Pull requests are excluded.
    async fn issues_by_label(
        &self,
        filter: &[String],
        exclusions: &[String],
    ) -> Result<Vec<SourceIssue>, SourceError>;

    /// Fetches the comments of an issue in creation order, with known
    /// bot authors and noise bodies filtered out.
    async fn issue_comments(&self, issue_number: u64) -> Result<Vec<SourceComment>, SourceError>;

    /// Posts a comment on an issue.
    async fn add_comment(&self, issue_number: u64, body: &str) -> Result<(), SourceError>;

    /// Adds a label to an issue.
    async fn add_label(&self, issue_number: u64, label: &str) -> Result<(), SourceError>;

    /// Closes an issue.
    async fn close_issue(&self, issue_number: u64) -> Result<(), SourceError>;

    /// The repository identifier, fetched from the API.
    async fn repo_id(&self) -> Result<String, SourceError>;
}
