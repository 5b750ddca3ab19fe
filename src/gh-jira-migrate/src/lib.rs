//! Migrates GitHub issues to Jira.
//!
//! Each candidate issue is mapped onto the destination schema (type,
//! priority, components, identities), its markdown translated to wiki
//! markup with embedded images rehosted as attachments, then created on
//! the destination with its comment history, cross-linked, labelled and
//! optionally closed at the source.

pub mod assets;
pub mod config;
pub mod github;
pub mod jira;
pub mod mapping;
pub mod markup;
pub mod runner;
pub mod summary;

pub use assets::{AssetFetcher, AssetStore, AttachmentRef};
pub use config::{ConfigError, MigrationConfig};
pub use github::{GithubClient, SourceComment, SourceError, SourceHost, SourceIssue};
pub use jira::{DestHost, JiraClient, JiraError, JiraSettings};
pub use mapping::{map_comment, map_issue, IdentityMap, MappedIssue};
pub use markup::{translate, Translation};
pub use runner::{Credentials, Runner, RunnerConfig, RunnerError};
pub use summary::{MigrationResult, RunSummary};
