//! Attachment rehosting.
//!
//! This module downloads images embedded in GitHub issue bodies and comments
//! so they can be re-uploaded to Jira. Downloads go through an ordered chain
//! of credential strategies: a token strategy first, then a browser session
//! cookie for SSO-gated assets in private repositories.

mod error;
mod store;
mod strategy;

pub use error::AssetError;
pub use store::AssetStore;
pub use strategy::{CredentialStrategy, SessionCookieStrategy, TokenStrategy};

use std::path::PathBuf;

/// An image reference extracted during markup translation.
///
/// Created when an embedded image is encountered; resolved when the local
/// copy is uploaded to the destination issue. The local copy is not needed
/// for correctness once the upload succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentRef {
    /// Original URL the image was downloaded from.
    pub source_url: String,

    /// Where the downloaded copy is stored locally.
    pub local_path: PathBuf,

    /// Filename embedded in the translated text (`!filename!`).
    pub filename: String,
}

/// Fetches a remote asset into local storage.
///
/// Implementations must never fail the caller: any download problem is
/// logged and surfaces as `None`, letting the markup translator degrade
/// the embed to an external link.
#[async_trait::async_trait]
pub trait AssetFetcher: Send + Sync {
    /// Downloads `url` and returns a reference to the stored copy, or
    /// `None` if the asset could not be retrieved as an image.
    async fn fetch(&self, url: &str) -> Option<AttachmentRef>;
}
