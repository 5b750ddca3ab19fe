//! Credential strategies for asset downloads.
//!
//! GitHub user-attachment URLs in private repositories sometimes return an
//! SSO sign-in page instead of the image when fetched with an API token.
//! Each strategy is a capability object with a single fetch attempt; the
//! store tries them in order until one yields an image payload.

use crate::assets::AssetError;
use reqwest::Client;
use tracing::debug;

/// A single way of authenticating an asset download.
#[async_trait::async_trait]
pub trait CredentialStrategy: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Attempts to fetch `url`, returning the image bytes on success or
    /// `Ok(None)` when the response is not an image payload.
    async fn attempt_fetch(&self, client: &Client, url: &str) -> Result<Option<Vec<u8>>, AssetError>;
}

/// Token-based strategy using the GitHub API credential.
pub struct TokenStrategy {
    token: String,
}

impl TokenStrategy {
    /// Creates a strategy authenticating with the given personal access token.
    pub fn new(token: String) -> Self {
        Self { token }
    }
}

#[async_trait::async_trait]
impl CredentialStrategy for TokenStrategy {
    fn name(&self) -> &'static str {
        "token"
    }

    async fn attempt_fetch(&self, client: &Client, url: &str) -> Result<Option<Vec<u8>>, AssetError> {
        let response = client
            .get(url)
            .header("Authorization", format!("token {}", self.token))
            .header("Accept", IMAGE_ACCEPT)
            .send()
            .await?;

        read_image_body(url, response).await
    }
}

/// Browser-session-cookie strategy for SSO-gated private assets.
///
/// Mimics a browser request closely enough that GitHub serves the image
/// instead of a sign-in interstitial.
pub struct SessionCookieStrategy {
    cookie: String,
}

impl SessionCookieStrategy {
    /// Creates a strategy authenticating with a raw browser Cookie header.
    pub fn new(cookie: String) -> Self {
        Self { cookie }
    }
}

#[async_trait::async_trait]
impl CredentialStrategy for SessionCookieStrategy {
    fn name(&self) -> &'static str {
        "session-cookie"
    }

    async fn attempt_fetch(&self, client: &Client, url: &str) -> Result<Option<Vec<u8>>, AssetError> {
        let response = client
            .get(url)
            .header("User-Agent", BROWSER_USER_AGENT)
            .header("Cookie", self.cookie.clone())
            .header("Accept", IMAGE_ACCEPT)
            .header("Referer", "https://github.com/")
            .send()
            .await?;

        read_image_body(url, response).await
    }
}

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/110.0.0.0 Safari/537.36";

const IMAGE_ACCEPT: &str = "image/avif,image/webp,image/apng,image/svg+xml,image/*,*/*;q=0.8";

/// Reads the body when the response is a 2xx image, `Ok(None)` otherwise.
async fn read_image_body(
    url: &str,
    response: reqwest::Response,
) -> Result<Option<Vec<u8>>, AssetError> {
    let status = response.status();
    let is_image = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("image"));

    if !status.is_success() || !is_image {
        debug!(url, status = status.as_u16(), is_image, "Response is not an image payload");
        return Ok(None);
    }

    let bytes = response.bytes().await?;
    Ok(Some(bytes.to_vec()))
}
