//! Local asset storage.

use crate::assets::{AssetError, AssetFetcher, AttachmentRef, CredentialStrategy};
use std::path::PathBuf;
use tracing::{info, warn};

/// Downloads assets through a chain of credential strategies and stores
/// them under a local directory pending upload to the destination.
pub struct AssetStore {
    client: reqwest::Client,
    strategies: Vec<Box<dyn CredentialStrategy>>,
    dir: PathBuf,
}

impl AssetStore {
    /// Creates a store writing downloads into `dir`.
    ///
    /// The token strategy is always tried first; the session-cookie
    /// strategy is appended only when a cookie is configured, and is used
    /// only after the token strategy fails to yield an image.
    pub fn new(dir: PathBuf, token: String, session_cookie: Option<String>) -> Self {
        let mut strategies: Vec<Box<dyn CredentialStrategy>> =
            vec![Box::new(crate::assets::TokenStrategy::new(token))];
        if let Some(cookie) = session_cookie {
            strategies.push(Box::new(crate::assets::SessionCookieStrategy::new(cookie)));
        }

        Self {
            client: reqwest::Client::new(),
            strategies,
            dir,
        }
    }

    /// Returns the destination filename for a source URL.
    ///
    /// Uses the last path segment, appending `.png` when the segment
    /// carries no extension (GitHub user-attachment URLs are bare UUIDs).
    pub fn filename_from_url(url: &str) -> String {
        let segment = url::Url::parse(url)
            .ok()
            .and_then(|parsed| {
                parsed
                    .path_segments()
                    .and_then(|segments| segments.last().map(str::to_string))
            })
            .filter(|segment| !segment.is_empty())
            .unwrap_or_else(|| url.rsplit('/').next().unwrap_or(url).to_string());

        if segment.contains('.') {
            segment
        } else {
            format!("{segment}.png")
        }
    }

    async fn download(&self, url: &str) -> Result<Option<Vec<u8>>, AssetError> {
        for strategy in &self.strategies {
            match strategy.attempt_fetch(&self.client, url).await {
                Ok(Some(bytes)) => {
                    info!(url, strategy = strategy.name(), "Downloaded image");
                    return Ok(Some(bytes));
                }
                Ok(None) => {
                    warn!(url, strategy = strategy.name(), "Strategy did not yield an image");
                }
                Err(e) => {
                    warn!(url, strategy = strategy.name(), error = %e, "Download attempt failed");
                }
            }
        }

        Ok(None)
    }

    async fn store(&self, url: &str, bytes: &[u8]) -> Result<AttachmentRef, AssetError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| AssetError::Io {
                path: self.dir.display().to_string(),
                source: e,
            })?;

        let filename = Self::filename_from_url(url);
        let local_path = self.dir.join(&filename);
        tokio::fs::write(&local_path, bytes)
            .await
            .map_err(|e| AssetError::Io {
                path: local_path.display().to_string(),
                source: e,
            })?;

        Ok(AttachmentRef {
            source_url: url.to_string(),
            local_path,
            filename,
        })
    }
}

#[async_trait::async_trait]
impl AssetFetcher for AssetStore {
    async fn fetch(&self, url: &str) -> Option<AttachmentRef> {
        let bytes = match self.download(url).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                warn!(url, "Failed to download image with any strategy");
                return None;
            }
            Err(e) => {
                warn!(url, error = %e, "Failed to download image");
                return None;
            }
        };

        match self.store(url, &bytes).await {
            Ok(attachment) => Some(attachment),
            Err(e) => {
                warn!(url, error = %e, "Failed to store downloaded image");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_uses_last_path_segment() {
        assert_eq!(
            AssetStore::filename_from_url("https://example.com/images/shot.png"),
            "shot.png"
        );
    }

    #[test]
    fn filename_appends_extension_when_missing() {
        assert_eq!(
            AssetStore::filename_from_url(
                "https://github.com/user-attachments/assets/0a1b2c3d-4e5f"
            ),
            "0a1b2c3d-4e5f.png"
        );
    }

    #[test]
    fn filename_survives_unparsable_url() {
        assert_eq!(AssetStore::filename_from_url("not a url/pic.jpg"), "pic.jpg");
    }

    struct DenyAll;

    #[async_trait::async_trait]
    impl CredentialStrategy for DenyAll {
        fn name(&self) -> &'static str {
            "deny"
        }

        async fn attempt_fetch(
            &self,
            _client: &reqwest::Client,
            _url: &str,
        ) -> Result<Option<Vec<u8>>, AssetError> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn fetch_returns_none_when_all_strategies_fail() {
        let temp = tempfile::TempDir::new().unwrap();
        let store = AssetStore {
            client: reqwest::Client::new(),
            strategies: vec![Box::new(DenyAll)],
            dir: temp.path().to_path_buf(),
        };

        assert!(store.fetch("https://example.com/img.png").await.is_none());
    }

    struct StaticBytes(Vec<u8>);

    #[async_trait::async_trait]
    impl CredentialStrategy for StaticBytes {
        fn name(&self) -> &'static str {
            "static"
        }

        async fn attempt_fetch(
            &self,
            _client: &reqwest::Client,
            _url: &str,
        ) -> Result<Option<Vec<u8>>, AssetError> {
            Ok(Some(self.0.clone()))
        }
    }

    #[tokio::test]
    async fn fetch_writes_into_missing_directory() {
        let temp = tempfile::TempDir::new().unwrap();
        let dir = temp.path().join("images");
        let store = AssetStore {
            client: reqwest::Client::new(),
            strategies: vec![Box::new(StaticBytes(vec![1, 2, 3]))],
            dir: dir.clone(),
        };

        let attachment = store
            .fetch("https://example.com/assets/abcdef")
            .await
            .unwrap();

        assert_eq!(attachment.filename, "abcdef.png");
        assert_eq!(attachment.local_path, dir.join("abcdef.png"));
        assert_eq!(std::fs::read(&attachment.local_path).unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn fetch_falls_back_to_second_strategy() {
        let temp = tempfile::TempDir::new().unwrap();
        let store = AssetStore {
            client: reqwest::Client::new(),
            strategies: vec![Box::new(DenyAll), Box::new(StaticBytes(vec![9]))],
            dir: temp.path().to_path_buf(),
        };

        let attachment = store.fetch("https://example.com/x.gif").await.unwrap();
        assert_eq!(attachment.filename, "x.gif");
    }
}
