//! Asset download error types.

use thiserror::Error;

/// Errors that can occur while downloading or storing an asset.
#[derive(Debug, Error)]
pub enum AssetError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to write the downloaded asset to disk.
    #[error("Failed to write '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
