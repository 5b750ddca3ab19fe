//! GitHub markdown to Jira wiki markup translation.
//!
//! The translator is an ordered pipeline of independent rewrite passes.
//! Embedded images are handled first: each one is downloaded and replaced
//! with a Jira embed for the rehosted filename, degrading to an external
//! link when the download fails. The remaining passes are pure text
//! rewrites that never fail; at worst a malformed fragment is left
//! untranslated.

mod images;
mod passes;

pub use images::extract_image_refs;
pub use passes::translate_markup;

use crate::assets::{AssetFetcher, AttachmentRef};

/// A translated body plus the attachments it references.
#[derive(Debug, Clone, Default)]
pub struct Translation {
    /// The body in Jira wiki markup.
    pub text: String,

    /// Attachments pending upload, in order of appearance.
    pub attachments: Vec<AttachmentRef>,
}

/// Translates a GitHub-flavored markdown body into Jira wiki markup.
///
/// Empty input yields an empty translation with no attachments.
pub async fn translate(text: &str, fetcher: &dyn AssetFetcher) -> Translation {
    if text.is_empty() {
        return Translation::default();
    }

    let (text, attachments) = images::rehost_images(text, fetcher).await;
    Translation {
        text: passes::translate_markup(&text),
        attachments,
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{AllAssets, NoAssets};
    use super::*;

    #[tokio::test]
    async fn empty_input_translates_to_empty_output() {
        let translation = translate("", &NoAssets).await;
        assert_eq!(translation.text, "");
        assert!(translation.attachments.is_empty());
    }

    #[tokio::test]
    async fn image_becomes_embed_when_download_succeeds() {
        let translation = translate("before ![shot](http://x/img.png) after", &AllAssets).await;

        assert_eq!(translation.text, "before !img.png! after");
        assert_eq!(translation.attachments.len(), 1);
        assert_eq!(translation.attachments[0].filename, "img.png");
        assert_eq!(translation.attachments[0].source_url, "http://x/img.png");
    }

    #[tokio::test]
    async fn image_degrades_to_link_when_download_fails() {
        let translation = translate("![shot](http://x/img.png)", &NoAssets).await;

        assert_eq!(translation.text, "[shot|http://x/img.png]");
        assert!(translation.attachments.is_empty());
    }

    #[tokio::test]
    async fn body_with_heading_and_list_translates() {
        let translation = translate("# Title\n- item", &NoAssets).await;
        assert_eq!(translation.text, "h1. Title\n* item");
    }
}
