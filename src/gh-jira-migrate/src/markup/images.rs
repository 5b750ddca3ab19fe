//! Embedded image extraction and rehosting.

use crate::assets::{AssetFetcher, AttachmentRef};
use regex::Regex;
use std::sync::LazyLock;

static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)\s]+)\)").expect("valid image pattern"));

/// An inline image reference found in a markdown body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    /// Alt text from the markdown.
    pub alt: String,

    /// Image URL.
    pub url: String,
}

/// Lists the inline image references in a body, in order of appearance.
pub fn extract_image_refs(text: &str) -> Vec<ImageRef> {
    IMAGE
        .captures_iter(text)
        .map(|captures| ImageRef {
            alt: captures[1].to_string(),
            url: captures[2].to_string(),
        })
        .collect()
}

/// Replaces each inline image with a Jira embed for the rehosted copy.
///
/// Downloads that fail degrade to an external link (`[alt|url]`) so a
/// missing asset never fails the whole translation.
pub(crate) async fn rehost_images(
    text: &str,
    fetcher: &dyn AssetFetcher,
) -> (String, Vec<AttachmentRef>) {
    let mut attachments = Vec::new();
    let mut output = String::with_capacity(text.len());
    let mut cursor = 0;

    for captures in IMAGE.captures_iter(text) {
        let matched = captures.get(0).expect("whole match always present");
        let alt = &captures[1];
        let url = &captures[2];

        output.push_str(&text[cursor..matched.start()]);
        match fetcher.fetch(url).await {
            Some(attachment) => {
                output.push_str(&format!("!{}!", attachment.filename));
                attachments.push(attachment);
            }
            None => {
                output.push_str(&format!("[{alt}|{url}]"));
            }
        }
        cursor = matched.end();
    }

    output.push_str(&text[cursor..]);
    (output, attachments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::test_support::AllAssets;

    #[test]
    fn extracts_images_in_order() {
        let refs = extract_image_refs("![a](http://x/1.png) text ![](http://x/2)");

        assert_eq!(
            refs,
            vec![
                ImageRef {
                    alt: "a".to_string(),
                    url: "http://x/1.png".to_string()
                },
                ImageRef {
                    alt: String::new(),
                    url: "http://x/2".to_string()
                },
            ]
        );
    }

    #[test]
    fn ignores_plain_links() {
        assert!(extract_image_refs("[not an image](http://x)").is_empty());
    }

    #[tokio::test]
    async fn rehosts_multiple_images() {
        let (text, attachments) =
            rehost_images("![a](http://x/1.png)\n![b](http://x/2.gif)", &AllAssets).await;

        assert_eq!(text, "!1.png!\n!2.gif!");
        assert_eq!(attachments.len(), 2);
    }
}
