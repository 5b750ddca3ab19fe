//! Source-to-destination entity mapping.
//!
//! Maps a source issue's structured fields (author, labels, priority,
//! type, body) onto the destination schema. Bodies and comment bodies go
//! through the markup translator, collecting attachment references along
//! the way.

mod identity;
pub mod tables;

pub use identity::IdentityMap;

use crate::assets::{AssetFetcher, AttachmentRef};
use crate::github::{SourceComment, SourceIssue};
use crate::jira::{CommentPayload, IssuePayload, NamedField, ValueField};
use crate::markup;

/// A mapped issue plus everything needed to finish its migration.
#[derive(Debug, Clone)]
pub struct MappedIssue {
    /// Destination creation payload.
    pub payload: IssuePayload,

    /// Attachments referenced by the translated body.
    pub attachments: Vec<AttachmentRef>,

    /// Whether the source issue may be closed after migration.
    pub can_close: bool,
}

/// Maps a source issue onto the destination schema.
///
/// `no_close` is a pluggable predicate for issues that must stay open
/// (e.g. linkage to an external defect tracker); multi-squad ownership
/// additionally makes an issue non-closeable.
pub async fn map_issue(
    issue: &SourceIssue,
    identities: &IdentityMap,
    no_close: &dyn Fn(&SourceIssue) -> bool,
    fetcher: &dyn AssetFetcher,
) -> MappedIssue {
    let (components, squad_count) = tables::components(&issue.labels);
    let can_close = squad_count <= 1 && !no_close(issue);

    let body = issue.body.as_deref().unwrap_or_default();
    let translation = markup::translate(body, fetcher).await;

    let labels = issue
        .labels
        .iter()
        .map(|label| label.replace(char::is_whitespace, "_"))
        .collect();

    let payload = IssuePayload {
        issue_type: NamedField::new(tables::issue_type(&issue.labels)),
        components: components.into_iter().map(NamedField::new).collect(),
        summary: issue.title.clone(),
        description: translation.text,
        reporter: identities.resolve_or_default(&issue.author),
        assignee: issue
            .assignees
            .first()
            .and_then(|handle| identities.resolve(handle)),
        priority: NamedField::new(tables::priority(&issue.labels)),
        severity: tables::severity(&issue.labels).map(|value| ValueField {
            value: value.to_string(),
        }),
        labels,
        source_url: issue.html_url.clone(),
    };

    MappedIssue {
        payload,
        attachments: translation.attachments,
        can_close,
    }
}

/// Maps a source comment onto a destination comment payload.
///
/// The destination resolves the posting author from the authenticated
/// session, so the original author and timestamp are prepended to the
/// body instead: `"<timestamp> @<author>\n<translated body>"`.
pub async fn map_comment(
    comment: &SourceComment,
    fetcher: &dyn AssetFetcher,
) -> (CommentPayload, Vec<AttachmentRef>) {
    let translation = markup::translate(&comment.body, fetcher).await;
    let payload = CommentPayload {
        body: format!(
            "{} @{}\n{}",
            comment.created_at, comment.author, translation.text
        ),
    };
    (payload, translation.attachments)
}

/// Builds a no-close predicate matching any of the given labels.
pub fn label_no_close(labels: Vec<String>) -> impl Fn(&SourceIssue) -> bool {
    move |issue: &SourceIssue| issue.has_any_label(&labels)
}
