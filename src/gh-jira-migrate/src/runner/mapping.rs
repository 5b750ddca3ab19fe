//! Per-issue migration mapping.

use crate::assets::AttachmentRef;
use crate::jira::{CommentPayload, IssuePayload};

/// Everything needed to migrate one source issue.
///
/// Built during the mapping phase, consumed during the creation phase.
/// Attachments from the body and all comments are collected into one
/// ordered list; they must all be uploaded before any comment is posted,
/// because comment text embeds the rehosted filenames and the
/// destination only resolves embeds against already-attached files.
#[derive(Debug, Clone)]
pub struct MigrationMapping {
    /// Source issue number.
    pub issue_number: u64,

    /// Source issue URL.
    pub source_url: String,

    /// Destination creation payload.
    pub payload: IssuePayload,

    /// Mapped comment payloads, in creation order.
    pub comments: Vec<CommentPayload>,

    /// Attachments pending upload, body first then comments in order.
    pub attachments: Vec<AttachmentRef>,

    /// Whether the source issue may be closed after migration.
    pub can_close: bool,
}
