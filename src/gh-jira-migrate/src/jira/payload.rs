//! Jira issue and comment payload types.

use serde::{Deserialize, Serialize};

/// A Jira field addressed by name, e.g. `{"name": "Bug"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedField {
    pub name: String,
}

impl NamedField {
    /// Creates a named field value.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A Jira field addressed by value, e.g. `{"value": "Critical"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueField {
    pub value: String,
}

/// A Jira user reference by account id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: String,
}

/// The mapped fields of a destination issue.
///
/// The cross-reference back to the source issue is carried separately in
/// `source_url`; the client injects it under the configured custom field
/// id when building the request.
#[derive(Debug, Clone, Serialize)]
pub struct IssuePayload {
    /// Issue type, e.g. `Task` or `Bug`.
    #[serde(rename = "issuetype")]
    pub issue_type: NamedField,

    /// Components derived from squad labels.
    pub components: Vec<NamedField>,

    /// Issue summary (the source issue title).
    pub summary: String,

    /// Translated issue body.
    pub description: String,

    /// Reporter, identity-mapped from the source author.
    pub reporter: UserRef,

    /// Assignee; absent when the source assignee is unmapped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<UserRef>,

    /// Priority; `Undefined` when no label matches.
    pub priority: NamedField,

    /// Severity; omitted entirely when no label matches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<ValueField>,

    /// Source labels, whitespace replaced with underscores.
    pub labels: Vec<String>,

    /// Source issue URL, stored in the cross-reference custom field.
    #[serde(skip)]
    pub source_url: String,
}

/// A comment to post on the destination issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentPayload {
    /// `"<timestamp> @<author>"` line followed by the translated body.
    pub body: String,
}

/// Response from issue creation.
///
/// Jira can return 2xx yet omit the key; both fields are optional so the
/// orchestrator can treat a missing identifier as a per-issue failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateIssueResponse {
    /// Created issue key, e.g. `WAL-123`.
    #[serde(default)]
    pub key: Option<String>,

    /// Self-referencing API locator of the created issue.
    #[serde(default, rename = "self")]
    pub api_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_serializes_jira_field_names() {
        let payload = IssuePayload {
            issue_type: NamedField::new("Bug"),
            components: vec![NamedField::new("Documentation")],
            summary: "title".to_string(),
            description: "body".to_string(),
            reporter: UserRef {
                id: "uid".to_string(),
            },
            assignee: None,
            priority: NamedField::new("Undefined"),
            severity: None,
            labels: vec!["bug".to_string()],
            source_url: "https://github.com/o/r/issues/1".to_string(),
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["issuetype"]["name"], "Bug");
        assert_eq!(value["components"][0]["name"], "Documentation");
        assert!(value.get("assignee").is_none());
        assert!(value.get("severity").is_none());
        assert!(value.get("source_url").is_none());
    }

    #[test]
    fn create_response_tolerates_missing_key() {
        let response: CreateIssueResponse = serde_json::from_str("{}").unwrap();
        assert!(response.key.is_none());
        assert!(response.api_url.is_none());
    }
}
