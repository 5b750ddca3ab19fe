//! Source issue and comment models.

/// An issue fetched from the source tracker. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceIssue {
    /// Issue number within the repository.
    pub number: u64,

    /// Issue title.
    pub title: String,

    /// Markdown body; `None` when the issue has no description.
    pub body: Option<String>,

    /// Login of the issue author.
    pub author: String,

    /// Label names in the order the API returns them.
    pub labels: Vec<String>,

    /// Assignee logins; the first one is the primary assignee.
    pub assignees: Vec<String>,

    /// Browsable issue URL.
    pub html_url: String,
}

impl SourceIssue {
    /// Whether the issue carries any of the given labels.
    pub fn has_any_label(&self, labels: &[String]) -> bool {
        self.labels.iter().any(|label| labels.contains(label))
    }
}

/// A comment belonging to one source issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceComment {
    /// Login of the comment author.
    pub author: String,

    /// Markdown comment body.
    pub body: String,

    /// Creation timestamp as reported by the source system.
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_any_label_matches_exactly() {
        let issue = SourceIssue {
            number: 1,
            title: "t".to_string(),
            body: None,
            author: "alice".to_string(),
            labels: vec!["bug".to_string(), "squad:doc".to_string()],
            assignees: vec![],
            html_url: "https://github.com/o/r/issues/1".to_string(),
        };

        assert!(issue.has_any_label(&["bug".to_string()]));
        assert!(!issue.has_any_label(&["bugzilla".to_string()]));
        assert!(!issue.has_any_label(&[]));
    }
}
