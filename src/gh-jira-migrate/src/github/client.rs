//! Octocrab-backed GitHub client.

use crate::github::{SourceComment, SourceError, SourceHost, SourceIssue};
use chrono::SecondsFormat;
use octocrab::Octocrab;
use tracing::{debug, info};

/// Comment authors dropped during migration.
const BOT_AUTHORS: &[&str] = &["stale[bot]"];

/// Comment bodies dropped as known noise.
const NOISE_BODIES: &[&str] = &["dependency_scan failed."];

/// Page size for issue and comment listing.
const PER_PAGE: u8 = 100;

/// GitHub client scoped to a single repository.
pub struct GithubClient {
    octocrab: Octocrab,
    owner: String,
    repo: String,
}

impl GithubClient {
    /// Creates a client for an `owner/name` repository slug.
    pub fn new(repo_slug: &str, token: String) -> Result<Self, SourceError> {
        let (owner, repo) = repo_slug
            .split_once('/')
            .filter(|(owner, repo)| !owner.is_empty() && !repo.is_empty() && !repo.contains('/'))
            .ok_or_else(|| SourceError::InvalidRepo {
                repo: repo_slug.to_string(),
            })?;

        let octocrab = Octocrab::builder().personal_token(token).build()?;
        Ok(Self {
            octocrab,
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    fn convert_issue(issue: &octocrab::models::issues::Issue) -> SourceIssue {
        SourceIssue {
            number: issue.number,
            title: issue.title.clone(),
            body: issue.body.clone(),
            author: issue.user.login.clone(),
            labels: issue.labels.iter().map(|label| label.name.clone()).collect(),
            assignees: issue
                .assignees
                .iter()
                .map(|assignee| assignee.login.clone())
                .collect(),
            html_url: issue.html_url.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl SourceHost for GithubClient {
    async fn issues_by_label(
        &self,
        filter: &[String],
        exclusions: &[String],
    ) -> Result<Vec<SourceIssue>, SourceError> {
        debug!(
            labels = ?filter,
            exclusions = ?exclusions,
            "Listing issues by label"
        );

        let filter = filter.to_vec();
        let mut page = self
            .octocrab
            .issues(&self.owner, &self.repo)
            .list()
            .labels(&filter)
            .per_page(PER_PAGE)
            .send()
            .await?;

        let mut issues = Vec::new();
        loop {
            issues.extend(
                page.items
                    .iter()
                    // The issues endpoint also returns pull requests.
                    .filter(|issue| issue.pull_request.is_none())
                    .map(Self::convert_issue)
                    .filter(|issue| !issue.has_any_label(exclusions)),
            );

            match self
                .octocrab
                .get_page::<octocrab::models::issues::Issue>(&page.next)
                .await?
            {
                Some(next_page) => page = next_page,
                None => break,
            }
        }

        info!(count = issues.len(), "Fetched issues");
        Ok(issues)
    }

    async fn issue_comments(&self, issue_number: u64) -> Result<Vec<SourceComment>, SourceError> {
        let mut page = self
            .octocrab
            .issues(&self.owner, &self.repo)
            .list_comments(issue_number)
            .per_page(PER_PAGE)
            .send()
            .await?;

        let mut comments = Vec::new();
        loop {
            comments.extend(page.items.iter().filter_map(|comment| {
                let body = comment.body.clone().unwrap_or_default();
                if BOT_AUTHORS.contains(&comment.user.login.as_str())
                    || NOISE_BODIES.contains(&body.as_str())
                {
                    return None;
                }
                Some(SourceComment {
                    author: comment.user.login.clone(),
                    body,
                    created_at: comment
                        .created_at
                        .to_rfc3339_opts(SecondsFormat::Secs, true),
                })
            }));

            match self
                .octocrab
                .get_page::<octocrab::models::issues::Comment>(&page.next)
                .await?
            {
                Some(next_page) => page = next_page,
                None => break,
            }
        }

        debug!(issue_number, count = comments.len(), "Fetched comments");
        Ok(comments)
    }

    async fn add_comment(&self, issue_number: u64, body: &str) -> Result<(), SourceError> {
        self.octocrab
            .issues(&self.owner, &self.repo)
            .create_comment(issue_number, body)
            .await?;
        Ok(())
    }

    async fn add_label(&self, issue_number: u64, label: &str) -> Result<(), SourceError> {
        self.octocrab
            .issues(&self.owner, &self.repo)
            .add_labels(issue_number, &[label.to_string()])
            .await?;
        Ok(())
    }

    async fn close_issue(&self, issue_number: u64) -> Result<(), SourceError> {
        self.octocrab
            .issues(&self.owner, &self.repo)
            .update(issue_number)
            .state(octocrab::models::IssueState::Closed)
            .send()
            .await?;
        Ok(())
    }

    async fn repo_id(&self) -> Result<String, SourceError> {
        let repository = self.octocrab.repos(&self.owner, &self.repo).get().await?;
        Ok(repository.id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_repo_slug() {
        assert!(matches!(
            GithubClient::new("no-slash", "token".to_string()),
            Err(SourceError::InvalidRepo { .. })
        ));
        assert!(matches!(
            GithubClient::new("a/b/c", "token".to_string()),
            Err(SourceError::InvalidRepo { .. })
        ));
    }

    #[tokio::test]
    async fn accepts_owner_name_slug() {
        assert!(GithubClient::new("waldoapp/backend", "token".to_string()).is_ok());
    }
}
