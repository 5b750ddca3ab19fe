//! Orchestrates the end-to-end migration run.
//!
//! Issues are processed strictly sequentially, one fully migrated (or
//! failed) before the next begins. Failures during per-issue processing
//! are caught at the issue boundary and recorded; only pre-flight reads
//! and configuration problems abort the run.

mod config;
mod error;
mod mapping;

pub use config::{Credentials, RunnerConfig};
pub use error::RunnerError;
pub use mapping::MigrationMapping;

use crate::assets::{AssetFetcher, AssetStore};
use crate::config::MigrationConfig;
use crate::github::{GithubClient, SourceHost, SourceIssue};
use crate::jira::{DestHost, JiraClient};
use crate::mapping::{label_no_close, map_comment, map_issue, IdentityMap};
use crate::summary::{MigrationResult, RunSummary};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, error, info, info_span, warn, Instrument};

/// Orchestrates a full migration run.
pub struct Runner {
    config: RunnerConfig,
    identities: IdentityMap,
    source: Arc<dyn SourceHost>,
    dest: Arc<dyn DestHost>,
    assets: Arc<dyn AssetFetcher>,
    /// Repository identifier, fetched once and reused for the whole run.
    repo_id: OnceCell<String>,
}

impl Runner {
    /// Builds a runner with real collaborators from parsed settings.
    pub fn new(
        settings: &MigrationConfig,
        credentials: Credentials,
        dry_run: bool,
    ) -> Result<Self, RunnerError> {
        let source = GithubClient::new(&settings.github.repo, credentials.github_token.clone())?;
        let dest = JiraClient::new(settings.jira.clone(), credentials.jira_token);
        let assets = AssetStore::new(
            settings.attachments_dir.clone(),
            credentials.github_token,
            credentials.session_cookie,
        );

        Ok(Self::with_collaborators(
            RunnerConfig::from_settings(settings, dry_run),
            IdentityMap::new(settings.user_map.clone(), settings.default_jira_user.clone()),
            Arc::new(source),
            Arc::new(dest),
            Arc::new(assets),
        ))
    }

    /// Builds a runner from explicit collaborators.
    pub fn with_collaborators(
        config: RunnerConfig,
        identities: IdentityMap,
        source: Arc<dyn SourceHost>,
        dest: Arc<dyn DestHost>,
        assets: Arc<dyn AssetFetcher>,
    ) -> Self {
        Self {
            config,
            identities,
            source,
            dest,
            assets,
            repo_id: OnceCell::new(),
        }
    }

    /// Executes the full migration flow.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] only for failures before per-issue
    /// processing starts; per-issue outcomes land in the summary.
    pub async fn run(&self) -> Result<RunSummary, RunnerError> {
        let mut summary = RunSummary::new(self.config.dry_run);
        let exclusions = self.config.exclusion_set();

        info!(
            labels = ?self.config.label_filter,
            exclusions = ?exclusions,
            "Fetching migration candidates"
        );
        let issues = self
            .source
            .issues_by_label(&self.config.label_filter, &exclusions)
            .await?;

        if issues.is_empty() {
            warn!(
                labels = ?self.config.label_filter,
                exclusions = ?exclusions,
                "No issues were returned from the source"
            );
            return Ok(summary);
        }
        info!(count = issues.len(), "Recovered issues to be migrated");

        match self.repo_id().await {
            Ok(id) => debug!(repo_id = %id, "Resolved source repository"),
            Err(e) => warn!(error = %e, "Could not resolve source repository id"),
        }

        // Mapping phase: build every mapping before creating anything.
        let mut mappings = Vec::new();
        for issue in &issues {
            info!(url = %issue.html_url, title = %issue.title, "Building mapping");
            match self.build_mapping(issue).await {
                Ok(mapping) => {
                    summary.issues_mapped += 1;
                    mappings.push(mapping);
                }
                Err(e) => {
                    error!(url = %issue.html_url, error = %e, "Failed to map issue");
                    summary.record(&MigrationResult::Failed {
                        source_url: issue.html_url.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        // Creation phase: one issue fully migrated before the next.
        for mapping in mappings {
            let result = self.process_mapping(mapping).await;
            summary.record(&result);
        }

        Ok(summary)
    }

    /// The cached repository identifier, fetched on first access.
    async fn repo_id(&self) -> Result<&String, RunnerError> {
        Ok(self
            .repo_id
            .get_or_try_init(|| self.source.repo_id())
            .await?)
    }

    /// Maps an issue and its comments into a [`MigrationMapping`].
    async fn build_mapping(&self, issue: &SourceIssue) -> Result<MigrationMapping, RunnerError> {
        let no_close = label_no_close(self.config.no_close_labels.clone());
        let mapped = map_issue(issue, &self.identities, &no_close, self.assets.as_ref()).await;

        let comments = self.source.issue_comments(issue.number).await?;
        let mut attachments = mapped.attachments;
        let mut comment_payloads = Vec::with_capacity(comments.len());
        for comment in &comments {
            let (payload, refs) = map_comment(comment, self.assets.as_ref()).await;
            comment_payloads.push(payload);
            attachments.extend(refs);
        }

        Ok(MigrationMapping {
            issue_number: issue.number,
            source_url: issue.html_url.clone(),
            payload: mapped.payload,
            comments: comment_payloads,
            attachments,
            can_close: mapped.can_close,
        })
    }

    /// Runs the creation phase for one mapping.
    async fn process_mapping(&self, mut mapping: MigrationMapping) -> MigrationResult {
        let span = info_span!("migrate", source = %mapping.source_url);

        async {
            mapping
                .payload
                .description
                .push_str(&backlink_footer(&mapping.source_url));

            if self.config.dry_run {
                self.print_dry_run_preview(&mapping);
                return MigrationResult::Planned {
                    source_url: mapping.source_url,
                };
            }

            if self.config.check_duplicates {
                match self.dest.find_linked_issues(&mapping.source_url).await {
                    Ok(keys) if !keys.is_empty() => {
                        info!(keys = ?keys, "Destination issue already linked, skipping");
                        return MigrationResult::SkippedDuplicate {
                            source_url: mapping.source_url,
                            keys,
                        };
                    }
                    Ok(_) => {}
                    Err(e) => {
                        error!(error = %e, "Duplicate check failed");
                        return MigrationResult::Failed {
                            source_url: mapping.source_url,
                            error: format!("duplicate check failed: {e}"),
                        };
                    }
                }
            }

            info!("Creating destination issue");
            let response = match self.dest.create_issue(&mapping.payload).await {
                Ok(response) => response,
                Err(e) => {
                    error!(error = %e, "Failed to create destination issue");
                    return MigrationResult::Failed {
                        source_url: mapping.source_url,
                        error: e.to_string(),
                    };
                }
            };

            let Some(key) = response.key.filter(|key| !key.is_empty()) else {
                error!("No issue key was returned in the creation response");
                return MigrationResult::Failed {
                    source_url: mapping.source_url,
                    error: "no issue key returned in the creation response".to_string(),
                };
            };
            info!(key = %key, "Destination issue created");

            // Every attachment is uploaded before any comment: comment
            // bodies embed the rehosted filenames.
            for attachment in &mapping.attachments {
                match self
                    .dest
                    .add_attachment(&key, &attachment.local_path)
                    .await
                {
                    Ok(Some(stored)) => debug!(filename = %stored, "Attachment uploaded"),
                    Ok(None) => warn!(
                        path = %attachment.local_path.display(),
                        "Attachment upload returned no filename"
                    ),
                    Err(e) => warn!(
                        path = %attachment.local_path.display(),
                        error = %e,
                        "Failed to upload attachment"
                    ),
                }
            }

            for comment in &mapping.comments {
                if let Err(e) = self.dest.add_comment(&key, comment).await {
                    warn!(error = %e, "Failed to add comment");
                }
            }

            let browse_url = self.dest.browse_url(&key);
            let cross_link = format!("This issue has been migrated to Jira: {browse_url}");
            if let Err(e) = self
                .source
                .add_comment(mapping.issue_number, &cross_link)
                .await
            {
                warn!(error = %e, "Failed to add cross-link comment on the source issue");
            }

            let completion_label = if mapping.can_close {
                &self.config.completion_label
            } else {
                self.config
                    .squad_completion_label
                    .as_ref()
                    .unwrap_or(&self.config.completion_label)
            };
            if let Err(e) = self
                .source
                .add_label(mapping.issue_number, completion_label)
                .await
            {
                warn!(error = %e, "Failed to add completion label");
            }

            if mapping.can_close {
                if let Err(e) = self.source.close_issue(mapping.issue_number).await {
                    warn!(error = %e, "Failed to close source issue");
                }
            }

            MigrationResult::Migrated {
                source_url: mapping.source_url,
                key,
            }
        }
        .instrument(span)
        .await
    }

    fn print_dry_run_preview(&self, mapping: &MigrationMapping) {
        println!("\n[DRY RUN] {}", mapping.source_url);
        println!(
            "  Would create: [{}] {} (priority {})",
            mapping.payload.issue_type.name, mapping.payload.summary, mapping.payload.priority.name
        );
        if !mapping.payload.components.is_empty() {
            let names: Vec<&str> = mapping
                .payload
                .components
                .iter()
                .map(|component| component.name.as_str())
                .collect();
            println!("  Components: {}", names.join(", "));
        }
        println!(
            "  Comments: {}, attachments: {}, closeable: {}",
            mapping.comments.len(),
            mapping.attachments.len(),
            mapping.can_close
        );

        for line in mapping.payload.description.lines().take(10) {
            println!("    {line}");
        }
        if mapping.payload.description.lines().count() > 10 {
            println!("    ...");
        }
    }
}

/// Footer recording the source origin, appended to the description.
fn backlink_footer(source_url: &str) -> String {
    format!("\n\n---\nℹ️  This issue was migrated from GitHub issue {source_url}\n---")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backlink_footer_names_the_source_url() {
        let footer = backlink_footer("https://github.com/o/r/issues/3");
        assert!(footer.contains("migrated from GitHub issue https://github.com/o/r/issues/3"));
        assert!(footer.starts_with("\n\n---\n"));
    }
}
