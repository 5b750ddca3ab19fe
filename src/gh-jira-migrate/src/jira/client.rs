//! Reqwest-backed Jira REST client.

use crate::jira::{CommentPayload, CreateIssueResponse, DestHost, IssuePayload, JiraError};
use serde::ser::Error as _;
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::Path;
use tracing::{debug, info, warn};

/// Connection settings for the destination Jira instance.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct JiraSettings {
    /// Instance root, e.g. `https://example.atlassian.net`.
    pub base_url: String,

    /// Project key new issues are created under, e.g. `WAL`.
    pub project_key: String,

    /// Security level applied to issues and comment visibility.
    /// Optional; when absent no restriction is sent.
    #[serde(default)]
    pub security_level: Option<String>,

    /// Custom field id storing the source issue URL,
    /// e.g. `customfield_12316846`.
    pub source_link_field: String,
}

/// Jira REST client authenticating with a bearer token.
pub struct JiraClient {
    client: reqwest::Client,
    settings: JiraSettings,
    token: String,
}

impl JiraClient {
    /// Creates a client for the given instance settings and API token.
    pub fn new(settings: JiraSettings, token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            settings,
            token,
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/rest/api/latest{}", self.settings.base_url, path)
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.header("Authorization", format!("Bearer {}", self.token))
    }

    /// Builds the `fields` object for issue creation: the mapped payload
    /// plus project key, optional security level, and the source link
    /// under the configured custom field id.
    fn creation_fields(&self, payload: &IssuePayload) -> Result<Value, JiraError> {
        // A struct payload always serializes to a JSON object.
        let Value::Object(mut map) = serde_json::to_value(payload)? else {
            return Err(JiraError::Serialize(serde_json::Error::custom(
                "issue payload must serialize to an object",
            )));
        };

        map.insert(
            "project".to_string(),
            json!({ "key": self.settings.project_key }),
        );
        if let Some(level) = &self.settings.security_level {
            map.insert("security".to_string(), json!({ "name": level }));
        }
        map.insert(
            self.settings.source_link_field.clone(),
            Value::String(payload.source_url.clone()),
        );

        Ok(Value::Object(map))
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, JiraError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(JiraError::UnexpectedStatus {
            status: status.as_u16(),
            body,
        })
    }
}

#[derive(Debug, Deserialize)]
struct AttachmentResponse {
    filename: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    issues: Vec<SearchIssue>,
}

#[derive(Debug, Deserialize)]
struct SearchIssue {
    key: String,
}

#[derive(Debug, Deserialize)]
struct TransitionsResponse {
    #[serde(default)]
    transitions: Vec<Transition>,
}

#[derive(Debug, Deserialize)]
struct Transition {
    id: String,
    name: String,
}

#[async_trait::async_trait]
impl DestHost for JiraClient {
    async fn create_issue(&self, payload: &IssuePayload) -> Result<CreateIssueResponse, JiraError> {
        info!(summary = %payload.summary, "Creating Jira issue");

        let fields = self.creation_fields(payload)?;
        let response = self
            .authed(self.client.post(self.api_url("/issue")))
            .json(&json!({ "fields": fields }))
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn add_attachment(&self, key: &str, path: &Path) -> Result<Option<String>, JiraError> {
        debug!(key, path = %path.display(), "Uploading attachment");

        let bytes = tokio::fs::read(path).await.map_err(|e| JiraError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "attachment".to_string());

        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename);
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .authed(
                self.client
                    .post(self.api_url(&format!("/issue/{key}/attachments"))),
            )
            .header("X-Atlassian-Token", "no-check")
            .multipart(form)
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        let stored: Vec<AttachmentResponse> = response.json().await?;
        Ok(stored.into_iter().next().map(|a| a.filename))
    }

    async fn add_comment(&self, key: &str, payload: &CommentPayload) -> Result<(), JiraError> {
        debug!(key, "Adding comment");

        let mut body = json!({ "body": payload.body });
        if let Some(level) = &self.settings.security_level {
            body["visibility"] = json!({ "type": "group", "value": level });
        }

        let response = self
            .authed(
                self.client
                    .post(self.api_url(&format!("/issue/{key}/comment"))),
            )
            .json(&body)
            .send()
            .await?;

        Self::check_status(response).await?;
        Ok(())
    }

    async fn find_linked_issues(&self, source_url: &str) -> Result<Vec<String>, JiraError> {
        // JQL addresses custom fields as cf[<numeric id>].
        let field_index = self
            .settings
            .source_link_field
            .split('_')
            .nth(1)
            .filter(|id| !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()))
            .ok_or_else(|| JiraError::InvalidLinkField {
                field: self.settings.source_link_field.clone(),
            })?;
        let jql = format!("cf[{field_index}] = \"{source_url}\"");
        debug!(jql = %jql, "Searching for linked issues");

        let response = self
            .authed(self.client.post(self.api_url("/search")))
            .json(&json!({ "jql": jql }))
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        let results: SearchResponse = response.json().await?;
        Ok(results.issues.into_iter().map(|issue| issue.key).collect())
    }

    async fn transition_issue(&self, key: &str, status_name: &str) -> Result<bool, JiraError> {
        let response = self
            .authed(
                self.client
                    .get(self.api_url(&format!("/issue/{key}/transitions"))),
            )
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        let available: TransitionsResponse = response.json().await?;

        let Some(transition) = available
            .transitions
            .into_iter()
            .find(|transition| transition.name == status_name)
        else {
            warn!(key, status_name, "No matching transition available");
            return Ok(false);
        };

        let response = self
            .authed(
                self.client
                    .post(self.api_url(&format!("/issue/{key}/transitions"))),
            )
            .json(&json!({ "transition": { "id": transition.id } }))
            .send()
            .await?;
        Self::check_status(response).await?;

        info!(key, status_name, "Issue transitioned");
        Ok(true)
    }

    fn browse_url(&self, key: &str) -> String {
        format!("{}/browse/{key}", self.settings.base_url)
    }
}
