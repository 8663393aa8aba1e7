//! tracker::jira
//!
//! Jira implementation of [`IssueTracker`] over REST API v2.
//!
//! # Endpoints
//!
//! - `GET /rest/api/2/search?jql=..&maxResults=0` for the total count
//! - `GET /rest/api/2/search?jql=..&startAt=..&maxResults=..` for the keys
//! - `GET /rest/api/2/issue/<key>?expand=changelog` for the changelog
//! - `GET /rest/api/2/issue/<key>/comment` for the comments
//!
//! # Authentication
//!
//! HTTP basic auth on every request. The password is held in memory only and
//! never printed; see the `Debug` impl.
//!
//! # Rate Limiting
//!
//! A 429 maps to `TrackerError::RateLimited`. There is no automatic retry.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tracing::debug;

use super::traits::{IssueTracker, TrackerError};
use crate::core::raw::{RawChangelog, RawComment, RawIssue};
use crate::core::types::IssueKey;

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = "jiratrack";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Jira tracker.
pub struct JiraTracker {
    /// HTTP client for making requests
    client: Client,
    /// Base URL without a trailing slash
    host: String,
    username: String,
    password: String,
}

// Custom Debug to avoid exposing the password
impl std::fmt::Debug for JiraTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraTracker")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("has_password", &!self.password.is_empty())
            .finish()
    }
}

impl JiraTracker {
    /// Create a tracker for `host` authenticating as `username`.
    ///
    /// # Arguments
    ///
    /// * `host` - Base URL, e.g. `https://jira.example.com` (a trailing slash is stripped)
    /// * `username` - Login name
    /// * `password` - Password or API token
    /// * `timeout` - Per-request timeout
    ///
    /// # Errors
    ///
    /// `NetworkError` if the HTTP client cannot be built.
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TrackerError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TrackerError::NetworkError(e.to_string()))?;

        Ok(Self {
            client,
            host: host.into().trim_end_matches('/').to_string(),
            username: username.into(),
            password: password.into(),
        })
    }

    /// Get the base URL.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Get the login name.
    pub fn username(&self) -> &str {
        &self.username
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/rest/api/2/{}", self.host, path)
    }

    /// Issue an authenticated GET and decode the JSON body.
    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, TrackerError> {
        debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .basic_auth(&self.username, Some(&self.password))
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .header(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE))
            .query(query)
            .send()
            .await
            .map_err(map_transport_error)?;

        self.handle_response(response).await
    }

    /// Handle an API response, mapping status codes to errors.
    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: Response,
    ) -> Result<T, TrackerError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| TrackerError::InvalidResponse(format!("failed to parse response: {}", e)))
        } else {
            self.handle_error_response(response, status).await
        }
    }

    /// Handle an error response from the API.
    async fn handle_error_response<T>(
        &self,
        response: Response,
        status: StatusCode,
    ) -> Result<T, TrackerError> {
        let message = match response.json::<JiraErrorResponse>().await {
            Ok(err) => err.message(),
            Err(_) => "Unknown error".to_string(),
        };

        Err(match status {
            StatusCode::UNAUTHORIZED => {
                TrackerError::AuthFailed("invalid username or password".into())
            }
            StatusCode::FORBIDDEN => TrackerError::AuthFailed(format!("permission denied: {}", message)),
            StatusCode::NOT_FOUND => TrackerError::NotFound(message),
            StatusCode::TOO_MANY_REQUESTS => TrackerError::RateLimited,
            _ if status.is_server_error() => TrackerError::ApiError {
                status: status.as_u16(),
                message: format!("Jira server error: {}", message),
            },
            _ => TrackerError::ApiError {
                status: status.as_u16(),
                message,
            },
        })
    }
}

fn map_transport_error(e: reqwest::Error) -> TrackerError {
    if e.is_timeout() {
        TrackerError::NetworkError(format!("request timed out: {}", e))
    } else {
        TrackerError::NetworkError(e.to_string())
    }
}

/// Build the JQL selecting issues of `project` ever assigned to `assignee`.
///
/// ```
/// use jiratrack::tracker::jira::build_assignee_jql;
///
/// assert_eq!(build_assignee_jql("CORE", "alice"), "project = CORE AND assignee was alice");
/// assert_eq!(
///     build_assignee_jql("CORE", "j.doe"),
///     "project = CORE AND assignee was \"j.doe\""
/// );
/// ```
pub fn build_assignee_jql(project: &str, assignee: &str) -> String {
    format!(
        "project = {} AND assignee was {}",
        escape_jql_value(project),
        escape_jql_value(assignee)
    )
}

/// Quote a JQL value unless it is a plain identifier.
fn escape_jql_value(value: &str) -> String {
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        value.to_string()
    } else {
        format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
    }
}

// =============================================================================
// API response types
// =============================================================================

#[derive(Debug, Deserialize)]
struct SearchResponse {
    total: u64,
    #[serde(default)]
    issues: Vec<SearchIssue>,
}

#[derive(Debug, Deserialize)]
struct SearchIssue {
    key: String,
}

#[derive(Debug, Deserialize)]
struct IssueResponse {
    key: String,
    #[serde(default)]
    changelog: RawChangelog,
}

#[derive(Debug, Deserialize)]
struct CommentsResponse {
    #[serde(default)]
    comments: Vec<RawComment>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JiraErrorResponse {
    #[serde(default)]
    error_messages: Vec<String>,
    #[serde(default)]
    errors: std::collections::BTreeMap<String, String>,
}

impl JiraErrorResponse {
    fn message(self) -> String {
        let mut parts = self.error_messages;
        parts.extend(self.errors.into_iter().map(|(k, v)| format!("{}: {}", k, v)));
        if parts.is_empty() {
            "Unknown error".to_string()
        } else {
            parts.join("; ")
        }
    }
}

#[async_trait]
impl IssueTracker for JiraTracker {
    fn name(&self) -> &'static str {
        "jira"
    }

    fn browse_url(&self, key: &IssueKey) -> String {
        format!("{}/browse/{}", self.host, key)
    }

    async fn count_issues(&self, project: &str, assignee: &str) -> Result<u64, TrackerError> {
        let query = [
            ("jql", build_assignee_jql(project, assignee)),
            ("maxResults", "0".to_string()),
        ];
        let response: SearchResponse = self.get_json(&self.api_url("search"), &query).await?;
        Ok(response.total)
    }

    async fn search_issues(
        &self,
        project: &str,
        assignee: &str,
        max_results: u64,
    ) -> Result<Vec<IssueKey>, TrackerError> {
        let jql = build_assignee_jql(project, assignee);
        let url = self.api_url("search");
        let mut keys = Vec::new();

        // The server may cap the page size below what was asked for.
        while (keys.len() as u64) < max_results {
            let query = [
                ("jql", jql.clone()),
                ("startAt", keys.len().to_string()),
                ("maxResults", (max_results - keys.len() as u64).to_string()),
            ];
            let page: SearchResponse = self.get_json(&url, &query).await?;
            if page.issues.is_empty() {
                break;
            }
            for issue in page.issues {
                let key = IssueKey::new(issue.key)
                    .map_err(|e| TrackerError::InvalidResponse(e.to_string()))?;
                keys.push(key);
            }
        }

        keys.truncate(max_results as usize);
        Ok(keys)
    }

    async fn fetch_issue_detail(&self, key: &IssueKey) -> Result<RawIssue, TrackerError> {
        let issue_url = self.api_url(&format!("issue/{}", key));
        let issue: IssueResponse = self
            .get_json(&issue_url, &[("expand", "changelog".to_string())])
            .await?;

        let comments_url = format!("{}/comment", issue_url);
        let comments: CommentsResponse = self.get_json(&comments_url, &[]).await?;

        Ok(RawIssue {
            key: issue.key,
            changelog: issue.changelog,
            comments: comments.comments,
        })
    }
}
