//! tracker::traits
//!
//! Issue tracker trait definition for talking to the remote ticketing service.
//!
//! # Design
//!
//! The `IssueTracker` trait is async because every operation is network I/O.
//! It exposes exactly the three reads the analysis needs: count the matching
//! issues, list their keys, and fetch one issue's changelog and comments.
//!
//! # Example
//!
//! ```ignore
//! use jiratrack::tracker::{IssueTracker, TrackerError};
//!
//! async fn keys(tracker: &dyn IssueTracker) -> Result<(), TrackerError> {
//!     let total = tracker.count_issues("CORE", "alice").await?;
//!     let keys = tracker.search_issues("CORE", "alice", total).await?;
//!     for key in keys {
//!         println!("{}", tracker.browse_url(&key));
//!     }
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use thiserror::Error;

use crate::core::raw::RawIssue;
use crate::core::types::IssueKey;

/// Errors from tracker operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TrackerError {
    /// Credentials were rejected (or lack permission).
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded.
    #[error("rate limited")]
    RateLimited,

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Network or connection error, including timeouts.
    #[error("network error: {0}")]
    NetworkError(String),

    /// A successful response whose body did not have the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// The trait for reading issues from a ticketing service.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the runner fetches several issues
/// concurrently through one shared tracker.
///
/// # Error Handling
///
/// All methods return `Result<T, TrackerError>`. Nothing is retried here.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Get the tracker name (e.g. "jira").
    fn name(&self) -> &'static str;

    /// Web URL a person opens to view the issue.
    fn browse_url(&self, key: &IssueKey) -> String;

    /// Count the issues of `project` that were ever assigned to `assignee`.
    async fn count_issues(&self, project: &str, assignee: &str) -> Result<u64, TrackerError>;

    /// List up to `max_results` keys of the issues of `project` that were ever
    /// assigned to `assignee`, in the tracker's order.
    ///
    /// # Errors
    ///
    /// - `InvalidResponse` if a returned key is not a valid issue key
    async fn search_issues(
        &self,
        project: &str,
        assignee: &str,
        max_results: u64,
    ) -> Result<Vec<IssueKey>, TrackerError>;

    /// Fetch one issue with its full changelog and all comments.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the issue doesn't exist or is not visible
    async fn fetch_issue_detail(&self, key: &IssueKey) -> Result<RawIssue, TrackerError>;
}
