//! tracker::mock
//!
//! Mock tracker implementation for deterministic testing.
//!
//! # Design
//!
//! The mock keeps issues in memory, in insertion order, and answers every
//! search with all of them regardless of project or assignee. Failures can be
//! injected per operation, and every call is recorded.
//!
//! # Example
//!
//! ```
//! use jiratrack::core::raw::RawIssue;
//! use jiratrack::core::types::IssueKey;
//! use jiratrack::tracker::mock::MockTracker;
//! use jiratrack::tracker::IssueTracker;
//!
//! # tokio_test::block_on(async {
//! let tracker = MockTracker::with_issues(vec![RawIssue {
//!     key: "CORE-1".to_string(),
//!     ..Default::default()
//! }]);
//!
//! assert_eq!(tracker.count_issues("CORE", "alice").await.unwrap(), 1);
//! let key = IssueKey::new("CORE-1").unwrap();
//! let issue = tracker.fetch_issue_detail(&key).await.unwrap();
//! assert_eq!(issue.key, "CORE-1");
//! # });
//! ```

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::traits::{IssueTracker, TrackerError};
use crate::core::raw::RawIssue;
use crate::core::types::IssueKey;

/// Base URL used for browse links.
pub const MOCK_HOST: &str = "https://jira.mock";

/// Mock tracker for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping.
#[derive(Debug, Clone)]
pub struct MockTracker {
    inner: Arc<Mutex<MockTrackerInner>>,
}

#[derive(Debug, Default)]
struct MockTrackerInner {
    /// Stored issues, in search order.
    issues: Vec<RawIssue>,
    /// Method to fail on (for testing error paths).
    fail_on: Option<FailOn>,
    /// Recorded operations for verification.
    operations: Vec<MockOperation>,
}

/// Configuration for which operation should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail count_issues with the given error.
    CountIssues(TrackerError),
    /// Fail search_issues with the given error.
    SearchIssues(TrackerError),
    /// Fail fetch_issue_detail for one key with the given error.
    FetchIssue(String, TrackerError),
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    CountIssues {
        project: String,
        assignee: String,
    },
    SearchIssues {
        project: String,
        assignee: String,
        max_results: u64,
    },
    FetchIssue {
        key: String,
    },
}

impl MockTracker {
    /// Create a new empty mock tracker.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockTrackerInner::default())),
        }
    }

    /// Create a mock tracker holding `issues`.
    pub fn with_issues(issues: Vec<RawIssue>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockTrackerInner {
                issues,
                ..Default::default()
            })),
        }
    }

    /// Configure the mock to fail on a specific operation.
    ///
    /// # Example
    ///
    /// ```
    /// use jiratrack::tracker::mock::{MockTracker, FailOn};
    /// use jiratrack::tracker::TrackerError;
    ///
    /// let tracker = MockTracker::new()
    ///     .fail_on(FailOn::CountIssues(TrackerError::RateLimited));
    /// ```
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.fail_on = Some(fail_on);
        }
        self
    }

    /// Clear the failure configuration.
    pub fn clear_fail_on(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_on = None;
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<MockOperation> {
        let inner = self.inner.lock().unwrap();
        inner.operations.clone()
    }

    /// Number of issue detail fetches made so far.
    pub fn fetch_count(&self) -> usize {
        self.operations()
            .iter()
            .filter(|op| matches!(op, MockOperation::FetchIssue { .. }))
            .count()
    }

    fn record(&self, op: MockOperation) {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(op);
    }

    fn check_fail(&self, expected: &str, key: Option<&str>) -> Option<TrackerError> {
        let inner = self.inner.lock().unwrap();
        match &inner.fail_on {
            Some(FailOn::CountIssues(e)) if expected == "count_issues" => Some(e.clone()),
            Some(FailOn::SearchIssues(e)) if expected == "search_issues" => Some(e.clone()),
            Some(FailOn::FetchIssue(k, e))
                if expected == "fetch_issue_detail" && key == Some(k.as_str()) =>
            {
                Some(e.clone())
            }
            _ => None,
        }
    }
}

impl Default for MockTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IssueTracker for MockTracker {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn browse_url(&self, key: &IssueKey) -> String {
        format!("{}/browse/{}", MOCK_HOST, key)
    }

    async fn count_issues(&self, project: &str, assignee: &str) -> Result<u64, TrackerError> {
        self.record(MockOperation::CountIssues {
            project: project.to_string(),
            assignee: assignee.to_string(),
        });

        if let Some(e) = self.check_fail("count_issues", None) {
            return Err(e);
        }

        let inner = self.inner.lock().unwrap();
        Ok(inner.issues.len() as u64)
    }

    async fn search_issues(
        &self,
        project: &str,
        assignee: &str,
        max_results: u64,
    ) -> Result<Vec<IssueKey>, TrackerError> {
        self.record(MockOperation::SearchIssues {
            project: project.to_string(),
            assignee: assignee.to_string(),
            max_results,
        });

        if let Some(e) = self.check_fail("search_issues", None) {
            return Err(e);
        }

        let inner = self.inner.lock().unwrap();
        inner
            .issues
            .iter()
            .take(max_results as usize)
            .map(|issue| {
                IssueKey::new(issue.key.clone())
                    .map_err(|e| TrackerError::InvalidResponse(e.to_string()))
            })
            .collect()
    }

    async fn fetch_issue_detail(&self, key: &IssueKey) -> Result<RawIssue, TrackerError> {
        self.record(MockOperation::FetchIssue {
            key: key.to_string(),
        });

        if let Some(e) = self.check_fail("fetch_issue_detail", Some(key.as_str())) {
            return Err(e);
        }

        let inner = self.inner.lock().unwrap();
        inner
            .issues
            .iter()
            .find(|issue| issue.key == key.as_str())
            .cloned()
            .ok_or_else(|| TrackerError::NotFound(key.to_string()))
    }
}
