//! engine::runner
//!
//! The analysis runner - the single entry point for classifying a project.
//!
//! # Concurrency
//!
//! Issue details are fetched through a bounded stream of futures
//! (`StreamExt::buffered`). At most `workers` requests are in flight, and
//! `buffered` yields results in input order, so no re-sorting is needed
//! afterwards. Classification itself is synchronous and pure.

use futures::stream::{self, StreamExt, TryStreamExt};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::core::classify::{classify, ClassificationResult};
use crate::core::event::HistoryError;
use crate::core::history::IssueHistory;
use crate::core::types::IssueKey;
use crate::report::Summary;
use crate::tracker::{IssueTracker, TrackerError};

/// Errors from an analysis run.
#[derive(Debug, Error)]
pub enum RunError {
    /// The request itself is unusable.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Counting or searching issues failed.
    #[error("issue search failed: {0}")]
    Search(#[source] TrackerError),

    /// Fetching one issue failed.
    #[error("failed to fetch {key}: {source}")]
    Fetch {
        key: String,
        #[source]
        source: TrackerError,
    },

    /// An issue's records could not be turned into a history.
    #[error(transparent)]
    History(#[from] HistoryError),
}

/// What to analyze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    /// Project key, e.g. "CORE".
    pub project: String,
    /// The user whose work is audited.
    pub target_user: String,
    /// Analyze at most this many issues.
    pub limit: Option<u64>,
}

impl AnalysisRequest {
    pub fn new(project: impl Into<String>, target_user: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            target_user: target_user.into(),
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    fn validate(&self) -> Result<(), RunError> {
        if self.project.trim().is_empty() {
            return Err(RunError::InvalidRequest("project cannot be empty".into()));
        }
        if self.target_user.trim().is_empty() {
            return Err(RunError::InvalidRequest("target user cannot be empty".into()));
        }
        Ok(())
    }
}

/// The outcome of one run.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub project: String,
    pub target_user: String,
    /// One result per issue, in search order.
    pub results: Vec<ClassificationResult>,
    pub summary: Summary,
}

/// Fetch one issue and assemble its history.
pub async fn fetch_history(
    tracker: &dyn IssueTracker,
    key: &IssueKey,
) -> Result<IssueHistory, RunError> {
    debug!(key = %key, "fetching issue");
    let raw = tracker
        .fetch_issue_detail(key)
        .await
        .map_err(|source| RunError::Fetch {
            key: key.to_string(),
            source,
        })?;

    let history = IssueHistory::assemble(&raw)?;
    debug!(key = %key, events = history.len(), "assembled history");
    Ok(history)
}

/// Run a full analysis.
///
/// # Arguments
///
/// * `tracker` - Where issues come from
/// * `request` - Project, target user and optional limit
/// * `workers` - Maximum concurrent issue fetches (values below 1 count as 1)
///
/// # Errors
///
/// The first tracker or history error aborts the run; no partial results are
/// returned.
pub async fn analyze(
    tracker: &dyn IssueTracker,
    request: &AnalysisRequest,
    workers: usize,
) -> Result<Analysis, RunError> {
    request.validate()?;

    let total = tracker
        .count_issues(&request.project, &request.target_user)
        .await
        .map_err(RunError::Search)?;
    let wanted = request.limit.map_or(total, |limit| total.min(limit));
    info!(
        tracker = tracker.name(),
        project = %request.project,
        target_user = %request.target_user,
        total,
        wanted,
        "issue search"
    );

    let keys = if wanted == 0 {
        Vec::new()
    } else {
        tracker
            .search_issues(&request.project, &request.target_user, wanted)
            .await
            .map_err(RunError::Search)?
    };

    let histories: Vec<IssueHistory> = stream::iter(keys.iter())
        .map(|key| fetch_history(tracker, key))
        .buffered(workers.max(1))
        .try_collect()
        .await?;

    let results: Vec<ClassificationResult> = keys
        .iter()
        .zip(&histories)
        .map(|(key, history)| {
            classify(&request.target_user, history).with_url(tracker.browse_url(key))
        })
        .collect();

    let summary = Summary::from_results(&results);
    info!(
        total = summary.total,
        returned = summary.returned_from_testing,
        reopened = summary.reopened_from_production,
        "analysis complete"
    );

    Ok(Analysis {
        project: request.project.clone(),
        target_user: request.target_user.clone(),
        results,
        summary,
    })
}

/// Sort results by natural issue-key order (`P-9` before `P-10`).
///
/// Keys that fail to parse sort first, by their raw text.
pub fn sort_results_by_key(results: &mut [ClassificationResult]) {
    results.sort_by_cached_key(|r| (IssueKey::new(r.issue_key.clone()).ok(), r.issue_key.clone()));
}
