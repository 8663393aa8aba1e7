//! core::history
//!
//! Assembles the ordered event history of one issue.
//!
//! Changelog events come first (in changelog order), then comment events (in
//! comment order); the combined list is then stably sorted by timestamp, so
//! events sharing a timestamp keep that retrieval order. Nothing is
//! deduplicated.

use serde::Serialize;

use super::event::{event_from_comment, events_from_history, Event, HistoryError};
use super::raw::RawIssue;

/// The time-ordered events of one issue.
///
/// Built once by [`IssueHistory::assemble`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueHistory {
    issue: String,
    events: Vec<Event>,
}

impl IssueHistory {
    /// Build the history of a raw issue.
    ///
    /// # Errors
    ///
    /// Propagates the first [`HistoryError`] hit while normalizing records.
    pub fn assemble(raw: &RawIssue) -> Result<Self, HistoryError> {
        let mut events = Vec::new();

        for history in &raw.changelog.histories {
            events.extend(events_from_history(&raw.key, history)?);
        }
        for comment in &raw.comments {
            events.push(event_from_comment(&raw.key, comment)?);
        }

        Ok(Self::from_events(raw.key.clone(), events))
    }

    /// Build a history from already-normalized events.
    ///
    /// Events are sorted by timestamp; the sort is stable.
    pub fn from_events(issue: impl Into<String>, mut events: Vec<Event>) -> Self {
        events.sort_by_key(|e| e.timestamp);
        Self {
            issue: issue.into(),
            events,
        }
    }

    /// The issue this history belongs to.
    pub fn issue(&self) -> &str {
        &self.issue
    }

    /// Events in timestamp order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
