//! core::classify
//!
//! Classifies one issue history against the work-tracking policy.
//!
//! # State machine
//!
//! The classifier folds the ordered events of one issue into a small
//! accumulator of flags. Only status changes and comments made by the
//! *target user* move the work flags; closing is tracked for everyone.
//!
//! | event (target user only unless noted)      | effect                                          |
//! |--------------------------------------------|-------------------------------------------------|
//! | comment line `/tag value`                  | annotation `tag = value` (last write wins)      |
//! | status contains "in progress"/"разработка" | first time: `got`; later: return/reopen signals |
//! | status contains "test backlog"             | `got` and `done_for_testing`                    |
//! | any author: see [`closes_issue`]           | `closed` (never cleared)                        |
//!
//! An issue is still open when `closed` was never set.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use super::event::Event;
use super::history::IssueHistory;

/// Status substrings meaning "development is in progress".
pub const IN_PROGRESS_MARKERS: &[&str] = &["in progress", "разработка"];

/// Status substring meaning "handed over to testing".
pub const TEST_BACKLOG_MARKER: &str = "test backlog";

/// Status substring meaning "closed".
pub const CLOSED_MARKER: &str = "closed";

/// Value substring meaning "resolved".
pub const RESOLVED_MARKER: &str = "resolved";

/// Classification of one issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    /// Issue identifier.
    pub issue_key: String,
    /// Browse URL, once the tracker has supplied one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// The issue never reached a closed/resolved state.
    pub still_open: bool,
    /// Work went back into development after being handed to testing.
    pub returned_from_testing: bool,
    /// Work went back into development after the issue was closed.
    pub reopened_from_production: bool,
    /// Annotations from the target user's comments, tag to value.
    pub custom_fields: BTreeMap<String, String>,
    /// Earliest "work started" or annotation signal from the target user.
    pub first_annotation_time: Option<DateTime<FixedOffset>>,
}

impl ClassificationResult {
    /// Attach the browse URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// What to show for this issue: the browse URL, or the key without one.
    pub fn link(&self) -> &str {
        self.url.as_deref().unwrap_or(&self.issue_key)
    }
}

/// Flags accumulated while scanning one history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ScanState {
    got: bool,
    done_for_testing: bool,
    closed: bool,
    returned_from_testing: bool,
    reopened_from_production: bool,
    custom_fields: BTreeMap<String, String>,
    first_signal: Option<DateTime<FixedOffset>>,
}

impl ScanState {
    fn step(mut self, target_user: &str, event: &Event) -> Self {
        if event.author == target_user {
            if event.is_comment() {
                for (tag, value) in annotations(&event.value) {
                    self.custom_fields.insert(tag.to_string(), value.to_string());
                    self.mark_signal(event);
                }
            }

            if event.is_status() && is_in_progress(&event.value) {
                self.mark_signal(event);
                if self.got {
                    if self.done_for_testing {
                        self.returned_from_testing = true;
                    }
                    if self.closed {
                        self.reopened_from_production = true;
                    }
                } else {
                    self.got = true;
                }
            }

            if event.is_status() && event.value.contains(TEST_BACKLOG_MARKER) {
                self.got = true;
                self.done_for_testing = true;
            }
        }

        if closes_issue(self.got, event) {
            self.closed = true;
        }

        self
    }

    fn mark_signal(&mut self, event: &Event) {
        if self.first_signal.is_none() {
            self.first_signal = Some(event.timestamp);
        }
    }
}

/// Whether a status value means development is in progress.
pub fn is_in_progress(value: &str) -> bool {
    IN_PROGRESS_MARKERS.iter().any(|m| value.contains(m))
}

/// Whether an event marks the issue as closed.
///
/// The rule is `(got AND status AND contains "closed") OR contains "resolved"`.
/// The "resolved" branch is ungated: any event whose value contains
/// "resolved" closes the issue, whoever wrote it and whatever the field,
/// comments included.
pub fn closes_issue(got: bool, event: &Event) -> bool {
    (got && event.is_status() && event.value.contains(CLOSED_MARKER))
        || event.value.contains(RESOLVED_MARKER)
}

/// Extract the `/tag value` annotations of a comment body, in line order.
///
/// A line qualifies when it is longer than two characters, starts with `/`
/// and contains a space. The tag is everything between the slash and the
/// first space, the value everything after it. Lines with an empty value are
/// skipped.
///
/// ```
/// use jiratrack::core::classify::annotations;
///
/// let found = annotations("/priority high\nplain text\n/eta ");
/// assert_eq!(found, vec![("priority", "high")]);
/// ```
pub fn annotations(body: &str) -> Vec<(&str, &str)> {
    body.split(is_line_break)
        .filter_map(parse_annotation)
        .collect()
}

/// Line boundaries: `\n`, a lone `\r`, and the Unicode line and paragraph
/// separators. `\r\n` yields an empty piece in between, which never
/// qualifies as an annotation.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

fn parse_annotation(line: &str) -> Option<(&str, &str)> {
    if line.chars().count() <= 2 {
        return None;
    }
    let rest = line.strip_prefix('/')?;
    let (tag, value) = rest.split_once(' ')?;
    if value.is_empty() {
        return None;
    }
    Some((tag, value))
}

/// Classify one issue history for `target_user`.
///
/// This is a pure fold over the events; it keeps no state between issues.
pub fn classify(target_user: &str, history: &IssueHistory) -> ClassificationResult {
    let state = history
        .events()
        .iter()
        .fold(ScanState::default(), |state, event| {
            state.step(target_user, event)
        });

    ClassificationResult {
        issue_key: history.issue().to_string(),
        url: None,
        still_open: !state.closed,
        returned_from_testing: state.returned_from_testing,
        reopened_from_production: state.reopened_from_production,
        custom_fields: state.custom_fields,
        first_annotation_time: state.first_signal,
    }
}
