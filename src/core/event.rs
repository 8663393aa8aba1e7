//! core::event
//!
//! Uniform event model for issue histories.
//!
//! # Design
//!
//! The tracker reports two unrelated record kinds: changelog entries (each
//! holding several changed fields) and comments. Both are normalized into
//! [`Event`], so the classifier sees a single timestamped stream.
//!
//! Changelog values are lowercased at this boundary; comment bodies are kept
//! verbatim because annotation tags are case-sensitive.
//!
//! A record missing something the classifier relies on (field name, author,
//! timestamp) is a [`HistoryError`]. These are never skipped: a silently
//! dropped status change would change the classification.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use thiserror::Error;

use super::raw::{RawComment, RawHistory, RawItem};

/// Field tag used for comment events.
pub const COMMENT_FIELD: &str = "comment";

/// Timestamp layout used by Jira Server (`2020-07-21T16:33:37.000+0300`).
const TRACKER_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// Data-integrity faults found while building a history.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HistoryError {
    /// A changelog item (or its enclosing entry) lacks a required part.
    #[error("malformed changelog item in {issue}: {reason}: {record}")]
    MalformedItem {
        issue: String,
        reason: &'static str,
        record: String,
    },

    /// A comment lacks a required part.
    #[error("malformed comment in {issue}: {reason}: {record}")]
    MalformedComment {
        issue: String,
        reason: &'static str,
        record: String,
    },

    /// A timestamp could not be parsed.
    #[error("unparseable timestamp '{value}' in {issue}")]
    BadTimestamp { issue: String, value: String },
}

/// One observed change on an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    /// When the change happened.
    pub timestamp: DateTime<FixedOffset>,
    /// Identity of the user who caused it.
    pub author: String,
    /// Lowercased changelog field name, or [`COMMENT_FIELD`].
    pub field: String,
    /// Lowercased new value, or the verbatim comment body.
    pub value: String,
}

impl Event {
    /// Whether this event is a comment.
    pub fn is_comment(&self) -> bool {
        self.field == COMMENT_FIELD
    }

    /// Whether this event is a status transition.
    pub fn is_status(&self) -> bool {
        self.field == "status"
    }
}

/// Parse a tracker timestamp.
///
/// Accepts RFC 3339 (`+03:00`, `Z`) as well as the colon-less offset Jira
/// Server emits (`+0300`). Fractional seconds are optional.
pub fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_str(value, TRACKER_TIMESTAMP_FORMAT))
        .ok()
}

/// Expand one changelog entry into one event per changed item.
///
/// Every event carries the entry's timestamp and author and the item's own
/// field name and new value.
///
/// # Errors
///
/// Returns [`HistoryError::MalformedItem`] for an item without a field name
/// or an entry without an author or timestamp, and
/// [`HistoryError::BadTimestamp`] when the entry's timestamp does not parse.
pub fn events_from_history(issue: &str, history: &RawHistory) -> Result<Vec<Event>, HistoryError> {
    let mut events = Vec::with_capacity(history.items.len());

    for item in &history.items {
        let field = item
            .field
            .as_deref()
            .ok_or_else(|| malformed_item(issue, "missing field name", item))?;
        let author = history
            .author
            .as_ref()
            .and_then(|a| a.identity())
            .ok_or_else(|| malformed_item(issue, "entry has no author", item))?;
        let created = history
            .created
            .as_deref()
            .ok_or_else(|| malformed_item(issue, "entry has no timestamp", item))?;
        let timestamp = parse_timestamp(created).ok_or_else(|| HistoryError::BadTimestamp {
            issue: issue.to_string(),
            value: created.to_string(),
        })?;

        events.push(Event {
            timestamp,
            author: author.to_string(),
            field: field.to_lowercase(),
            value: item.to_value.as_deref().unwrap_or_default().to_lowercase(),
        });
    }

    Ok(events)
}

/// Turn one comment into a single comment event.
///
/// # Errors
///
/// Returns [`HistoryError::MalformedComment`] for a comment without author,
/// timestamp or body, and [`HistoryError::BadTimestamp`] when the timestamp
/// does not parse.
pub fn event_from_comment(issue: &str, comment: &RawComment) -> Result<Event, HistoryError> {
    let author = comment
        .author
        .as_ref()
        .and_then(|a| a.identity())
        .ok_or_else(|| malformed_comment(issue, "missing author", comment))?;
    let created = comment
        .created
        .as_deref()
        .ok_or_else(|| malformed_comment(issue, "missing timestamp", comment))?;
    let body = comment
        .body
        .as_deref()
        .ok_or_else(|| malformed_comment(issue, "missing body", comment))?;
    let timestamp = parse_timestamp(created).ok_or_else(|| HistoryError::BadTimestamp {
        issue: issue.to_string(),
        value: created.to_string(),
    })?;

    Ok(Event {
        timestamp,
        author: author.to_string(),
        field: COMMENT_FIELD.to_string(),
        value: body.to_string(),
    })
}

fn malformed_item(issue: &str, reason: &'static str, item: &RawItem) -> HistoryError {
    HistoryError::MalformedItem {
        issue: issue.to_string(),
        reason,
        record: render_record(item),
    }
}

fn malformed_comment(issue: &str, reason: &'static str, comment: &RawComment) -> HistoryError {
    HistoryError::MalformedComment {
        issue: issue.to_string(),
        reason,
        record: render_record(comment),
    }
}

fn render_record<T: Serialize + std::fmt::Debug>(record: &T) -> String {
    serde_json::to_string(record).unwrap_or_else(|_| format!("{record:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::raw::RawUser;

    fn user(name: &str) -> Option<RawUser> {
        Some(RawUser {
            name: Some(name.to_string()),
            ..Default::default()
        })
    }

    fn item(field: &str, to: Option<&str>) -> RawItem {
        RawItem {
            field: Some(field.to_string()),
            from_value: None,
            to_value: to.map(str::to_string),
        }
    }

    mod timestamps {
        use super::*;

        #[test]
        fn jira_server_format() {
            let ts = parse_timestamp("2020-07-21T16:33:37.000+0300").unwrap();
            assert_eq!(ts.to_rfc3339(), "2020-07-21T16:33:37+03:00");
        }

        #[test]
        fn rfc3339_format() {
            assert!(parse_timestamp("2020-07-21T16:33:37.000+03:00").is_some());
            assert!(parse_timestamp("2020-07-21T13:33:37Z").is_some());
        }

        #[test]
        fn different_offsets_compare_as_instants() {
            let moscow = parse_timestamp("2020-07-21T16:33:37.000+0300").unwrap();
            let utc = parse_timestamp("2020-07-21T14:00:00.000+0000").unwrap();
            assert!(moscow < utc);
        }

        #[test]
        fn garbage_rejected() {
            assert!(parse_timestamp("yesterday").is_none());
            assert!(parse_timestamp("").is_none());
        }
    }

    mod changelog {
        use super::*;

        #[test]
        fn one_event_per_item() {
            let history = RawHistory {
                created: Some("2020-07-21T16:33:37.000+0300".into()),
                author: user("alice"),
                items: vec![
                    item("Status", Some("In Progress")),
                    item("timeoriginalestimate", Some("3600")),
                ],
            };

            let events = events_from_history("CORE-1", &history).unwrap();
            assert_eq!(events.len(), 2);
            assert!(events.iter().all(|e| e.author == "alice"));
            assert!(events.iter().all(|e| e.timestamp == events[0].timestamp));
            assert_eq!(events[0].field, "status");
            assert_eq!(events[0].value, "in progress");
            assert_eq!(events[1].field, "timeoriginalestimate");
            assert_eq!(events[1].value, "3600");
        }

        #[test]
        fn missing_value_becomes_empty() {
            let history = RawHistory {
                created: Some("2020-07-21T16:33:37.000+0300".into()),
                author: user("alice"),
                items: vec![item("assignee", None)],
            };

            let events = events_from_history("CORE-1", &history).unwrap();
            assert_eq!(events[0].value, "");
        }

        #[test]
        fn entry_without_items_yields_nothing() {
            let history = RawHistory {
                created: None,
                author: None,
                items: vec![],
            };
            assert!(events_from_history("CORE-1", &history).unwrap().is_empty());
        }

        #[test]
        fn missing_field_is_fatal() {
            let history = RawHistory {
                created: Some("2020-07-21T16:33:37.000+0300".into()),
                author: user("alice"),
                items: vec![RawItem {
                    field: None,
                    from_value: None,
                    to_value: Some("Done".into()),
                }],
            };

            let err = events_from_history("CORE-1", &history).unwrap_err();
            match err {
                HistoryError::MalformedItem { issue, record, .. } => {
                    assert_eq!(issue, "CORE-1");
                    assert!(record.contains("Done"), "record: {record}");
                }
                other => panic!("expected MalformedItem, got {other:?}"),
            }
        }

        #[test]
        fn missing_author_is_fatal() {
            let history = RawHistory {
                created: Some("2020-07-21T16:33:37.000+0300".into()),
                author: None,
                items: vec![item("status", Some("Closed"))],
            };
            assert!(matches!(
                events_from_history("CORE-1", &history),
                Err(HistoryError::MalformedItem { .. })
            ));
        }

        #[test]
        fn bad_timestamp_is_fatal() {
            let history = RawHistory {
                created: Some("21.07.2020".into()),
                author: user("alice"),
                items: vec![item("status", Some("Closed"))],
            };
            assert!(matches!(
                events_from_history("CORE-1", &history),
                Err(HistoryError::BadTimestamp { .. })
            ));
        }
    }

    mod comments {
        use super::*;

        #[test]
        fn body_kept_verbatim() {
            let comment = RawComment {
                created: Some("2020-07-21T16:33:37.000+0300".into()),
                author: user("bob"),
                body: Some("/Owner Bob\nSee PR".into()),
            };

            let event = event_from_comment("CORE-1", &comment).unwrap();
            assert!(event.is_comment());
            assert_eq!(event.author, "bob");
            assert_eq!(event.value, "/Owner Bob\nSee PR");
        }

        #[test]
        fn missing_author_is_fatal() {
            let comment = RawComment {
                created: Some("2020-07-21T16:33:37.000+0300".into()),
                author: None,
                body: Some("hi".into()),
            };
            assert!(matches!(
                event_from_comment("CORE-1", &comment),
                Err(HistoryError::MalformedComment { .. })
            ));
        }
    }
}
