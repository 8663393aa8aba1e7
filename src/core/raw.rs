//! core::raw
//!
//! Raw issue records as the tracker hands them over.
//!
//! These mirror the JSON shape of the Jira REST API (`/rest/api/2/issue/<key>?expand=changelog`
//! merged with `/rest/api/2/issue/<key>/comment`). Fields the classifier
//! depends on are kept optional here on purpose: a missing value is a
//! data-integrity fault that [`crate::core::event`] reports with the offending
//! record, rather than a deserialization failure of the whole response.

use serde::{Deserialize, Serialize};

/// One issue with its changelog and comments.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawIssue {
    pub key: String,
    #[serde(default)]
    pub changelog: RawChangelog,
    #[serde(default)]
    pub comments: Vec<RawComment>,
}

/// The `changelog` block of an expanded issue.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawChangelog {
    #[serde(default)]
    pub histories: Vec<RawHistory>,
}

/// One changelog entry: a set of field changes applied at one moment by one author.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawHistory {
    pub created: Option<String>,
    pub author: Option<RawUser>,
    #[serde(default)]
    pub items: Vec<RawItem>,
}

/// One changed field inside a changelog entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawItem {
    pub field: Option<String>,
    #[serde(rename = "fromString", default)]
    pub from_value: Option<String>,
    #[serde(rename = "toString", default)]
    pub to_value: Option<String>,
}

/// A user reference. Jira Server fills `name`, Jira Cloud only `accountId`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawUser {
    pub name: Option<String>,
    pub account_id: Option<String>,
    pub display_name: Option<String>,
}

impl RawUser {
    /// The identity string events are attributed to.
    pub fn identity(&self) -> Option<&str> {
        self.name
            .as_deref()
            .or(self.account_id.as_deref())
            .filter(|s| !s.is_empty())
    }
}

/// One comment on an issue.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawComment {
    pub created: Option<String>,
    pub author: Option<RawUser>,
    pub body: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_expanded_issue() {
        let json = r#"{
            "key": "CORE-1",
            "fields": {"summary": "ignored"},
            "changelog": {
                "startAt": 0,
                "histories": [{
                    "id": "100",
                    "created": "2020-07-21T16:33:37.000+0300",
                    "author": {"name": "alice", "displayName": "Alice"},
                    "items": [
                        {"field": "status", "fromString": "Open", "toString": "In Progress"},
                        {"field": "assignee", "fromString": null, "toString": null}
                    ]
                }]
            }
        }"#;

        let issue: RawIssue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.key, "CORE-1");
        assert!(issue.comments.is_empty());
        let history = &issue.changelog.histories[0];
        assert_eq!(history.author.as_ref().unwrap().identity(), Some("alice"));
        assert_eq!(history.items.len(), 2);
        assert_eq!(history.items[0].to_value.as_deref(), Some("In Progress"));
        assert!(history.items[1].to_value.is_none());
    }

    #[test]
    fn deserialize_minimal_issue() {
        let issue: RawIssue = serde_json::from_str(r#"{"key": "CORE-2"}"#).unwrap();
        assert!(issue.changelog.histories.is_empty());
        assert!(issue.comments.is_empty());
    }

    #[test]
    fn identity_falls_back_to_account_id() {
        let user: RawUser =
            serde_json::from_str(r#"{"accountId": "5b10ac8d", "displayName": "Mia"}"#).unwrap();
        assert_eq!(user.identity(), Some("5b10ac8d"));
    }

    #[test]
    fn empty_identity_is_none() {
        let user = RawUser {
            name: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(user.identity(), None);
    }
}
