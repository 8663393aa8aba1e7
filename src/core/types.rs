//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`IssueKey`] - Validated project-scoped issue identifier (`PROJ-123`)
//!
//! # Validation
//!
//! Keys are validated at construction time, so a key that reaches the
//! tracker or the classifier is always well-formed.
//!
//! # Examples
//!
//! ```
//! use jiratrack::core::types::IssueKey;
//!
//! let key = IssueKey::new("CORE-42").unwrap();
//! assert_eq!(key.project(), "CORE");
//! assert_eq!(key.number(), Some(42));
//!
//! assert!(IssueKey::new("").is_err());
//! assert!(IssueKey::new("has space-1").is_err());
//! ```

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid issue key: {0}")]
    InvalidIssueKey(String),
}

/// A validated issue key.
///
/// Keys have the shape `<PROJECT>-<NUMBER>`. The project part must be
/// non-empty and may contain ASCII letters, digits and `_`. The numeric
/// suffix is expected but not required, since some trackers hand out
/// free-form keys for imported issues.
///
/// Keys order naturally: by project, then by number, so `P-9` sorts
/// before `P-10`.
///
/// # Example
///
/// ```
/// use jiratrack::core::types::IssueKey;
///
/// let mut keys = vec![
///     IssueKey::new("P-10").unwrap(),
///     IssueKey::new("P-9").unwrap(),
/// ];
/// keys.sort();
/// assert_eq!(keys[0].as_str(), "P-9");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IssueKey(String);

impl IssueKey {
    /// Create a new validated issue key.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidIssueKey` if the key is empty, contains
    /// whitespace or control characters, or has an empty project part.
    pub fn new(key: impl Into<String>) -> Result<Self, TypeError> {
        let key = key.into();
        Self::validate(&key)?;
        Ok(Self(key))
    }

    fn validate(key: &str) -> Result<(), TypeError> {
        if key.is_empty() {
            return Err(TypeError::InvalidIssueKey(
                "issue key cannot be empty".into(),
            ));
        }

        if key.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(TypeError::InvalidIssueKey(format!(
                "issue key '{key}' cannot contain whitespace"
            )));
        }

        let project = key.split('-').next().unwrap_or_default();
        if project.is_empty() {
            return Err(TypeError::InvalidIssueKey(format!(
                "issue key '{key}' has no project part"
            )));
        }
        if !project
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(TypeError::InvalidIssueKey(format!(
                "issue key '{key}' has an invalid project part"
            )));
        }

        Ok(())
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The project part of the key (before the first `-`).
    pub fn project(&self) -> &str {
        self.0.split('-').next().unwrap_or_default()
    }

    /// The numeric suffix of the key, if it has one.
    pub fn number(&self) -> Option<u64> {
        self.0
            .split_once('-')
            .and_then(|(_, n)| n.parse::<u64>().ok())
    }
}

impl Ord for IssueKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.project()
            .cmp(other.project())
            .then_with(|| match (self.number(), other.number()) {
                (Some(a), Some(b)) => a.cmp(&b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for IssueKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl TryFrom<String> for IssueKey {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<IssueKey> for String {
    fn from(key: IssueKey) -> Self {
        key.0
    }
}

impl fmt::Display for IssueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for IssueKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod issue_key {
        use super::*;

        #[test]
        fn valid_keys() {
            assert!(IssueKey::new("CORE-1").is_ok());
            assert!(IssueKey::new("NFBDSSOHA-816").is_ok());
            assert!(IssueKey::new("A_B-7").is_ok());
            assert!(IssueKey::new("LEGACY").is_ok());
        }

        #[test]
        fn invalid_keys() {
            assert!(IssueKey::new("").is_err());
            assert!(IssueKey::new("-12").is_err());
            assert!(IssueKey::new("CORE 1").is_err());
            assert!(IssueKey::new("CO/RE-1").is_err());
            assert!(IssueKey::new("CORE-1\n").is_err());
        }

        #[test]
        fn parts() {
            let key = IssueKey::new("CORE-816").unwrap();
            assert_eq!(key.project(), "CORE");
            assert_eq!(key.number(), Some(816));

            let bare = IssueKey::new("LEGACY").unwrap();
            assert_eq!(bare.project(), "LEGACY");
            assert_eq!(bare.number(), None);
        }

        #[test]
        fn natural_ordering() {
            let mut keys: Vec<IssueKey> = ["P-10", "P-9", "A-100", "P-1"]
                .into_iter()
                .map(|k| IssueKey::new(k).unwrap())
                .collect();
            keys.sort();
            let sorted: Vec<&str> = keys.iter().map(|k| k.as_str()).collect();
            assert_eq!(sorted, vec!["A-100", "P-1", "P-9", "P-10"]);
        }

        #[test]
        fn serde_roundtrip() {
            let key = IssueKey::new("CORE-3").unwrap();
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, "\"CORE-3\"");
            let parsed: IssueKey = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, key);
        }

        #[test]
        fn serde_rejects_invalid() {
            let result: Result<IssueKey, _> = serde_json::from_str("\"bad key\"");
            assert!(result.is_err());
        }

        #[test]
        fn display() {
            let key = IssueKey::new("CORE-3").unwrap();
            assert_eq!(format!("{key}"), "CORE-3");
        }
    }
}
