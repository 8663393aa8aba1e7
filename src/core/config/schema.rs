//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Location
//!
//! Searched in order:
//! 1. `$JIRATRACK_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/jiratrack/config.toml`
//! 3. `~/.jiratrack/config.toml`
//!
//! # Validation
//!
//! Config values are validated after parsing so a bad file fails at load
//! time rather than halfway through a run.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Configuration file contents.
///
/// # Example
///
/// ```toml
/// host = "https://jira.example.com"
/// username = "alice"
/// workers = 6
/// timeout_secs = 30
/// language = "ru"
///
/// [export]
/// xlsx = true
/// directory = "/home/alice/reports"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Tracker base URL
    pub host: Option<String>,

    /// Username used to authenticate
    pub username: Option<String>,

    /// Concurrent issue fetches
    pub workers: Option<usize>,

    /// Per-request timeout in seconds
    pub timeout_secs: Option<u64>,

    /// Report language ("ru" or "en")
    pub language: Option<String>,

    /// Spreadsheet export settings
    pub export: Option<ExportConfig>,
}

impl FileConfig {
    /// Valid report languages.
    pub const VALID_LANGUAGES: &'static [&'static str] = &["ru", "en"];

    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(host) = &self.host {
            if host.trim().is_empty() {
                return Err(ConfigError::InvalidValue("host cannot be empty".to_string()));
            }
            if !host.starts_with("http://") && !host.starts_with("https://") {
                return Err(ConfigError::InvalidValue(format!(
                    "host '{}' must start with http:// or https://",
                    host
                )));
            }
        }

        if let Some(username) = &self.username {
            if username.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "username cannot be empty".to_string(),
                ));
            }
        }

        if self.workers == Some(0) {
            return Err(ConfigError::InvalidValue(
                "workers must be at least 1".to_string(),
            ));
        }

        if self.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue(
                "timeout_secs must be at least 1".to_string(),
            ));
        }

        if let Some(language) = &self.language {
            if !Self::VALID_LANGUAGES.contains(&language.as_str()) {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid language '{}', must be one of: {}",
                    language,
                    Self::VALID_LANGUAGES.join(", ")
                )));
            }
        }

        Ok(())
    }
}

/// Spreadsheet export settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Write a spreadsheet after every analysis
    pub xlsx: Option<bool>,

    /// Directory the spreadsheet is written to
    pub directory: Option<PathBuf>,
}
