//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. Environment (`JIRA_HOST`, `JIRA_USERNAME`)
//! 4. CLI flags (not handled here)
//!
//! The password is never read from the config file; see `cli::commands`.
//!
//! # Config Locations
//!
//! Searched in order:
//! 1. `$JIRATRACK_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/jiratrack/config.toml`
//! 3. `~/.jiratrack/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use jiratrack::core::config::Config;
//!
//! let result = Config::load().unwrap();
//! let config = result.config;
//!
//! if let Some(host) = config.host() {
//!     println!("Host: {}", host);
//! }
//! println!("Workers: {}", config.workers());
//! ```

pub mod schema;

pub use schema::{ExportConfig, FileConfig};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default number of concurrent issue fetches.
pub const DEFAULT_WORKERS: usize = 6;

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default report language.
pub const DEFAULT_LANGUAGE: &str = "ru";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Values taken from the environment at load time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvOverrides {
    pub host: Option<String>,
    pub username: Option<String>,
}

impl EnvOverrides {
    /// Read `JIRA_HOST` and `JIRA_USERNAME`, ignoring empty values.
    pub fn from_env() -> Self {
        let read = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());
        Self {
            host: read("JIRA_HOST"),
            username: read("JIRA_USERNAME"),
        }
    }
}

/// Effective configuration.
///
/// Accessors apply precedence and defaults.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed config file (defaults if none was found)
    pub file: FileConfig,
    /// Environment overrides
    pub env: EnvOverrides,
    /// Path the file was loaded from
    path: Option<PathBuf>,
}

impl Config {
    /// Build a config from already-loaded parts.
    pub fn from_parts(file: FileConfig, env: EnvOverrides) -> Self {
        Self {
            file,
            env,
            path: None,
        }
    }

    /// Load configuration from the default locations and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed,
    /// or validated. A missing config file is not an error.
    pub fn load() -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();
        let (file, path) = Self::load_file(&mut warnings)?;
        file.validate()?;

        Ok(ConfigLoadResult {
            config: Config {
                file,
                env: EnvOverrides::from_env(),
                path,
            },
            warnings,
        })
    }

    fn load_file(
        warnings: &mut Vec<ConfigWarning>,
    ) -> Result<(FileConfig, Option<PathBuf>), ConfigError> {
        // 1. Check $JIRATRACK_CONFIG
        if let Ok(path) = std::env::var("JIRATRACK_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                let config = Self::read_file(&path)?;
                return Ok((config, Some(path)));
            }
            warnings.push(ConfigWarning {
                message: "JIRATRACK_CONFIG points to a missing file; searching the default locations"
                    .to_string(),
                path,
            });
        }

        // 2. Check $XDG_CONFIG_HOME/jiratrack/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("jiratrack/config.toml");
            if path.exists() {
                let config = Self::read_file(&path)?;
                return Ok((config, Some(path)));
            }
        }

        // 3. Check ~/.jiratrack/config.toml
        if let Some(home) = dirs::home_dir() {
            let path = home.join(".jiratrack/config.toml");
            if path.exists() {
                let config = Self::read_file(&path)?;
                return Ok((config, Some(path)));
            }
        }

        Ok((FileConfig::default(), None))
    }

    /// Read, parse and validate one config file.
    pub fn read_file(path: &Path) -> Result<FileConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: FileConfig = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Tracker base URL, without a trailing slash.
    ///
    /// Returns `None` if not configured.
    pub fn host(&self) -> Option<&str> {
        self.env
            .host
            .as_deref()
            .or(self.file.host.as_deref())
            .map(|h| h.trim_end_matches('/'))
    }

    /// Username to authenticate as.
    pub fn username(&self) -> Option<&str> {
        self.env
            .username
            .as_deref()
            .or(self.file.username.as_deref())
    }

    /// Concurrent issue fetches. Defaults to 6.
    pub fn workers(&self) -> usize {
        self.file.workers.unwrap_or(DEFAULT_WORKERS)
    }

    /// Per-request timeout in seconds. Defaults to 30.
    pub fn timeout_secs(&self) -> u64 {
        self.file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    /// Report language code. Defaults to "ru".
    pub fn language(&self) -> &str {
        self.file.language.as_deref().unwrap_or(DEFAULT_LANGUAGE)
    }

    /// Whether a spreadsheet is written after every analysis.
    ///
    /// Defaults to `false`.
    pub fn export_xlsx(&self) -> bool {
        self.file
            .export
            .as_ref()
            .and_then(|e| e.xlsx)
            .unwrap_or(false)
    }

    /// Directory spreadsheets are written to (current directory if unset).
    pub fn export_directory(&self) -> Option<&Path> {
        self.file
            .export
            .as_ref()
            .and_then(|e| e.directory.as_deref())
    }

    /// Get the path the config file was loaded from.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert!(config.host().is_none());
        assert!(config.username().is_none());
        assert_eq!(config.workers(), DEFAULT_WORKERS);
        assert_eq!(config.timeout_secs(), DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.language(), "ru");
        assert!(!config.export_xlsx());
        assert!(config.export_directory().is_none());
        assert!(config.loaded_from().is_none());
    }

    #[test]
    fn read_file_parses_and_validates() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            r#"
            host = "https://jira.example.com/"
            username = "alice"
            workers = 3

            [export]
            xlsx = true
            "#,
        )
        .unwrap();

        let file = Config::read_file(&path).unwrap();
        let config = Config::from_parts(file, EnvOverrides::default());
        assert_eq!(config.host(), Some("https://jira.example.com"));
        assert_eq!(config.username(), Some("alice"));
        assert_eq!(config.workers(), 3);
        assert!(config.export_xlsx());
    }

    #[test]
    fn read_file_rejects_invalid_values() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "workers = 0").unwrap();

        assert!(matches!(
            Config::read_file(&path),
            Err(ConfigError::InvalidValue(_))
        ));
    }

    #[test]
    fn read_file_rejects_unknown_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "colour = \"blue\"").unwrap();

        assert!(matches!(
            Config::read_file(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn read_missing_file_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.toml");
        assert!(matches!(
            Config::read_file(&path),
            Err(ConfigError::ReadError { .. })
        ));
    }

    #[test]
    fn environment_overrides_file() {
        let file = FileConfig {
            host: Some("https://file.example.com".to_string()),
            username: Some("file-user".to_string()),
            ..Default::default()
        };
        let env = EnvOverrides {
            host: Some("https://env.example.com".to_string()),
            username: None,
        };

        let config = Config::from_parts(file, env);
        assert_eq!(config.host(), Some("https://env.example.com"));
        assert_eq!(config.username(), Some("file-user"));
    }
}
