//! Resolve connection settings and credentials into a tracker.

use std::time::Duration;

use anyhow::{Context as _, Result};
use tracing::debug;

use crate::cli::args::ConnectionArgs;
use crate::core::config::Config;
use crate::engine::Context;
use crate::tracker::jira::JiraTracker;
use crate::ui::prompts::{self, PromptError};

/// Environment variable holding the password.
pub const PASSWORD_ENV: &str = "JIRA_PASSWORD";

/// Host, username and timeout after applying flag > env > file precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub host: String,
    pub username: String,
    pub timeout: Duration,
}

/// Merge flags with the loaded config.
pub fn resolve(config: &Config, args: &ConnectionArgs) -> Result<ConnectionSettings> {
    let host = args
        .host
        .as_deref()
        .map(|h| h.trim_end_matches('/'))
        .or(config.host())
        .context("No Jira host configured. Pass --host, set JIRA_HOST, or add `host` to the config file.")?;
    let username = args
        .username
        .as_deref()
        .or(config.username())
        .context("No username configured. Pass --username, set JIRA_USERNAME, or add `username` to the config file.")?;
    let timeout = args.timeout.unwrap_or(config.timeout_secs()).max(1);

    Ok(ConnectionSettings {
        host: host.to_string(),
        username: username.to_string(),
        timeout: Duration::from_secs(timeout),
    })
}

/// Get the password from `JIRA_PASSWORD`, or prompt for it.
pub fn password(ctx: &Context, username: &str) -> Result<String> {
    if let Ok(password) = std::env::var(PASSWORD_ENV) {
        if !password.is_empty() {
            debug!("using password from {}", PASSWORD_ENV);
            return Ok(password);
        }
    }

    match prompts::password(&format!("Jira password for {}", username), ctx.interactive) {
        Ok(password) => Ok(password),
        Err(PromptError::NotInteractive) => anyhow::bail!(
            "No password available. Set {} or run interactively.",
            PASSWORD_ENV
        ),
        Err(e) => Err(anyhow::Error::new(e).context("Failed to read password")),
    }
}

/// Build a Jira tracker from config, flags and credentials.
pub fn connect(ctx: &Context, config: &Config, args: &ConnectionArgs) -> Result<JiraTracker> {
    let settings = resolve(config, args)?;
    let password = password(ctx, &settings.username)?;
    let tracker = JiraTracker::new(
        settings.host,
        settings.username,
        password,
        settings.timeout,
    )
    .context("Failed to create HTTP client")?;
    debug!(?tracker, "connected");
    Ok(tracker)
}
