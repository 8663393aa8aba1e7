//! config command - Show the effective configuration

use anyhow::Result;

use super::connect::PASSWORD_ENV;
use super::load_config;
use crate::core::config::Config;
use crate::engine::Context;
use crate::ui::output::{self, Verbosity};

/// Show the effective configuration.
pub fn show(ctx: &Context) -> Result<()> {
    let verbosity = Verbosity::from_flags(ctx.quiet, ctx.debug);
    let config = load_config(verbosity)?;
    let password_set = std::env::var(PASSWORD_ENV).is_ok_and(|p| !p.is_empty());

    for line in describe(&config, password_set) {
        println!("{}", line);
    }
    Ok(())
}

/// Render the effective configuration, one `key = value` per line.
pub fn describe(config: &Config, password_set: bool) -> Vec<String> {
    let source = config
        .loaded_from()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(defaults, no config file found)".to_string());
    let unset = "(not set)";

    vec![
        "# jiratrack configuration".to_string(),
        format!("# loaded from: {}", source),
        format!("host = {}", config.host().unwrap_or(unset)),
        format!("username = {}", config.username().unwrap_or(unset)),
        format!(
            "password = {}",
            if password_set {
                "(from JIRA_PASSWORD)"
            } else {
                "(prompted)"
            }
        ),
        format!("workers = {}", config.workers()),
        format!("timeout_secs = {}", config.timeout_secs()),
        format!("language = {}", config.language()),
        format!("export.xlsx = {}", config.export_xlsx()),
        format!(
            "export.directory = {}",
            config
                .export_directory()
                .map(|d| d.display().to_string())
                .unwrap_or_else(|| "(current directory)".to_string())
        ),
    ]
}

/// Warn about anything odd found while loading.
pub(super) fn report_warnings(warnings: &[crate::core::config::ConfigWarning], verbosity: Verbosity) {
    if warnings.is_empty() {
        return;
    }
    let items: Vec<String> = warnings
        .iter()
        .map(|w| format!("{} ({})", w.message, w.path.display()))
        .collect();
    output::warn(
        format!("config:\n{}", output::format_list(&items, "  - ")),
        verbosity,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{EnvOverrides, FileConfig};

    #[test]
    fn describes_defaults() {
        let lines = describe(&Config::default(), false);
        assert!(lines.contains(&"host = (not set)".to_string()));
        assert!(lines.contains(&"workers = 6".to_string()));
        assert!(lines.contains(&"timeout_secs = 30".to_string()));
        assert!(lines.contains(&"language = ru".to_string()));
        assert!(lines.contains(&"password = (prompted)".to_string()));
        assert!(lines.contains(&"export.directory = (current directory)".to_string()));
    }

    #[test]
    fn describes_env_overrides() {
        let config = Config::from_parts(
            FileConfig {
                host: Some("https://file.example.com".into()),
                ..Default::default()
            },
            EnvOverrides {
                host: None,
                username: Some("env-user".into()),
            },
        );
        let lines = describe(&config, true);
        assert!(lines.contains(&"host = https://file.example.com".to_string()));
        assert!(lines.contains(&"username = env-user".to_string()));
        assert!(lines.contains(&"password = (from JIRA_PASSWORD)".to_string()));
    }
}
