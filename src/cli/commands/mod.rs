//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Loads configuration and resolves credentials
//! 2. Calls the engine to do the work
//! 3. Formats and displays output
//!
//! # Async Commands
//!
//! Commands that talk to the tracker (analyze, history) are async because
//! they involve network I/O. Each builds a tokio runtime and blocks on its
//! async implementation.

mod analyze;
mod completion;
mod config_cmd;
mod connect;
mod history;

// Re-export command functions for testing and direct invocation
pub use analyze::{analyze, AnalyzeOptions};
pub use completion::completion;
pub use config_cmd::{describe as describe_config, show as config_show};
pub use connect::{resolve as resolve_connection, ConnectionSettings, PASSWORD_ENV};
pub use history::history;

use anyhow::{Context as _, Result};

use crate::cli::args::Command;
use crate::core::config::Config;
use crate::engine::Context;
use crate::ui::output::Verbosity;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Analyze {
            project,
            target_user,
            connection,
            workers,
            limit,
            language,
            sort,
            json,
            xlsx,
            no_xlsx,
            output,
        } => analyze::analyze(
            ctx,
            AnalyzeOptions {
                project,
                target_user,
                connection,
                workers,
                limit,
                language,
                sort,
                json,
                xlsx,
                no_xlsx,
                output,
            },
        ),
        Command::History { key, connection } => history::history(ctx, &key, &connection),
        Command::Config => config_cmd::show(ctx),
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// Load the configuration and surface its warnings.
fn load_config(verbosity: Verbosity) -> Result<Config> {
    let result = Config::load().context("Failed to load config")?;
    config_cmd::report_warnings(&result.warnings, verbosity);
    Ok(result.config)
}
