//! cli
//!
//! Command-line interface layer for jiratrack.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Set up logging
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap, resolves
//! configuration and credentials, and hands the work to [`crate::engine`].
//! Logs go to stderr so stdout carries only the report.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::io::IsTerminal;

use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

use crate::engine;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    init_tracing(if cli.debug { "debug" } else { "warn" });

    let ctx = engine::Context {
        debug: cli.debug,
        quiet: cli.quiet,
        interactive: cli.interactive(),
        color: !cli.no_color && std::io::stdout().is_terminal(),
    };

    commands::dispatch(cli.command, &ctx)
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` (or `LOG_LEVEL`) overrides `default_level`.
pub fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_env("RUST_LOG")
        .or_else(|_| EnvFilter::try_from_env("LOG_LEVEL"))
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
