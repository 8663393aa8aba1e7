//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--debug`: Enable debug logging
//! - `--interactive` / `--no-interactive`: Control prompts
//! - `--quiet` / `-q`: Minimal output
//! - `--no-color`: Plain console output

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// jiratrack - audit Jira issue histories for returns from testing and reopens
#[derive(Parser, Debug)]
#[command(name = "jiratrack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output; implies --no-interactive
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable interactive prompts
    #[arg(long = "interactive", global = true, conflicts_with = "no_interactive")]
    pub interactive_flag: bool,

    /// Disable interactive prompts
    #[arg(long, global = true)]
    pub no_interactive: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Determine if interactive mode is enabled.
    ///
    /// Returns true if:
    /// - `--interactive` was explicitly set, OR
    /// - Neither `--no-interactive` nor `--quiet` was set AND stdin is a TTY
    pub fn interactive(&self) -> bool {
        if self.interactive_flag {
            true
        } else if self.no_interactive || self.quiet {
            false
        } else {
            std::io::stdin().is_terminal()
        }
    }
}

/// Connection settings shared by commands that talk to the tracker.
///
/// Flags override the config file and the environment.
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Tracker base URL (overrides JIRA_HOST and the config file)
    #[arg(long, value_name = "URL")]
    pub host: Option<String>,

    /// User to authenticate as (overrides JIRA_USERNAME and the config file)
    #[arg(short, long, value_name = "USER")]
    pub username: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Classify every issue of a project the target user was ever assigned
    #[command(
        name = "analyze",
        long_about = "Classify every issue of a project the target user was ever assigned.\n\n\
            For each issue the full changelog and all comments are fetched and scanned in \
            time order. The report marks issues that are still open, that came back from \
            testing, or that were reopened after being closed, and lists the /tag value \
            annotations the target user left in comments.",
        after_help = "\
EXAMPLES:
    # Audit your own work in project CORE
    jiratrack analyze CORE

    # Audit another user's work, authenticating as yourself
    jiratrack analyze CORE bob --username alice

    # Also write a spreadsheet
    jiratrack analyze CORE --xlsx --output reports/core"
    )]
    Analyze {
        /// Project key
        project: String,

        /// User whose work is audited (defaults to the authenticating user)
        target_user: Option<String>,

        #[command(flatten)]
        connection: ConnectionArgs,

        /// Concurrent issue fetches
        #[arg(short = 'j', long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
        workers: Option<u64>,

        /// Analyze at most this many issues
        #[arg(long, value_name = "N")]
        limit: Option<u64>,

        /// Report language
        #[arg(long, value_parser = ["ru", "en"])]
        language: Option<String>,

        /// Sort issues by key (P-9 before P-10) instead of search order
        #[arg(long)]
        sort: bool,

        /// Print the analysis as JSON instead of the console report
        #[arg(long)]
        json: bool,

        /// Write a spreadsheet
        #[arg(long, conflicts_with = "no_xlsx")]
        xlsx: bool,

        /// Do not write a spreadsheet even if the config asks for one
        #[arg(long)]
        no_xlsx: bool,

        /// Spreadsheet path (".xlsx" is appended when missing)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Dump the assembled event history of one issue as JSON
    History {
        /// Issue key, e.g. CORE-42
        key: String,

        #[command(flatten)]
        connection: ConnectionArgs,
    },

    /// Show the effective configuration and where it was loaded from
    Config,

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
