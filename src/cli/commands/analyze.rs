//! analyze command - Classify a project's issues for one user

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use chrono::Local;
use tracing::info;

use super::connect::connect;
use super::load_config;
use crate::cli::args::ConnectionArgs;
use crate::core::config::Config;
use crate::engine::{self, AnalysisRequest, Context};
use crate::export::{ensure_parent_dir, resolve_output_path, write_xlsx};
use crate::report::Language;
use crate::ui::output::{self, Verbosity};

/// Options for the analyze command.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    pub project: String,
    pub target_user: Option<String>,
    pub connection: ConnectionArgs,
    pub workers: Option<u64>,
    pub limit: Option<u64>,
    pub language: Option<String>,
    pub sort: bool,
    pub json: bool,
    pub xlsx: bool,
    pub no_xlsx: bool,
    pub output: Option<PathBuf>,
}

impl AnalyzeOptions {
    /// Report language: flag, then config, then Russian.
    pub fn language(&self, config: &Config) -> Language {
        self.language
            .as_deref()
            .and_then(Language::from_code)
            .or_else(|| Language::from_code(config.language()))
            .unwrap_or_default()
    }

    /// Whether a spreadsheet is written: flags win over the config.
    pub fn wants_xlsx(&self, config: &Config) -> bool {
        if self.no_xlsx {
            false
        } else {
            self.xlsx || self.output.is_some() || config.export_xlsx()
        }
    }

    pub fn workers(&self, config: &Config) -> usize {
        self.workers
            .and_then(|w| usize::try_from(w).ok())
            .unwrap_or(config.workers())
    }
}

/// Run the analyze command.
///
/// This is a synchronous wrapper that uses tokio to run the async implementation.
pub fn analyze(ctx: &Context, opts: AnalyzeOptions) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(analyze_async(ctx, opts))
}

async fn analyze_async(ctx: &Context, opts: AnalyzeOptions) -> Result<()> {
    let verbosity = Verbosity::from_flags(ctx.quiet, ctx.debug);
    let config = load_config(verbosity)?;
    let tracker = connect(ctx, &config, &opts.connection)?;

    let target_user = opts
        .target_user
        .clone()
        .unwrap_or_else(|| tracker.username().to_string());
    let mut request = AnalysisRequest::new(&opts.project, target_user);
    request.limit = opts.limit;

    let language = opts.language(&config);
    let mut analysis = engine::analyze(&tracker, &request, opts.workers(&config))
        .await
        .with_context(|| format!("Failed to analyze project {}", opts.project))?;

    if opts.sort {
        engine::sort_results_by_key(&mut analysis.results);
    }

    if opts.json {
        let json = serde_json::to_string_pretty(&analysis).context("Failed to encode analysis")?;
        println!("{}", json);
    } else {
        let lines =
            output::format_report(&analysis.results, &analysis.summary, language, ctx.color);
        // Quiet mode keeps only the summary.
        let skip = if ctx.quiet {
            lines.len().saturating_sub(analysis.summary.lines(language).len())
        } else {
            0
        };
        for line in lines.into_iter().skip(skip) {
            println!("{}", line);
        }
    }

    if opts.wants_xlsx(&config) {
        let path = resolve_output_path(
            opts.output.as_deref(),
            config.export_directory(),
            Local::now().date_naive(),
        );
        ensure_parent_dir(&path)?;
        write_xlsx(&analysis.results, language, &path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), rows = analysis.results.len(), "spreadsheet written");
        output::print("", verbosity);
        output::print(
            format!("Report written to \"{}\"", path.display()),
            verbosity,
        );
    }

    Ok(())
}
