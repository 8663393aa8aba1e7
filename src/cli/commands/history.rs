//! history command - Dump one issue's event history as JSON

use anyhow::{Context as _, Result};

use super::connect::connect;
use super::load_config;
use crate::cli::args::ConnectionArgs;
use crate::core::types::IssueKey;
use crate::engine::{self, Context};
use crate::ui::output::Verbosity;

/// Run the history command.
///
/// This is a synchronous wrapper that uses tokio to run the async implementation.
pub fn history(ctx: &Context, key: &str, connection: &ConnectionArgs) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(history_async(ctx, key, connection))
}

async fn history_async(ctx: &Context, key: &str, connection: &ConnectionArgs) -> Result<()> {
    let key = IssueKey::new(key)?;
    let config = load_config(Verbosity::from_flags(ctx.quiet, ctx.debug))?;
    let tracker = connect(ctx, &config, connection)?;

    let history = engine::fetch_history(&tracker, &key)
        .await
        .with_context(|| format!("Failed to load history of {}", key))?;

    let json = serde_json::to_string_pretty(&history).context("Failed to encode history")?;
    println!("{}", json);
    Ok(())
}
