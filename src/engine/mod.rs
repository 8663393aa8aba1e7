//! engine
//!
//! Orchestrates one analysis run: Search -> Fetch -> Assemble -> Classify -> Summarize.
//!
//! # Architecture
//!
//! The engine is the only place that combines the tracker with the pure
//! pipeline in [`crate::core`]. Commands hand it a tracker and a request and
//! get an [`Analysis`] back; rendering is left to the caller.
//!
//! ```text
//! count -> search keys -> fetch details (bounded, ordered) -> assemble -> classify
//! ```
//!
//! # Invariants
//!
//! - Results come back in the tracker's search order
//! - The first fetch or assembly error aborts the run
//! - Classification never sees a partially assembled history
//!
//! # Example
//!
//! ```ignore
//! use jiratrack::engine::{analyze, AnalysisRequest};
//!
//! let request = AnalysisRequest::new("CORE", "alice");
//! let analysis = analyze(&tracker, &request, 6).await?;
//! println!("{} issues", analysis.summary.total);
//! ```

pub mod runner;

pub use runner::{
    analyze, fetch_history, sort_results_by_key, Analysis, AnalysisRequest, RunError,
};

/// Execution context for commands.
///
/// Contains global settings derived from CLI flags that affect command behavior.
#[derive(Debug, Clone)]
pub struct Context {
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
    /// Interactive mode enabled (password prompts allowed).
    pub interactive: bool,
    /// Colored console output.
    pub color: bool,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            debug: false,
            quiet: false,
            interactive: true,
            color: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod context {
        use super::*;

        #[test]
        fn default_values() {
            let ctx = Context::default();
            assert!(!ctx.debug);
            assert!(!ctx.quiet);
            assert!(ctx.interactive);
            assert!(ctx.color);
        }

        #[test]
        fn custom_values() {
            let ctx = Context {
                debug: true,
                quiet: true,
                interactive: false,
                color: false,
            };
            assert!(ctx.debug);
            assert!(ctx.quiet);
            assert!(!ctx.interactive);
            assert!(!ctx.color);
        }
    }
}
