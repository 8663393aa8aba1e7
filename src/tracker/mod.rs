//! tracker
//!
//! Abstraction for the remote ticketing service.
//!
//! # Architecture
//!
//! The [`IssueTracker`] trait defines the three reads the analysis needs.
//! The engine only ever sees `&dyn IssueTracker`; the CLI picks the
//! implementation.
//!
//! # Modules
//!
//! - `traits`: Core `IssueTracker` trait and `TrackerError`
//! - [`jira`]: Jira REST API v2 implementation
//! - [`mock`]: Mock implementation for deterministic testing
//!
//! Raw record types live in [`crate::core::raw`] and are re-exported here.

pub mod jira;
pub mod mock;
mod traits;

pub use crate::core::raw::{RawChangelog, RawComment, RawHistory, RawIssue, RawItem, RawUser};
pub use traits::*;
