//! jiratrack - audit Jira issue histories
//!
//! jiratrack pulls every issue of a project that a given user was ever
//! assigned, replays each issue's changelog and comments in time order, and
//! reports which issues are still open, came back from testing, or were
//! reopened after being closed. Comments written by the target user may carry
//! `/tag value` annotations, which are collected per issue.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Orchestrates Search -> Fetch -> Assemble -> Classify -> Summarize
//! - [`core`] - Domain types, event model, history assembly, classification, config
//! - [`tracker`] - Abstraction over the issue tracker (Jira REST v2, plus a mock)
//! - [`report`] - Labels, annotation grouping and summary statistics
//! - [`export`] - Spreadsheet export
//! - [`ui`] - Console output and prompts
//!
//! # Correctness Invariants
//!
//! 1. Events of one issue are replayed in timestamp order; ties keep source order
//! 2. Classification is a pure function of the assembled history
//! 3. Results are reported in the tracker's search order unless sorting is requested

pub mod cli;
pub mod core;
pub mod engine;
pub mod export;
pub mod report;
pub mod tracker;
pub mod ui;
