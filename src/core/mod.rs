//! core
//!
//! Domain types and the pure analysis pipeline.
//!
//! # Modules
//!
//! - [`types`] - Strong types (issue keys)
//! - [`raw`] - Raw issue records as fetched from the tracker
//! - [`event`] - Uniform event model and record normalization
//! - [`history`] - Ordered per-issue event history
//! - [`classify`] - Classification state machine
//! - [`config`] - Configuration schema and loading
//!
//! Nothing in this module performs I/O except configuration loading.

pub mod classify;
pub mod config;
pub mod event;
pub mod history;
pub mod raw;
pub mod types;
