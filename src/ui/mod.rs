//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`prompts`] - Interactive password prompt
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All console output and prompts go through this module so quiet mode,
//! color and non-interactive sessions are handled in one place.

pub mod output;
pub mod prompts;
