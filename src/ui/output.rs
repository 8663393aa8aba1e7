//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! The report goes to stdout and respects the quiet flag; diagnostics go to
//! stderr. Issue lines are colored with `colored` unless color is turned off.

use std::fmt::Display;

use colored::Colorize;

use crate::core::classify::ClassificationResult;
use crate::report::{issue_labels, Label, LabelKind, Language, Summary};

/// Line printed between the issue list and the summary.
pub const SEPARATOR: &str = "--------------------------------------------------";

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

fn paint(label: &Label, color: bool) -> String {
    if !color {
        return label.text.clone();
    }
    let text = label.text.as_str();
    match label.kind {
        LabelKind::StillOpen => text.cyan().to_string(),
        LabelKind::ReturnedFromTesting => text.yellow().to_string(),
        LabelKind::Reopened => text.red().to_string(),
        LabelKind::CustomFields => text.magenta().to_string(),
    }
}

/// Format one issue: its URL followed by its labels, space separated.
pub fn format_issue_line(result: &ClassificationResult, language: Language, color: bool) -> String {
    std::iter::once(result.link().to_string())
        .chain(issue_labels(result, language).iter().map(|l| paint(l, color)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format the whole console report: issue lines, separator, summary lines.
pub fn format_report(
    results: &[ClassificationResult],
    summary: &Summary,
    language: Language,
    color: bool,
) -> Vec<String> {
    let mut lines: Vec<String> = results
        .iter()
        .map(|r| format_issue_line(r, language, color))
        .collect();
    if !results.is_empty() {
        lines.push(SEPARATOR.to_string());
    }
    lines.extend(summary.lines(language));
    lines
}

/// Format a list of items.
pub fn format_list<T: Display>(items: &[T], prefix: &str) -> String {
    items
        .iter()
        .map(|item| format!("{}{}", prefix, item))
        .collect::<Vec<_>>()
        .join("\n")
}
