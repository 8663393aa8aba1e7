//! report
//!
//! Turns classification results into human-readable text.
//!
//! Nothing here prints or colors anything; [`crate::ui::output`] does that
//! with the [`Label`]s and summary lines produced here.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::core::classify::ClassificationResult;

/// Output language of labels and summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Language {
    #[default]
    Russian,
    English,
}

impl Language {
    /// Parse a config language code ("ru" or "en").
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ru" => Some(Language::Russian),
            "en" => Some(Language::English),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::Russian => "ru",
            Language::English => "en",
        }
    }

    /// Word joining the last two items of a list.
    pub fn conjunction(&self) -> &'static str {
        match self {
            Language::Russian => "и",
            Language::English => "and",
        }
    }

    fn still_open(&self) -> &'static str {
        match self {
            Language::Russian => "Ещё не закрыто",
            Language::English => "Still open",
        }
    }

    fn returned_from_testing(&self) -> &'static str {
        match self {
            Language::Russian => "Возврат из тестирования",
            Language::English => "Returned from testing",
        }
    }

    fn reopened(&self) -> &'static str {
        match self {
            Language::Russian => "Реопен",
            Language::English => "Reopened",
        }
    }

    fn no_issues(&self) -> &'static str {
        match self {
            Language::Russian => "Задач не найдено",
            Language::English => "No issues found",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_code(s).ok_or_else(|| format!("unknown language '{}'", s))
    }
}

// =============================================================================
// Custom field grouping
// =============================================================================

/// Group annotation tags by identical value.
///
/// Tags are visited in sorted order; each distinct value appears once, at the
/// position of the first tag that carries it, with all its tags in sorted
/// order.
pub fn group_annotations(fields: &BTreeMap<String, String>) -> Vec<(&str, Vec<&str>)> {
    let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();
    for (tag, value) in fields {
        match groups.iter_mut().find(|(v, _)| *v == value.as_str()) {
            Some((_, tags)) => tags.push(tag.as_str()),
            None => groups.push((value.as_str(), vec![tag.as_str()])),
        }
    }
    groups
}

/// Join items with ", ", using `conjunction` before the last one.
///
/// ```
/// use jiratrack::report::join_list;
///
/// assert_eq!(join_list(&["a", "b", "c"], "and"), "a, b and c");
/// assert_eq!(join_list(&["a"], "and"), "a");
/// ```
pub fn join_list<S: AsRef<str>>(items: &[S], conjunction: &str) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(|s| s.as_ref()).collect();
            format!("{} {} {}", head.join(", "), conjunction, last.as_ref())
        }
    }
}

/// Render custom fields as grouped display text, one `"<tags> <value>"`
/// segment per distinct value, segments joined with ", ".
pub fn format_custom_fields(fields: &BTreeMap<String, String>, language: Language) -> String {
    group_texts(fields, language).join(", ")
}

fn group_texts(fields: &BTreeMap<String, String>, language: Language) -> Vec<String> {
    group_annotations(fields)
        .into_iter()
        .map(|(value, tags)| format!("{} {}", join_list(&tags, language.conjunction()), value))
        .collect()
}

// =============================================================================
// Per-issue labels
// =============================================================================

/// What a label says about an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    StillOpen,
    ReturnedFromTesting,
    Reopened,
    CustomFields,
}

/// One piece of text shown after an issue's URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub kind: LabelKind,
    pub text: String,
}

/// Labels for one issue, in display order.
///
/// Every custom-field group becomes its own label.
pub fn issue_labels(result: &ClassificationResult, language: Language) -> Vec<Label> {
    let mut labels = Vec::new();
    let mut push = |kind, text: &str| {
        labels.push(Label {
            kind,
            text: text.to_string(),
        })
    };

    if result.still_open {
        push(LabelKind::StillOpen, language.still_open());
    }
    if result.returned_from_testing {
        push(LabelKind::ReturnedFromTesting, language.returned_from_testing());
    }
    if result.reopened_from_production {
        push(LabelKind::Reopened, language.reopened());
    }
    for text in group_texts(&result.custom_fields, language) {
        push(LabelKind::CustomFields, &text);
    }

    labels
}

// =============================================================================
// Summary
// =============================================================================

/// Aggregate counts over all results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub still_open: usize,
    pub returned_from_testing: usize,
    pub reopened_from_production: usize,
}

impl Summary {
    pub fn from_results(results: &[ClassificationResult]) -> Self {
        results.iter().fold(Summary::default(), |mut acc, r| {
            acc.total += 1;
            acc.still_open += usize::from(r.still_open);
            acc.returned_from_testing += usize::from(r.returned_from_testing);
            acc.reopened_from_production += usize::from(r.reopened_from_production);
            acc
        })
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Summary lines for the end of the report.
    ///
    /// With zero issues this is a single "no issues" line.
    pub fn lines(&self, language: Language) -> Vec<String> {
        let (Some(returned), Some(reopened)) = (
            percentage(self.returned_from_testing, self.total),
            percentage(self.reopened_from_production, self.total),
        ) else {
            return vec![language.no_issues().to_string()];
        };

        match language {
            Language::Russian => vec![
                format!("Всего {} задач", self.total),
                format!(
                    "Возвратов из тестирования {} шт ({})",
                    self.returned_from_testing, returned
                ),
                format!("Реопенов {} шт ({})", self.reopened_from_production, reopened),
            ],
            Language::English => vec![
                format!("Total {} issues", self.total),
                format!(
                    "Returned from testing: {} ({})",
                    self.returned_from_testing, returned
                ),
                format!("Reopened: {} ({})", self.reopened_from_production, reopened),
            ],
        }
    }
}

/// `count / total` as a percentage with two decimals, e.g. "30.00%".
///
/// Returns `None` when `total` is zero.
pub fn percentage(count: usize, total: usize) -> Option<String> {
    if total == 0 {
        return None;
    }
    Some(format!("{:.2}%", count as f64 / total as f64 * 100.0))
}
