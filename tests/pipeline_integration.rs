//! Integration tests for the analysis pipeline.
//!
//! These tests drive the full Search -> Fetch -> Assemble -> Classify ->
//! Summarize flow against MockTracker and render the results the way the
//! analyze command does.

use jiratrack::core::raw::{RawChangelog, RawComment, RawHistory, RawIssue, RawItem, RawUser};
use jiratrack::engine::{analyze, sort_results_by_key, AnalysisRequest, RunError};
use jiratrack::export::write_xlsx;
use jiratrack::report::Language;
use jiratrack::tracker::mock::{FailOn, MockTracker};
use jiratrack::tracker::TrackerError;
use jiratrack::ui::output::{format_report, SEPARATOR};

// =============================================================================
// Fixtures
// =============================================================================

const ME: &str = "alice";

fn user(name: &str) -> Option<RawUser> {
    Some(RawUser {
        name: Some(name.to_string()),
        ..Default::default()
    })
}

fn status(at: &str, author: &str, to: &str) -> RawHistory {
    RawHistory {
        created: Some(at.to_string()),
        author: user(author),
        items: vec![RawItem {
            field: Some("status".to_string()),
            from_value: None,
            to_value: Some(to.to_string()),
        }],
    }
}

fn comment(at: &str, author: &str, body: &str) -> RawComment {
    RawComment {
        created: Some(at.to_string()),
        author: user(author),
        body: Some(body.to_string()),
    }
}

fn issue(key: &str, histories: Vec<RawHistory>, comments: Vec<RawComment>) -> RawIssue {
    RawIssue {
        key: key.to_string(),
        changelog: RawChangelog { histories },
        comments,
    }
}

/// Four issues: returned from testing, reopened, untouched, and annotated.
fn project() -> Vec<RawIssue> {
    vec![
        issue(
            "CORE-10",
            vec![
                status("2020-07-01T10:00:00.000+0000", ME, "In Progress"),
                status("2020-07-02T10:00:00.000+0000", ME, "Test Backlog"),
                status("2020-07-03T10:00:00.000+0000", ME, "In Progress"),
            ],
            vec![],
        ),
        issue(
            "CORE-9",
            vec![
                status("2020-07-01T10:00:00.000+0000", ME, "In Progress"),
                status("2020-07-02T10:00:00.000+0000", "bob", "Closed"),
                status("2020-07-03T10:00:00.000+0000", ME, "In Progress"),
            ],
            vec![],
        ),
        issue(
            "CORE-2",
            vec![status("2020-07-01T10:00:00.000+0000", "bob", "Open")],
            vec![],
        ),
        issue(
            "CORE-1",
            vec![status("2020-07-05T10:00:00.000+0000", "bob", "Resolved")],
            vec![
                comment("2020-07-04T10:00:00.000+0000", ME, "/priority high\n/owner high"),
                comment("2020-07-04T11:00:00.000+0000", "bob", "/priority low"),
            ],
        ),
    ]
}

fn request() -> AnalysisRequest {
    AnalysisRequest::new("CORE", ME)
}

// =============================================================================
// Pipeline
// =============================================================================

#[tokio::test]
async fn classifies_every_issue_in_search_order() {
    let tracker = MockTracker::with_issues(project());
    let analysis = analyze(&tracker, &request(), 3).await.unwrap();

    let keys: Vec<&str> = analysis.results.iter().map(|r| r.issue_key.as_str()).collect();
    assert_eq!(keys, ["CORE-10", "CORE-9", "CORE-2", "CORE-1"]);

    let returned = &analysis.results[0];
    assert!(returned.returned_from_testing);
    assert!(!returned.reopened_from_production);
    assert!(returned.still_open);

    let reopened = &analysis.results[1];
    assert!(reopened.reopened_from_production);
    assert!(!reopened.returned_from_testing);
    assert!(!reopened.still_open);

    let untouched = &analysis.results[2];
    assert!(untouched.still_open);
    assert!(untouched.custom_fields.is_empty());
    assert!(untouched.first_annotation_time.is_none());

    let annotated = &analysis.results[3];
    assert!(!annotated.still_open);
    assert_eq!(annotated.custom_fields.get("priority").map(String::as_str), Some("high"));
    assert_eq!(annotated.custom_fields.get("owner").map(String::as_str), Some("high"));
    assert_eq!(annotated.url.as_deref(), Some("https://jira.mock/browse/CORE-1"));
}

#[tokio::test]
async fn summary_counts_match_results() {
    let tracker = MockTracker::with_issues(project());
    let analysis = analyze(&tracker, &request(), 1).await.unwrap();

    assert_eq!(analysis.summary.total, 4);
    assert_eq!(analysis.summary.still_open, 2);
    assert_eq!(analysis.summary.returned_from_testing, 1);
    assert_eq!(analysis.summary.reopened_from_production, 1);
    assert_eq!(
        analysis.summary.lines(Language::Russian),
        vec![
            "Всего 4 задач",
            "Возвратов из тестирования 1 шт (25.00%)",
            "Реопенов 1 шт (25.00%)",
        ]
    );
}

#[tokio::test]
async fn limit_caps_fetches() {
    let tracker = MockTracker::with_issues(project());
    let analysis = analyze(&tracker, &request().with_limit(2), 2).await.unwrap();

    assert_eq!(analysis.results.len(), 2);
    assert_eq!(tracker.fetch_count(), 2);
}

#[tokio::test]
async fn sort_by_key_is_natural() {
    let tracker = MockTracker::with_issues(project());
    let mut analysis = analyze(&tracker, &request(), 4).await.unwrap();

    sort_results_by_key(&mut analysis.results);
    let keys: Vec<&str> = analysis.results.iter().map(|r| r.issue_key.as_str()).collect();
    assert_eq!(keys, ["CORE-1", "CORE-2", "CORE-9", "CORE-10"]);
}

#[tokio::test]
async fn fetch_failure_aborts_the_run() {
    let tracker = MockTracker::with_issues(project())
        .fail_on(FailOn::FetchIssue("CORE-2".into(), TrackerError::RateLimited));

    let err = analyze(&tracker, &request(), 2).await.unwrap_err();
    match err {
        RunError::Fetch { key, source } => {
            assert_eq!(key, "CORE-2");
            assert_eq!(source, TrackerError::RateLimited);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn malformed_record_aborts_the_run() {
    let mut issues = project();
    issues[0].comments.push(RawComment {
        created: Some("2020-07-01T10:00:00.000+0000".into()),
        author: None,
        body: Some("who wrote this?".into()),
    });
    let tracker = MockTracker::with_issues(issues);

    let err = analyze(&tracker, &request(), 2).await.unwrap_err();
    assert!(matches!(err, RunError::History(_)));
    assert!(err.to_string().contains("CORE-10"));
}

// =============================================================================
// Rendering
// =============================================================================

#[tokio::test]
async fn english_report_lists_issues_then_summary() {
    let tracker = MockTracker::with_issues(project());
    let analysis = analyze(&tracker, &request(), 2).await.unwrap();

    let lines = format_report(&analysis.results, &analysis.summary, Language::English, false);
    assert_eq!(lines.len(), 4 + 1 + 3);
    assert_eq!(
        lines[0],
        "https://jira.mock/browse/CORE-10 Still open Returned from testing"
    );
    assert_eq!(lines[1], "https://jira.mock/browse/CORE-9 Reopened");
    assert_eq!(lines[3], "https://jira.mock/browse/CORE-1 owner and priority high");
    assert_eq!(lines[4], SEPARATOR);
    assert_eq!(lines[5], "Total 4 issues");
}

#[tokio::test]
async fn empty_project_reports_no_issues() {
    let tracker = MockTracker::new();
    let analysis = analyze(&tracker, &request(), 6).await.unwrap();

    assert!(analysis.results.is_empty());
    assert_eq!(tracker.fetch_count(), 0);

    let lines = format_report(&analysis.results, &analysis.summary, Language::Russian, false);
    assert_eq!(lines, vec!["Задач не найдено"]);
}

#[tokio::test]
async fn spreadsheet_written_for_analysis() {
    let tracker = MockTracker::with_issues(project());
    let analysis = analyze(&tracker, &request(), 2).await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.xlsx");
    write_xlsx(&analysis.results, Language::Russian, &path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"PK"));
}
