//! Integration tests for tally-core
//!
//! These tests exercise the full load → filter → aggregate → insight workflow.

use chrono::NaiveDate;
use tally_core::{
    analytics::{
        cumulative_series, filter_by_date, group_sum_by_field, monthly_series_for_year,
        percent_change, sum_amounts, top_groups,
    },
    config::InsightThresholds,
    export::expenses_to_csv,
    insights::{InsightContext, InsightEngine, InsightKind, Severity},
    models::{GroupField, GroupKey},
    DateRange, Expense, ExpenseSource, ExportOptions, FileSource, FilterCriteria, Selector,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

/// Backend-shaped document: `_id` keys, ISO timestamps, blank projects
fn backend_document() -> &'static str {
    r#"{"user": {"username": "sara", "currency": "USD", "expenses": [
        {"_id": "a1", "amount": 100, "category": "Food", "date": "2024-03-01T00:00:00.000Z"},
        {"_id": "a2", "amount": 50, "category": "Food", "date": "2024-03-15", "project": "Trip"},
        {"_id": "a3", "amount": 200, "category": "Rent", "date": "2024-03-01", "project": ""},
        {"_id": "a4", "amount": 80, "category": "Travel", "date": "2024-02-10", "project": "Trip"},
        {"_id": "a5", "amount": 15, "category": "Food", "date": "not a date"}
    ]}}"#
}

fn scenario_a() -> Vec<Expense> {
    vec![
        Expense::new("1", 100.0, "Food", Some(d(2024, 3, 1))),
        Expense::new("2", 50.0, "Food", Some(d(2024, 3, 15))),
        Expense::new("3", 200.0, "Rent", Some(d(2024, 3, 1))),
    ]
}

// =============================================================================
// Analytics
// =============================================================================

#[test]
fn test_month_totals_by_category() {
    let expenses = filter_by_date(&scenario_a(), DateRange::Month, d(2024, 3, 20));
    assert_eq!(sum_amounts(&expenses), 350.0);

    let groups = group_sum_by_field(&expenses, GroupField::Category);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].key, GroupKey::from("Food"));
    assert_eq!(groups[0].total, 150.0);
    assert_eq!(groups[1].key, GroupKey::from("Rent"));
    assert_eq!(groups[1].total, 200.0);
}

#[test]
fn test_percent_change_policy() {
    assert_eq!(percent_change(0.0, 0.0), None);
    assert_eq!(percent_change(150.0, 0.0), Some(100.0));
    assert_eq!(percent_change(50.0, 100.0), Some(-50.0));
}

#[test]
fn test_empty_list() {
    assert_eq!(sum_amounts(&[]), 0.0);
    assert!(group_sum_by_field(&[], GroupField::Category).is_empty());

    let thresholds = InsightThresholds::default();
    let ctx = InsightContext::new(&[], d(2024, 3, 20), &thresholds);
    let insights = InsightEngine::new().analyze(&ctx);
    assert_eq!(insights.len(), 1);
    assert_eq!(insights[0].kind, InsightKind::NoData);
    assert_eq!(insights[0].severity, Severity::Info);
}

#[test]
fn test_open_custom_range_matches_all() {
    let today = d(2024, 3, 20);
    let expenses = scenario_a();
    let open = filter_by_date(&expenses, DateRange::custom(None, Some(d(2024, 3, 2))), today);
    let all = filter_by_date(&expenses, DateRange::All, today);
    assert_eq!(open, all);
}

#[test]
fn test_cumulative_sorted_by_date() {
    let expenses = vec![
        Expense::new("1", 10.0, "A", Some(d(2024, 1, 2))),
        Expense::new("2", 5.0, "A", Some(d(2024, 1, 1))),
    ];
    let series = cumulative_series(&expenses);
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].date, d(2024, 1, 1));
    assert_eq!(series[0].running_total, 5.0);
    assert_eq!(series[1].date, d(2024, 1, 2));
    assert_eq!(series[1].running_total, 15.0);
}

#[test]
fn test_filters_are_idempotent_and_non_mutating() {
    let expenses = scenario_a();
    let snapshot = expenses.clone();
    let criteria = FilterCriteria::new(DateRange::Month).category(Selector::label("Food"));

    let once = criteria.apply(&expenses, d(2024, 3, 20));
    let twice = criteria.apply(&once, d(2024, 3, 20));

    assert_eq!(once, twice);
    assert_eq!(expenses, snapshot);
}

// =============================================================================
// Full workflow
// =============================================================================

#[tokio::test]
async fn test_file_to_report_workflow() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("expenses.json");
    std::fs::write(&path, backend_document()).unwrap();

    let profile = FileSource::new(&path).fetch_profile().await.unwrap();
    assert_eq!(profile.username, "sara");
    assert_eq!(profile.expenses.len(), 5);

    // Unparseable dates load as undated and never match a range
    assert!(profile.expenses[4].date.is_none());
    let today = d(2024, 3, 20);
    let march = FilterCriteria::new(DateRange::Month).apply(&profile.expenses, today);
    assert_eq!(sum_amounts(&march), 350.0);

    // Blank project is the unassigned group
    let no_project = FilterCriteria::new(DateRange::All)
        .project(Selector::unassigned())
        .apply(&profile.expenses, today);
    assert_eq!(no_project.len(), 2);

    let projects = group_sum_by_field(&profile.expenses, GroupField::Project);
    let top = top_groups(&projects, 1);
    // Undated records still count toward group totals
    assert_eq!(top[0].key, GroupKey::Unassigned);
    assert_eq!(top[0].total, 315.0);

    let monthly = monthly_series_for_year(&profile.expenses, 2024);
    assert_eq!(monthly.len(), 12);
    assert_eq!(monthly[1].total, 80.0);
    assert_eq!(monthly[2].total, 350.0);

    let thresholds = InsightThresholds::default();
    let ctx = InsightContext::new(&march, today, &thresholds);
    let kinds: Vec<_> = InsightEngine::new()
        .analyze(&ctx)
        .into_iter()
        .map(|i| i.kind)
        .collect();
    // 200 of 350 is Rent; Trip is the only named project
    assert!(kinds.contains(&InsightKind::DominantCategory));
    assert!(kinds.contains(&InsightKind::TopProject));
    assert!(!kinds.contains(&InsightKind::HighDailyAverage));

    let csv = expenses_to_csv(
        &march,
        &ExportOptions {
            username: profile.username.clone(),
            bom: false,
        },
    )
    .unwrap();
    assert_eq!(csv.lines().count(), 4);
    assert!(csv.contains("2024-03-15,Food,Trip,,50,sara"));
}
