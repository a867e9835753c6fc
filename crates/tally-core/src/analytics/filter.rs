//! Expense filters
//!
//! A filter is the conjunction of three independent predicates: date range,
//! category, and project. Each one is usable on its own.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::range::DateRange;
use crate::models::{Expense, GroupField, GroupKey, Selector};

/// Filter parameters as chosen in the UI
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub range: DateRange,
    pub category: Selector,
    pub project: Selector,
}

impl FilterCriteria {
    pub fn new(range: DateRange) -> Self {
        Self {
            range,
            ..Default::default()
        }
    }

    pub fn category(mut self, selector: Selector) -> Self {
        self.category = selector;
        self
    }

    pub fn project(mut self, selector: Selector) -> Self {
        self.project = selector;
        self
    }

    /// Apply all three predicates
    pub fn apply(&self, expenses: &[Expense], today: NaiveDate) -> Vec<Expense> {
        let in_range = self.range.predicate(today);
        expenses
            .iter()
            .filter(|e| in_range.matches(e))
            .filter(|e| e.matches(GroupField::Category, &self.category))
            .filter(|e| e.matches(GroupField::Project, &self.project))
            .cloned()
            .collect()
    }
}

/// Expenses whose date falls in `range` relative to `today`
pub fn filter_by_date(expenses: &[Expense], range: DateRange, today: NaiveDate) -> Vec<Expense> {
    let in_range = range.predicate(today);
    expenses
        .iter()
        .filter(|e| in_range.matches(e))
        .cloned()
        .collect()
}

/// Expenses whose `field` matches `selector` exactly
pub fn filter_by_exact(
    expenses: &[Expense],
    field: GroupField,
    selector: &Selector,
) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|e| e.matches(field, selector))
        .cloned()
        .collect()
}

/// Distinct labels of `field`, in first-occurrence order
///
/// The no-project group is not a label and is never included.
pub fn distinct_labels(expenses: &[Expense], field: GroupField) -> Vec<String> {
    let mut seen = HashSet::new();
    expenses
        .iter()
        .filter_map(|e| match e.key(field) {
            GroupKey::Label(label) => Some(label),
            GroupKey::Unassigned => None,
        })
        .filter(|label| seen.insert(label.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn sample() -> Vec<Expense> {
        vec![
            Expense::new("1", 100.0, "Food", Some(d(2024, 3, 1))).with_project("Trip"),
            Expense::new("2", 50.0, "Food", Some(d(2024, 3, 15))),
            Expense::new("3", 200.0, "Rent", Some(d(2024, 3, 1))),
            Expense::new("4", 30.0, "Travel", Some(d(2024, 2, 10))).with_project("Trip"),
            Expense::new("5", 12.0, "Food", None),
        ]
    }

    #[test]
    fn test_filter_by_date_month() {
        let expenses = sample();
        let march = filter_by_date(&expenses, DateRange::Month, d(2024, 3, 20));
        let ids: Vec<_> = march.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_filter_by_date_all_drops_undated() {
        let expenses = sample();
        let all = filter_by_date(&expenses, DateRange::All, d(2024, 3, 20));
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn test_filter_by_exact_all_is_noop() {
        let expenses = sample();
        assert_eq!(
            filter_by_exact(&expenses, GroupField::Category, &Selector::All),
            expenses
        );
    }

    #[test]
    fn test_filter_by_exact_no_project() {
        let expenses = sample();
        let bare = filter_by_exact(&expenses, GroupField::Project, &Selector::unassigned());
        let ids: Vec<_> = bare.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3", "5"]);
    }

    #[test]
    fn test_filters_commute() {
        let expenses = sample();
        let categories = [Selector::All, Selector::label("Food"), Selector::label("Rent")];
        let projects = [Selector::All, Selector::label("Trip"), Selector::unassigned()];

        for c in &categories {
            for p in &projects {
                let cp = filter_by_exact(
                    &filter_by_exact(&expenses, GroupField::Category, c),
                    GroupField::Project,
                    p,
                );
                let pc = filter_by_exact(
                    &filter_by_exact(&expenses, GroupField::Project, p),
                    GroupField::Category,
                    c,
                );
                assert_eq!(cp, pc, "category {:?} / project {:?}", c, p);
            }
        }
    }

    #[test]
    fn test_criteria_apply_matches_composition() {
        let expenses = sample();
        let today = d(2024, 3, 20);
        let criteria = FilterCriteria::new(DateRange::Month)
            .category(Selector::label("Food"))
            .project(Selector::label("Trip"));

        let composed = filter_by_exact(
            &filter_by_exact(
                &filter_by_date(&expenses, DateRange::Month, today),
                GroupField::Category,
                &Selector::label("Food"),
            ),
            GroupField::Project,
            &Selector::label("Trip"),
        );

        assert_eq!(criteria.apply(&expenses, today), composed);
        assert_eq!(composed.len(), 1);
        assert_eq!(composed[0].id, "1");
    }

    #[test]
    fn test_filters_do_not_mutate_input() {
        let expenses = sample();
        let before = expenses.clone();
        let _ = FilterCriteria::new(DateRange::Week).apply(&expenses, d(2024, 3, 20));
        let _ = filter_by_exact(&expenses, GroupField::Project, &Selector::unassigned());
        assert_eq!(expenses, before);
    }

    #[test]
    fn test_distinct_labels() {
        let expenses = sample();
        assert_eq!(
            distinct_labels(&expenses, GroupField::Category),
            vec!["Food", "Rent", "Travel"]
        );
        assert_eq!(distinct_labels(&expenses, GroupField::Project), vec!["Trip"]);
    }
}
