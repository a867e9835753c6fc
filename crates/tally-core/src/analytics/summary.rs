//! Summary cards shown on the dashboard and profile views

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::aggregate::{average_amount, percent_change, sum_amounts};
use super::range::{month_bounds, previous_month};
use crate::models::Expense;

/// Headline totals for a user's expense list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingSummary {
    pub current_month_total: f64,
    pub previous_month_total: f64,
    pub all_time_total: f64,
    /// See [`percent_change`] for the zero-baseline policy
    pub percent_change: Option<f64>,
    pub expense_count: usize,
    pub average_amount: f64,
}

impl SpendingSummary {
    /// Compute the summary over the full list relative to `today`
    ///
    /// Month totals only count dated expenses; the all-time total counts
    /// every record.
    pub fn compute(expenses: &[Expense], today: NaiveDate) -> Self {
        let current_month_total = month_total(expenses, today.year(), today.month());
        let (prev_year, prev_month) = previous_month(today);
        let previous_month_total = month_total(expenses, prev_year, prev_month);

        Self {
            current_month_total,
            previous_month_total,
            all_time_total: sum_amounts(expenses),
            percent_change: percent_change(current_month_total, previous_month_total),
            expense_count: expenses.len(),
            average_amount: average_amount(expenses),
        }
    }
}

/// Total of dated expenses within a calendar month
pub fn month_total(expenses: &[Expense], year: i32, month: u32) -> f64 {
    let (start, end) = month_bounds(year, month);
    expenses
        .iter()
        .filter(|e| e.date.is_some_and(|d| start <= d && d <= end))
        .map(|e| e.amount)
        .sum()
}

/// The `limit` most recent expenses, newest first
///
/// Equal dates keep input order; undated expenses sort last.
pub fn recent_expenses(expenses: &[Expense], limit: usize) -> Vec<Expense> {
    let mut sorted = expenses.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(limit);
    sorted
}
