//! Time series for charts

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::Expense;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Total for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    /// 0 = January
    pub month_index: u32,
    pub label: String,
    pub total: f64,
}

/// One step of a running total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativePoint {
    pub date: NaiveDate,
    pub amount: f64,
    pub running_total: f64,
}

/// Twelve monthly totals for `year`, January first. Months without
/// spending report 0; undated expenses are skipped.
pub fn monthly_series_for_year(expenses: &[Expense], year: i32) -> Vec<MonthlyTotal> {
    let mut totals = [0.0_f64; 12];

    for expense in expenses {
        if let Some(date) = expense.date.filter(|d| d.year() == year) {
            totals[date.month0() as usize] += expense.amount;
        }
    }

    totals
        .iter()
        .zip(MONTH_LABELS)
        .enumerate()
        .map(|(i, (total, label))| MonthlyTotal {
            month_index: i as u32,
            label: label.to_string(),
            total: *total,
        })
        .collect()
}

/// Running total ordered by date ascending
///
/// Expenses sharing a date keep their input order. Undated expenses are
/// skipped.
pub fn cumulative_series(expenses: &[Expense]) -> Vec<CumulativePoint> {
    let mut dated: Vec<(NaiveDate, f64)> = expenses
        .iter()
        .filter_map(|e| e.date.map(|d| (d, e.amount)))
        .collect();
    // sort_by_key is stable
    dated.sort_by_key(|(date, _)| *date);

    let mut running_total = 0.0;
    dated
        .into_iter()
        .map(|(date, amount)| {
            running_total += amount;
            CumulativePoint {
                date,
                amount,
                running_total,
            }
        })
        .collect()
}
