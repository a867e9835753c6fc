//! Expense Analytics Engine
//!
//! Pure functions over an in-memory expense list. Nothing here performs I/O,
//! reads ambient state, or mutates its input: every call takes the list and
//! "today" explicitly and returns freshly built values, so the same inputs
//! always produce the same outputs.
//!
//! - [`range`] - date-range predicate (day/week/month/year/all/custom)
//! - [`filter`] - category/project equality filters and their composition
//! - [`aggregate`] - sums, grouping, top-N, percent change
//! - [`series`] - monthly and cumulative series for charts
//! - [`summary`] - dashboard cards and recent expenses
//!
//! ## Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use tally_core::analytics::{group_sum_by_field, sum_amounts, DateRange, FilterCriteria};
//! use tally_core::models::{Expense, GroupField, Selector};
//!
//! let today = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
//! let expenses = vec![
//!     Expense::new("1", 100.0, "Food", NaiveDate::from_ymd_opt(2024, 3, 1)),
//!     Expense::new("2", 200.0, "Rent", NaiveDate::from_ymd_opt(2024, 3, 1)),
//! ];
//!
//! let filtered = FilterCriteria::new(DateRange::Month)
//!     .category(Selector::All)
//!     .apply(&expenses, today);
//! assert_eq!(sum_amounts(&filtered), 300.0);
//! assert_eq!(group_sum_by_field(&filtered, GroupField::Category).len(), 2);
//! ```

pub mod aggregate;
pub mod filter;
pub mod range;
pub mod series;
pub mod summary;

pub use aggregate::{
    average_amount, group_sum_by_field, named_groups, percent_change, relative_shares,
    sum_amounts, top_groups, GroupShare, GroupTotal, NEW_SPENDING_PERCENT,
};
pub use filter::{distinct_labels, filter_by_date, filter_by_exact, FilterCriteria};
pub use range::{DateRange, RangePredicate};
pub use series::{cumulative_series, monthly_series_for_year, CumulativePoint, MonthlyTotal};
pub use summary::{month_total, recent_expenses, SpendingSummary};
