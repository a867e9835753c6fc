//! Date-range predicate
//!
//! Ranges are anchored to the caller's "today". Weeks run Sunday through
//! Saturday; when today is a Sunday the week starts on today.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::Expense;

/// Named or explicit date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DateRange {
    Day,
    Week,
    #[default]
    Month,
    Year,
    All,
    /// Inclusive bounds. A missing bound makes the range match everything.
    Custom {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

impl DateRange {
    pub fn custom(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self::Custom { start, end }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
            Self::All => "all",
            Self::Custom { .. } => "custom",
        }
    }

    /// Resolve the range against `today` into concrete inclusive bounds
    pub fn predicate(&self, today: NaiveDate) -> RangePredicate {
        let bounds = match *self {
            Self::Day => Some((today, today)),
            Self::Week => Some(week_bounds(today)),
            Self::Month => Some(month_bounds(today.year(), today.month())),
            Self::Year => Some(year_bounds(today.year())),
            Self::All => None,
            Self::Custom {
                start: Some(start),
                end: Some(end),
            } => Some((start, end)),
            Self::Custom { .. } => None,
        };
        RangePredicate { bounds }
    }
}

impl std::str::FromStr for DateRange {
    type Err = String;

    /// Parses the named ranges. `custom` parses with no bounds; attach them
    /// with [`DateRange::custom`].
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" | "today" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            "all" => Ok(Self::All),
            "custom" => Ok(Self::Custom {
                start: None,
                end: None,
            }),
            _ => Err(format!(
                "Unknown range: {} (valid: day, week, month, year, all, custom)",
                s
            )),
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A resolved range; `bounds == None` accepts every date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangePredicate {
    bounds: Option<(NaiveDate, NaiveDate)>,
}

impl RangePredicate {
    /// Inclusive `(start, end)`, or `None` for an unbounded range
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.bounds
    }

    pub fn is_in_range(&self, date: NaiveDate) -> bool {
        match self.bounds {
            Some((start, end)) => start <= date && date <= end,
            None => true,
        }
    }

    /// Undated expenses never match, even an unbounded range
    pub fn matches(&self, expense: &Expense) -> bool {
        expense.date.is_some_and(|d| self.is_in_range(d))
    }
}

/// Sunday..Saturday week containing `day`
pub fn week_bounds(day: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = day - Duration::days(i64::from(day.weekday().num_days_from_sunday()));
    (start, start + Duration::days(6))
}

/// First and last day of a calendar month
pub fn month_bounds(year: i32, month: u32) -> (NaiveDate, NaiveDate) {
    let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN);
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let last = next.and_then(|d| d.pred_opt()).unwrap_or(NaiveDate::MAX);
    (first, last)
}

pub fn year_bounds(year: i32) -> (NaiveDate, NaiveDate) {
    (
        NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN),
        NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(NaiveDate::MAX),
    )
}

/// `(year, month)` of the calendar month before `day`'s month
pub fn previous_month(day: NaiveDate) -> (i32, u32) {
    if day.month() == 1 {
        (day.year() - 1, 12)
    } else {
        (day.year(), day.month() - 1)
    }
}
