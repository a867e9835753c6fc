//! High daily average rule
//!
//! Averages spend over a trailing window of calendar days ending today.
//! The divisor is always the window length, not the number of days with
//! spending.

use chrono::Duration;
use serde_json::json;

use super::engine::{InsightContext, InsightRule};
use super::types::{Insight, InsightKind, Severity};

pub struct DailyAverageRule;

impl DailyAverageRule {
    /// Average spend per day over the trailing window
    pub fn trailing_average(ctx: &InsightContext<'_>) -> f64 {
        let days = ctx.thresholds.trailing_days.max(1);
        let window_start = ctx.today - Duration::days(i64::from(days) - 1);

        let total: f64 = ctx
            .expenses
            .iter()
            .filter(|e| e.date.is_some_and(|d| window_start <= d && d <= ctx.today))
            .map(|e| e.amount)
            .sum();

        total / f64::from(days)
    }
}

impl InsightRule for DailyAverageRule {
    fn kind(&self) -> InsightKind {
        InsightKind::HighDailyAverage
    }

    fn name(&self) -> &'static str {
        "High Daily Average"
    }

    fn evaluate(&self, ctx: &InsightContext<'_>) -> Vec<Insight> {
        let average = Self::trailing_average(ctx);
        if average <= ctx.thresholds.daily_average_threshold {
            return vec![];
        }

        let days = ctx.thresholds.trailing_days;
        vec![Insight::new(
            self.kind(),
            Severity::Warning,
            format!(
                "Your average daily spending over the last {} days is high ({:.2}). Consider reviewing your budget.",
                days, average
            ),
        )
        .with_data(json!({
            "average_daily": average,
            "threshold": ctx.thresholds.daily_average_threshold,
            "days": days,
        }))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InsightThresholds;
    use crate::models::Expense;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_fires_above_threshold() {
        let thresholds = InsightThresholds::default();
        let today = d(2024, 3, 30);
        let expenses = vec![Expense::new("1", 3030.0, "Rent", Some(d(2024, 3, 1)))];
        let ctx = InsightContext::new(&expenses, today, &thresholds);

        let insights = DailyAverageRule.evaluate(&ctx);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].severity, Severity::Warning);
        assert!(insights[0].message.contains("101.00"));
        assert_eq!(insights[0].data["average_daily"], 101.0);
    }

    #[test]
    fn test_window_is_thirty_days_inclusive() {
        let thresholds = InsightThresholds::default();
        let today = d(2024, 3, 30);
        let expenses = vec![
            // First day of the window
            Expense::new("1", 30.0, "A", Some(d(2024, 3, 1))),
            // One day before the window
            Expense::new("2", 1000.0, "A", Some(d(2024, 2, 29))),
            // Future-dated
            Expense::new("3", 1000.0, "A", Some(d(2024, 3, 31))),
            Expense::new("4", 1000.0, "A", None),
        ];
        let ctx = InsightContext::new(&expenses, today, &thresholds);
        assert_eq!(DailyAverageRule::trailing_average(&ctx), 1.0);
        assert!(DailyAverageRule.evaluate(&ctx).is_empty());
    }

    #[test]
    fn test_exactly_at_threshold_does_not_fire() {
        let thresholds = InsightThresholds::default();
        let today = d(2024, 3, 30);
        let expenses = vec![Expense::new("1", 3000.0, "Rent", Some(today))];
        let ctx = InsightContext::new(&expenses, today, &thresholds);
        assert!(DailyAverageRule.evaluate(&ctx).is_empty());
    }

    #[test]
    fn test_custom_threshold() {
        let thresholds = InsightThresholds {
            daily_average_threshold: 5.0,
            trailing_days: 7,
            ..Default::default()
        };
        let today = d(2024, 3, 30);
        let expenses = vec![Expense::new("1", 42.0, "Food", Some(d(2024, 3, 24)))];
        let ctx = InsightContext::new(&expenses, today, &thresholds);

        let insights = DailyAverageRule.evaluate(&ctx);
        assert_eq!(insights.len(), 1);
        assert!(insights[0].message.contains("last 7 days"));
    }
}
