//! Insight engine - runs the registered rules over one expense list

use chrono::NaiveDate;

use crate::config::InsightThresholds;
use crate::models::Expense;

use super::types::{Insight, InsightKind, Severity};
use super::{DailyAverageRule, DominantCategoryRule, TopProjectRule};

/// Inputs shared by every rule
pub struct InsightContext<'a> {
    /// The (already filtered) expenses to analyze
    pub expenses: &'a [Expense],
    /// Reference day for trailing windows
    pub today: NaiveDate,
    pub thresholds: &'a InsightThresholds,
}

impl<'a> InsightContext<'a> {
    pub fn new(
        expenses: &'a [Expense],
        today: NaiveDate,
        thresholds: &'a InsightThresholds,
    ) -> Self {
        Self {
            expenses,
            today,
            thresholds,
        }
    }
}

/// A single, independent insight rule
pub trait InsightRule: Send + Sync {
    fn kind(&self) -> InsightKind;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Zero or more insights; must not depend on anything outside `ctx`
    fn evaluate(&self, ctx: &InsightContext<'_>) -> Vec<Insight>;
}

/// Runs every registered rule and collects their insights
pub struct InsightEngine {
    rules: Vec<Box<dyn InsightRule>>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create an engine with the built-in rules
    pub fn new() -> Self {
        let mut engine = Self::empty();
        engine.register(Box::new(DailyAverageRule));
        engine.register(Box::new(DominantCategoryRule));
        engine.register(Box::new(TopProjectRule));
        engine
    }

    /// Create an engine with no rules registered
    pub fn empty() -> Self {
        Self { rules: vec![] }
    }

    pub fn register(&mut self, rule: Box<dyn InsightRule>) {
        self.rules.push(rule);
    }

    /// Evaluate all rules
    ///
    /// An empty list yields a single "no data" insight and no rule runs.
    /// Results are ordered by severity (warnings first), then by rule
    /// registration order.
    pub fn analyze(&self, ctx: &InsightContext<'_>) -> Vec<Insight> {
        if ctx.expenses.is_empty() {
            return vec![no_data()];
        }

        let mut insights = Vec::new();
        for rule in &self.rules {
            let produced = rule.evaluate(ctx);
            tracing::debug!(
                rule = rule.name(),
                kind = rule.kind().as_str(),
                count = produced.len(),
                "Insight rule evaluated"
            );
            insights.extend(produced);
        }

        // Stable: rules with equal severity keep registration order
        insights.sort_by(|a, b| b.severity.priority().cmp(&a.severity.priority()));
        insights
    }

    /// Kinds of the registered rules
    pub fn rule_kinds(&self) -> Vec<InsightKind> {
        self.rules.iter().map(|r| r.kind()).collect()
    }

    /// Human-readable names of the registered rules, in registration order
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }
}

fn no_data() -> Insight {
    Insight::new(
        InsightKind::NoData,
        Severity::Info,
        "No expense data is available for the selected filters.",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_engine_creation() {
        let kinds = InsightEngine::new().rule_kinds();
        assert_eq!(
            kinds,
            vec![
                InsightKind::HighDailyAverage,
                InsightKind::DominantCategory,
                InsightKind::TopProject
            ]
        );
    }

    #[test]
    fn test_rule_names() {
        assert_eq!(
            InsightEngine::new().rule_names(),
            vec!["High Daily Average", "Dominant Category", "Top Project"]
        );
        assert!(InsightEngine::empty().rule_names().is_empty());
    }

    #[test]
    fn test_empty_list_short_circuits() {
        let thresholds = InsightThresholds::default();
        let ctx = InsightContext::new(&[], d(2024, 3, 20), &thresholds);
        let insights = InsightEngine::new().analyze(&ctx);

        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::NoData);
        assert_eq!(insights[0].severity, Severity::Info);
    }

    #[test]
    fn test_empty_engine_on_data_yields_nothing() {
        let thresholds = InsightThresholds::default();
        let expenses = vec![Expense::new("1", 5.0, "Food", Some(d(2024, 3, 1)))];
        let ctx = InsightContext::new(&expenses, d(2024, 3, 20), &thresholds);
        assert!(InsightEngine::empty().analyze(&ctx).is_empty());
    }

    #[test]
    fn test_warnings_sorted_first() {
        let thresholds = InsightThresholds::default();
        let today = d(2024, 3, 20);
        let expenses = vec![
            Expense::new("1", 3000.0, "Rent", Some(today)).with_project("Flat"),
            Expense::new("2", 500.0, "Food", Some(today)),
        ];
        let ctx = InsightContext::new(&expenses, today, &thresholds);
        let insights = InsightEngine::new().analyze(&ctx);

        let kinds: Vec<_> = insights.iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![
                InsightKind::HighDailyAverage,
                InsightKind::DominantCategory,
                InsightKind::TopProject
            ]
        );
        assert_eq!(insights[0].severity, Severity::Warning);
    }

    #[test]
    fn test_analyze_is_deterministic() {
        let thresholds = InsightThresholds::default();
        let today = d(2024, 3, 20);
        let expenses = vec![
            Expense::new("1", 4000.0, "Rent", Some(d(2024, 3, 2))).with_project("Flat"),
            Expense::new("2", 20.0, "Food", Some(d(2024, 3, 10))).with_project("Trip"),
        ];
        let ctx = InsightContext::new(&expenses, today, &thresholds);
        let engine = InsightEngine::new();
        assert_eq!(engine.analyze(&ctx), engine.analyze(&ctx));
    }
}
