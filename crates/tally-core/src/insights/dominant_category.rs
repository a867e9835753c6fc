//! Dominant category rule

use serde_json::json;

use crate::analytics::{group_sum_by_field, sum_amounts, top_groups};
use crate::models::GroupField;

use super::engine::{InsightContext, InsightRule};
use super::types::{Insight, InsightKind, Severity};

/// Flags the largest category when its share of total spend exceeds the
/// configured fraction
pub struct DominantCategoryRule;

impl InsightRule for DominantCategoryRule {
    fn kind(&self) -> InsightKind {
        InsightKind::DominantCategory
    }

    fn name(&self) -> &'static str {
        "Dominant Category"
    }

    fn evaluate(&self, ctx: &InsightContext<'_>) -> Vec<Insight> {
        let total = sum_amounts(ctx.expenses);
        if total <= 0.0 {
            return vec![];
        }

        let groups = group_sum_by_field(ctx.expenses, GroupField::Category);
        let Some(top) = top_groups(&groups, 1).into_iter().next() else {
            return vec![];
        };

        let share = top.total / total;
        if share <= ctx.thresholds.dominant_category_share {
            return vec![];
        }

        vec![Insight::new(
            self.kind(),
            Severity::Info,
            format!(
                "A large portion of your spending is on {} ({:.2}, {:.0}% of total). Review if this aligns with your priorities.",
                top.key,
                top.total,
                share * 100.0
            ),
        )
        .with_data(json!({
            "category": top.key,
            "total": top.total,
            "share": share,
        }))]
    }
}
