//! Top project rule

use serde_json::json;

use crate::analytics::{group_sum_by_field, named_groups, top_groups};
use crate::models::GroupField;

use super::engine::{InsightContext, InsightRule};
use super::types::{Insight, InsightKind, Severity};

/// Names the highest-spending project. Expenses without a project are not
/// a project and never win.
pub struct TopProjectRule;

impl InsightRule for TopProjectRule {
    fn kind(&self) -> InsightKind {
        InsightKind::TopProject
    }

    fn name(&self) -> &'static str {
        "Top Project"
    }

    fn evaluate(&self, ctx: &InsightContext<'_>) -> Vec<Insight> {
        let projects = named_groups(&group_sum_by_field(ctx.expenses, GroupField::Project));
        let Some(top) = top_groups(&projects, 1).into_iter().next() else {
            return vec![];
        };

        vec![Insight::new(
            self.kind(),
            Severity::Info,
            format!(
                "Your project \"{}\" has the highest expenses ({:.2}).",
                top.key, top.total
            ),
        )
        .with_data(json!({
            "project": top.key,
            "total": top.total,
            "project_count": projects.len(),
        }))]
    }
}
