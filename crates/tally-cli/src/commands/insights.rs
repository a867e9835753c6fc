//! Insight command

use anyhow::Result;
use tally_core::insights::{InsightContext, InsightEngine};
use tally_core::{DateRange, Severity};

use super::core::AppContext;
use super::print_json;
use crate::cli::FilterArgs;

pub async fn cmd_insights(ctx: &AppContext, filters: &FilterArgs) -> Result<()> {
    let (_, expenses) = ctx.load_filtered(filters, DateRange::Month).await?;

    let engine = InsightEngine::new();
    tracing::debug!(rules = ?engine.rule_names(), "Running insight rules");
    let insight_ctx = InsightContext::new(&expenses, ctx.today, &ctx.config.insights);
    let insights = engine.analyze(&insight_ctx);

    if ctx.json {
        return print_json(&insights);
    }

    println!();
    println!("💡 Insights ({} expenses analyzed)", expenses.len());
    println!("   ─────────────────────────────────────────────────────────────");
    for insight in &insights {
        let icon = match insight.severity {
            Severity::Warning => "⚠️ ",
            Severity::Info => "ℹ️ ",
        };
        println!("   {} {}", icon, insight.message);
    }
    println!();

    Ok(())
}
