//! Report command implementations

use anyhow::Result;
use chrono::Datelike;
use serde_json::json;
use tally_core::analytics::{
    cumulative_series, distinct_labels, group_sum_by_field, monthly_series_for_year,
    recent_expenses, relative_shares, sum_amounts, top_groups,
};
use tally_core::{DateRange, GroupField, GroupTotal, SpendingSummary};

use super::core::AppContext;
use super::{print_json, truncate};
use crate::cli::FilterArgs;

fn format_change(change: Option<f64>) -> String {
    match change {
        Some(pct) => format!("{:+.1}%", pct),
        None => "n/a".to_string(),
    }
}

pub async fn cmd_summary(ctx: &AppContext) -> Result<()> {
    let profile = ctx.load_profile().await?;
    let summary = SpendingSummary::compute(&profile.expenses, ctx.today);

    if ctx.json {
        return print_json(&summary);
    }

    let currency = profile.currency.as_deref().unwrap_or("");

    println!();
    if profile.username.is_empty() {
        println!("📊 Spending Summary");
    } else {
        println!("📊 Spending Summary for {}", profile.username);
    }
    println!("   As of {}", ctx.today);
    println!("   ─────────────────────────────────────────────");
    println!(
        "   This month:      {:>12.2} {}",
        summary.current_month_total, currency
    );
    println!(
        "   Last month:      {:>12.2} {}",
        summary.previous_month_total, currency
    );
    println!(
        "   Change:          {:>12}",
        format_change(summary.percent_change)
    );
    println!(
        "   All time:        {:>12.2} {}",
        summary.all_time_total, currency
    );
    println!("   Expenses:        {:>12}", summary.expense_count);
    println!(
        "   Average expense: {:>12.2} {}",
        summary.average_amount, currency
    );
    println!();

    Ok(())
}

fn print_group_table(title: &str, header: &str, groups: &[GroupTotal], total: f64) {
    println!();
    println!("📊 {}", title);
    println!("   ─────────────────────────────────────────────────────────────");

    if groups.is_empty() {
        println!("   No expenses match these filters.");
        return;
    }

    println!("   Total: {:.2}", total);
    println!();
    println!(
        "   {:25} │ {:>10} │ {:>6} │ {:>5}",
        header, "Amount", "%", "Count"
    );
    println!("   ──────────────────────────┼────────────┼────────┼───────");
    for group in groups {
        let pct = if total > 0.0 {
            group.total / total * 100.0
        } else {
            0.0
        };
        println!(
            "   {:25} │ {:>10.2} │ {:>5.1}% │ {:>5}",
            truncate(&group.key.to_string(), 25),
            group.total,
            pct,
            group.count
        );
    }
    println!();
}

async fn cmd_report_grouped(
    ctx: &AppContext,
    filters: &FilterArgs,
    field: GroupField,
) -> Result<()> {
    let (_, expenses) = ctx.load_filtered(filters, DateRange::Month).await?;
    let groups = group_sum_by_field(&expenses, field);
    let total = sum_amounts(&expenses);

    if ctx.json {
        return print_json(&json!({ "total": total, "groups": groups }));
    }

    let (title, header) = match field {
        GroupField::Category => ("Spending by Category", "Category"),
        GroupField::Project => ("Spending by Project", "Project"),
    };
    print_group_table(title, header, &groups, total);
    Ok(())
}

pub async fn cmd_report_category(ctx: &AppContext, filters: &FilterArgs) -> Result<()> {
    cmd_report_grouped(ctx, filters, GroupField::Category).await
}

pub async fn cmd_report_project(ctx: &AppContext, filters: &FilterArgs) -> Result<()> {
    cmd_report_grouped(ctx, filters, GroupField::Project).await
}

pub async fn cmd_report_monthly(
    ctx: &AppContext,
    year: Option<i32>,
    filters: &FilterArgs,
) -> Result<()> {
    let year = year.unwrap_or_else(|| ctx.today.year());
    let (_, expenses) = ctx.load_filtered(filters, DateRange::All).await?;
    let series = monthly_series_for_year(&expenses, year);

    if ctx.json {
        return print_json(&json!({ "year": year, "months": series }));
    }

    let max = series.iter().map(|m| m.total).fold(0.0_f64, f64::max);

    println!();
    println!("📈 Monthly Spending {}", year);
    println!("   ─────────────────────────────────────────────────────────────");
    for month in &series {
        let bar_len = if max > 0.0 {
            ((month.total / max) * 30.0).round() as usize
        } else {
            0
        };
        println!(
            "   {} │ {:>10.2} │ {}",
            month.label,
            month.total,
            "█".repeat(bar_len)
        );
    }
    println!(
        "   Total: {:.2}",
        series.iter().map(|m| m.total).sum::<f64>()
    );
    println!();

    Ok(())
}

pub async fn cmd_report_cumulative(ctx: &AppContext, filters: &FilterArgs) -> Result<()> {
    let (_, expenses) = ctx.load_filtered(filters, DateRange::All).await?;
    let series = cumulative_series(&expenses);

    if ctx.json {
        return print_json(&series);
    }

    println!();
    println!("📈 Cumulative Spending");
    println!("   ─────────────────────────────────────────────");

    if series.is_empty() {
        println!("   No dated expenses match these filters.");
        return Ok(());
    }

    println!("   {:10} │ {:>10} │ {:>12}", "Date", "Amount", "Running");
    println!("   ───────────┼────────────┼──────────────");
    for point in &series {
        println!(
            "   {:10} │ {:>10.2} │ {:>12.2}",
            point.date, point.amount, point.running_total
        );
    }
    println!();

    Ok(())
}

pub async fn cmd_report_top(
    ctx: &AppContext,
    limit: Option<usize>,
    filters: &FilterArgs,
) -> Result<()> {
    let limit = limit.unwrap_or(ctx.config.reports.top_categories);
    let (_, expenses) = ctx.load_filtered(filters, DateRange::Month).await?;
    let top = top_groups(&group_sum_by_field(&expenses, GroupField::Category), limit);
    let shares = relative_shares(&top);

    if ctx.json {
        let rows: Vec<_> = top
            .iter()
            .zip(&shares)
            .map(|(g, s)| json!({ "key": g.key, "total": g.total, "share": s.share }))
            .collect();
        return print_json(&rows);
    }

    println!();
    println!("🏆 Top {} Categories", limit);
    println!("   ─────────────────────────────────────────────────────────────");

    if top.is_empty() {
        println!("   No expenses match these filters.");
        return Ok(());
    }

    for (i, (group, share)) in top.iter().zip(&shares).enumerate() {
        let bar_len = (share.share / 100.0 * 20.0).round() as usize;
        println!(
            "   {}. {:20} {:>10.2}  {:<20} {:>5.1}",
            i + 1,
            truncate(&group.key.to_string(), 20),
            group.total,
            "█".repeat(bar_len),
            share.share
        );
    }
    println!();

    Ok(())
}

pub async fn cmd_recent(ctx: &AppContext, limit: Option<usize>) -> Result<()> {
    let limit = limit.unwrap_or(ctx.config.reports.recent_expenses);
    let profile = ctx.load_profile().await?;
    let recent = recent_expenses(&profile.expenses, limit);

    if ctx.json {
        return print_json(&recent);
    }

    println!();
    println!("🧾 Recent Expenses");
    println!("   ─────────────────────────────────────────────────────────────");

    if recent.is_empty() {
        println!("   No expenses yet.");
        return Ok(());
    }

    for expense in &recent {
        let date = expense
            .date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "(no date)".to_string());
        println!(
            "   {:10} │ {:20} │ {:>10.2} │ {}",
            date,
            truncate(&expense.category, 20),
            expense.amount,
            truncate(expense.description.as_deref().unwrap_or(""), 30)
        );
    }
    println!();

    Ok(())
}

pub async fn cmd_options(ctx: &AppContext) -> Result<()> {
    let profile = ctx.load_profile().await?;
    let categories = distinct_labels(&profile.expenses, GroupField::Category);
    let projects = distinct_labels(&profile.expenses, GroupField::Project);

    if ctx.json {
        return print_json(&json!({ "categories": categories, "projects": projects }));
    }

    println!();
    println!("🏷️  Categories ({}):", categories.len());
    for category in &categories {
        println!("   {}", category);
    }
    println!();
    println!("📁 Projects ({}):", projects.len());
    for project in &projects {
        println!("   {}", project);
    }
    println!("   (use --project none for expenses without a project)");
    println!();

    Ok(())
}
