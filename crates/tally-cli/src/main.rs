//! Tally CLI - Expense analytics
//!
//! Usage:
//!   tally summary                         Headline totals
//!   tally report category --range month   Spending by category
//!   tally insights                        Rule-based observations
//!   tally export --output expenses.csv    Export filtered expenses

mod cli;
mod commands;


use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::Parser;
use tally_core::{AnalyticsConfig, ApiClient};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;
use commands::AppContext;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = commands::load_config(cli.config.as_deref())?;
    let today = commands::resolve_today(cli.today.as_deref())?;

    match &cli.command {
        Commands::Summary => commands::cmd_summary(&read_context(&cli, config, today)?).await,
        Commands::Report { report_type } => {
            let ctx = read_context(&cli, config, today)?;
            match report_type {
                ReportType::Category { filters } => {
                    commands::cmd_report_category(&ctx, filters).await
                }
                ReportType::Project { filters } => {
                    commands::cmd_report_project(&ctx, filters).await
                }
                ReportType::Monthly { year, filters } => {
                    commands::cmd_report_monthly(&ctx, *year, filters).await
                }
                ReportType::Cumulative { filters } => {
                    commands::cmd_report_cumulative(&ctx, filters).await
                }
                ReportType::Top { limit, filters } => {
                    commands::cmd_report_top(&ctx, *limit, filters).await
                }
            }
        }
        Commands::Insights { filters } => {
            commands::cmd_insights(&read_context(&cli, config, today)?, filters).await
        }
        Commands::Recent { limit } => {
            commands::cmd_recent(&read_context(&cli, config, today)?, *limit).await
        }
        Commands::Options => commands::cmd_options(&read_context(&cli, config, today)?).await,
        Commands::Export {
            output,
            bom,
            filters,
        } => {
            let ctx = read_context(&cli, config, today)?;
            commands::cmd_export(&ctx, output.as_deref(), *bom, filters).await
        }
        Commands::Add {
            amount,
            category,
            project,
            description,
            date,
        } => {
            let api = write_api(&cli, &config)?;
            commands::cmd_add(
                &api,
                *amount,
                category,
                project.as_deref(),
                description.as_deref(),
                date.as_deref(),
                cli.json,
            )
            .await
        }
        Commands::Edit {
            id,
            amount,
            category,
            project,
            description,
            date,
        } => {
            let api = write_api(&cli, &config)?;
            commands::cmd_edit(
                &api,
                id,
                *amount,
                category.as_deref(),
                project.as_deref(),
                description.as_deref(),
                date.as_deref(),
                cli.json,
            )
            .await
        }
        Commands::Delete { id, yes } => {
            commands::cmd_delete(&write_api(&cli, &config)?, id, *yes).await
        }
    }
}

/// Context for read commands: `--input` file or the backend
fn read_context(cli: &Cli, config: AnalyticsConfig, today: NaiveDate) -> Result<AppContext> {
    let source = commands::open_source(
        cli.input.as_deref(),
        cli.api_url.as_deref(),
        cli.token.as_deref(),
        &config,
    )?;
    Ok(AppContext::new(config, source, today, cli.json))
}

fn write_api(cli: &Cli, config: &AnalyticsConfig) -> Result<ApiClient> {
    if cli.input.is_some() {
        bail!("--input is read-only; add, edit, and delete need the backend (--api-url)");
    }
    commands::open_api(cli.api_url.as_deref(), cli.token.as_deref(), config)
}
