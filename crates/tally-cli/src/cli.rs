//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Tally - Expense analytics for your spending history
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Expense analytics, reports, and insights", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Read expenses from a JSON file instead of the backend
    ///
    /// Accepts a `/getUser` response, a user object, or a bare expense array.
    /// Takes precedence over --api-url for read commands.
    #[arg(short, long, global = true)]
    pub input: Option<PathBuf>,

    /// Backend base URL
    #[arg(long, env = "TALLY_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Backend session token
    #[arg(long, env = "TALLY_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Config file (defaults to ~/.local/share/tally/config/tally.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Reference date for relative ranges (YYYY-MM-DD, defaults to today)
    #[arg(long, global = true)]
    pub today: Option<String>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Filters shared by the analytics commands
#[derive(Args, Clone, Debug, Default)]
pub struct FilterArgs {
    /// Date range: day, week, month, year, all, custom
    #[arg(long)]
    pub range: Option<String>,

    /// Custom range start (YYYY-MM-DD); implies --range custom
    #[arg(long)]
    pub from: Option<String>,

    /// Custom range end (YYYY-MM-DD); implies --range custom
    #[arg(long)]
    pub to: Option<String>,

    /// Only this category (exact, case-sensitive)
    #[arg(long)]
    pub category: Option<String>,

    /// Only this project (exact, case-sensitive)
    #[arg(long)]
    pub project: Option<String>,

    /// Only expenses without a project
    #[arg(long, conflicts_with = "project")]
    pub no_project: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Headline totals: this month, last month, change, all time
    Summary,

    /// Generate spending reports
    Report {
        #[command(subcommand)]
        report_type: ReportType,
    },

    /// Rule-based observations about spending
    Insights {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Most recent expenses
    Recent {
        /// Number of expenses (defaults to config)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Distinct categories and projects available for filtering
    Options,

    /// Export filtered expenses to CSV
    Export {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Prefix output with a UTF-8 byte order mark (for spreadsheets)
        #[arg(long)]
        bom: bool,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Add an expense (backend only)
    Add {
        /// Amount (must be positive)
        #[arg(short, long)]
        amount: f64,

        /// Category
        #[arg(short, long)]
        category: String,

        /// Project
        #[arg(short, long)]
        project: Option<String>,

        /// Description
        #[arg(short, long)]
        description: Option<String>,

        /// Date (YYYY-MM-DD, defaults to today on the backend)
        #[arg(long)]
        date: Option<String>,
    },

    /// Edit an expense (backend only)
    Edit {
        /// Expense ID
        id: String,

        #[arg(short, long)]
        amount: Option<f64>,

        #[arg(short, long)]
        category: Option<String>,

        /// New project; an empty string clears it
        #[arg(short, long)]
        project: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },

    /// Delete an expense (backend only)
    Delete {
        /// Expense ID
        id: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ReportType {
    /// Totals per category
    Category {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Totals per project (including expenses without one)
    Project {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Month-by-month totals for one calendar year
    Monthly {
        /// Year (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Running total by date
    Cumulative {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Highest-spending categories with relative shares
    Top {
        /// Number of categories (defaults to config)
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        #[command(flatten)]
        filters: FilterArgs,
    },
}
