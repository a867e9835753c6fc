//! Shared command plumbing
//!
//! This module contains:
//! - `AppContext` - loaded config, expense source, and reference date
//! - `open_api` - build a backend client from flags and config
//! - `build_criteria` - turn filter flags into analytics criteria
//! - `parse_date_arg` - strict YYYY-MM-DD parsing for flags

use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use tally_core::{
    AnalyticsConfig, ApiClient, DateRange, Expense, ExpenseSource, FileSource, FilterCriteria,
    Selector, Session, UserProfile,
};

use crate::cli::FilterArgs;

/// Everything a command needs to run
pub struct AppContext {
    pub config: AnalyticsConfig,
    pub source: Box<dyn ExpenseSource>,
    pub today: NaiveDate,
    pub json: bool,
}

impl AppContext {
    pub fn new(
        config: AnalyticsConfig,
        source: Box<dyn ExpenseSource>,
        today: NaiveDate,
        json: bool,
    ) -> Self {
        Self {
            config,
            source,
            today,
            json,
        }
    }

    /// Fetch the current user's profile from the source
    pub async fn load_profile(&self) -> Result<UserProfile> {
        self.source
            .fetch_profile()
            .await
            .context("Failed to load expenses")
    }

    /// Fetch and filter the current user's expenses
    pub async fn load_filtered(
        &self,
        filters: &FilterArgs,
        default_range: DateRange,
    ) -> Result<(UserProfile, Vec<Expense>)> {
        let criteria = build_criteria(filters, default_range)?;
        let profile = self.load_profile().await?;
        let filtered = criteria.apply(&profile.expenses, self.today);
        tracing::debug!(
            range = %criteria.range,
            loaded = profile.expenses.len(),
            matched = filtered.len(),
            "Applied filters"
        );
        Ok((profile, filtered))
    }
}

/// Load config from an explicit path, the data dir override, or defaults
pub fn load_config(path: Option<&Path>) -> Result<AnalyticsConfig> {
    AnalyticsConfig::load(path).context("Failed to load config")
}

/// Reference date: the `--today` flag, or the local calendar date
pub fn resolve_today(arg: Option<&str>) -> Result<NaiveDate> {
    match arg {
        Some(s) => parse_date_arg(s, "--today"),
        None => Ok(Local::now().date_naive()),
    }
}

pub fn parse_date_arg(value: &str, flag: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("Invalid {} date format (use YYYY-MM-DD): {}", flag, value))
}

/// Backend client from `--api-url` (or config) and `--token`
pub fn open_api(
    api_url: Option<&str>,
    token: Option<&str>,
    config: &AnalyticsConfig,
) -> Result<ApiClient> {
    let Some(base_url) = api_url.or(config.api.base_url.as_deref()) else {
        bail!("No backend configured. Pass --api-url, set TALLY_API_URL, or use --input FILE");
    };
    let Some(token) = token else {
        bail!("No session token. Pass --token or set TALLY_TOKEN");
    };

    ApiClient::with_timeout(base_url, Session::new(token), config.api.timeout)
        .context("Failed to create API client")
}

/// Pick the expense source: a file when `--input` is given, else the backend
pub fn open_source(
    input: Option<&Path>,
    api_url: Option<&str>,
    token: Option<&str>,
    config: &AnalyticsConfig,
) -> Result<Box<dyn ExpenseSource>> {
    match input {
        Some(path) => Ok(Box::new(FileSource::new(path))),
        None => Ok(Box::new(open_api(api_url, token, config)?)),
    }
}

/// Project selector from `--project`/`--no-project`
///
/// Any `--project` value is a literal label, so a project named "none"
/// stays selectable.
pub fn project_selector(value: Option<&str>, no_project: bool) -> Selector {
    match value {
        _ if no_project => Selector::unassigned(),
        None => Selector::All,
        Some(v) => Selector::label(v),
    }
}

/// Translate filter flags into criteria
///
/// `--from`/`--to` imply a custom range. A custom range with a missing
/// bound matches every dated expense.
pub fn build_criteria(filters: &FilterArgs, default_range: DateRange) -> Result<FilterCriteria> {
    let from = filters
        .from
        .as_deref()
        .map(|s| parse_date_arg(s, "--from"))
        .transpose()?;
    let to = filters
        .to
        .as_deref()
        .map(|s| parse_date_arg(s, "--to"))
        .transpose()?;

    let range = match filters.range.as_deref() {
        Some(r) => {
            let parsed: DateRange = r.parse().map_err(anyhow::Error::msg)?;
            match parsed {
                DateRange::Custom { .. } => DateRange::custom(from, to),
                _ if from.is_some() || to.is_some() => {
                    bail!("--from/--to only apply to --range custom")
                }
                other => other,
            }
        }
        None if from.is_some() || to.is_some() => DateRange::custom(from, to),
        None => default_range,
    };

    let category = match filters.category.as_deref() {
        Some(c) => Selector::label(c),
        None => Selector::All,
    };

    Ok(FilterCriteria::new(range)
        .category(category)
        .project(project_selector(filters.project.as_deref(), filters.no_project)))
}
