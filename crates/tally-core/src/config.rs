//! Analytics configuration
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path, or the override in the data dir
//!    (~/.local/share/tally/config/tally.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Keys missing from an override keep their default values.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/tally.toml");

/// Thresholds for the rule-based insights
#[derive(Debug, Clone, PartialEq)]
pub struct InsightThresholds {
    /// Average daily spend above which a warning is raised
    pub daily_average_threshold: f64,
    /// Fraction (0-1] of total spend that makes a category dominant
    pub dominant_category_share: f64,
    /// Days in the trailing window, ending today inclusive
    pub trailing_days: u32,
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self {
            daily_average_threshold: 100.0,
            dominant_category_share: 0.4,
            trailing_days: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportSettings {
    pub top_categories: usize,
    pub recent_expenses: usize,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            top_categories: 5,
            recent_expenses: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiSettings {
    pub base_url: Option<String>,
    pub timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Full configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyticsConfig {
    pub insights: InsightThresholds,
    pub reports: ReportSettings,
    pub api: ApiSettings,
}

impl AnalyticsConfig {
    /// Load from `path` if given, else the data-dir override if present,
    /// else the embedded defaults
    ///
    /// An explicit `path` must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let override_path = match path {
            Some(p) if !p.exists() => {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            Some(p) => Some(p.to_path_buf()),
            None => default_config_path().filter(|p| p.exists()),
        };

        let content = match override_path {
            Some(p) => fs::read_to_string(&p).map_err(|e| {
                Error::Config(format!("Failed to read {}: {}", p.display(), e))
            })?,
            None => DEFAULT_CONFIG.to_string(),
        };

        parse_config(&content)
    }

    /// Parse a TOML document on top of the defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        parse_config(content)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("tally").join("config").join("tally.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    insights: Option<RawInsights>,
    reports: Option<RawReports>,
    api: Option<RawApi>,
}

#[derive(Debug, Deserialize)]
struct RawInsights {
    daily_average_threshold: Option<f64>,
    dominant_category_share: Option<f64>,
    trailing_days: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawReports {
    top_categories: Option<usize>,
    recent_expenses: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawApi {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

fn parse_config(content: &str) -> Result<AnalyticsConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = AnalyticsConfig::default();

    if let Some(insights) = raw.insights {
        if let Some(threshold) = insights.daily_average_threshold {
            config.insights.daily_average_threshold = threshold;
        }
        if let Some(share) = insights.dominant_category_share {
            if !(share > 0.0 && share <= 1.0) {
                return Err(Error::Config(format!(
                    "dominant_category_share must be in (0, 1], got {}",
                    share
                )));
            }
            config.insights.dominant_category_share = share;
        }
        if let Some(days) = insights.trailing_days {
            if days == 0 {
                return Err(Error::Config("trailing_days must be at least 1".into()));
            }
            config.insights.trailing_days = days;
        }
    }

    if let Some(reports) = raw.reports {
        if let Some(n) = reports.top_categories {
            config.reports.top_categories = n;
        }
        if let Some(n) = reports.recent_expenses {
            config.reports.recent_expenses = n;
        }
    }

    if let Some(api) = raw.api {
        config.api.base_url = api.base_url.filter(|u| !u.trim().is_empty());
        if let Some(secs) = api.timeout_secs {
            config.api.timeout = Duration::from_secs(secs);
        }
    }

    Ok(config)
}
