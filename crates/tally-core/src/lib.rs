//! Tally Core Library
//!
//! Shared functionality for the Tally expense tracker:
//! - Expense model tolerant of the backend's loose shapes
//! - Analytics engine: date ranges, filters, aggregations, series
//! - Rule-based insight engine
//! - Analytics configuration with file overrides
//! - CSV export
//! - Backend API client and file-based expense sources

pub mod analytics;
pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod insights;
pub mod models;

/// Test utilities including mock expense backend
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use analytics::{
    CumulativePoint, DateRange, FilterCriteria, GroupShare, GroupTotal, MonthlyTotal,
    RangePredicate, SpendingSummary,
};
pub use api::{ApiClient, ExpenseSource, FileSource};
pub use config::{AnalyticsConfig, ApiSettings, InsightThresholds, ReportSettings};
pub use error::{Error, Result};
pub use export::ExportOptions;
pub use insights::{Insight, InsightEngine, InsightKind, Severity};
pub use models::{
    Expense, ExpenseUpdate, GroupField, GroupKey, NewExpense, Selector, Session, UserProfile,
};
