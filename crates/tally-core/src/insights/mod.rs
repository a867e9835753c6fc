//! Insight Engine - rule-based spending observations
//!
//! Each rule looks at the same expense list independently and may produce
//! an insight. Insights are advisory text with a severity; they are never
//! persisted and never block anything.
//!
//! ## Built-in rules
//!
//! - **Daily Average** - warns when trailing average daily spend is high
//! - **Dominant Category** - notes a category holding most of the spend
//! - **Top Project** - names the highest-spending project
//!
//! An empty list short-circuits to a single "no data" insight.
//!
//! ## Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use tally_core::config::InsightThresholds;
//! use tally_core::insights::{InsightContext, InsightEngine, InsightKind};
//!
//! let thresholds = InsightThresholds::default();
//! let today = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
//! let ctx = InsightContext::new(&[], today, &thresholds);
//! let insights = InsightEngine::new().analyze(&ctx);
//! assert_eq!(insights[0].kind, InsightKind::NoData);
//! ```

pub mod daily_average;
pub mod dominant_category;
pub mod engine;
pub mod top_project;
pub mod types;

pub use daily_average::DailyAverageRule;
pub use dominant_category::DominantCategoryRule;
pub use engine::{InsightContext, InsightEngine, InsightRule};
pub use top_project::TopProjectRule;
pub use types::{Insight, InsightKind, Severity};
