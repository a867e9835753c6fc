//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared plumbing (context, source selection, filter flags)
//! - `expenses` - Backend write commands (add, edit, delete)
//! - `export` - CSV export
//! - `insights` - Rule-based insights
//! - `reports` - Summary, grouped reports, series, recent, filter options

pub mod core;
pub mod expenses;
pub mod export;
pub mod insights;
pub mod reports;

// Re-export command functions for main.rs
pub use self::core::*;
pub use expenses::*;
pub use export::*;
pub use insights::*;
pub use reports::*;

use anyhow::Result;
use serde::Serialize;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
