//! Expense write commands (add, edit, delete)
//!
//! These always go through the backend; a file source is read-only.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use tally_core::{ApiClient, ExpenseUpdate, NewExpense};

use super::core::parse_date_arg;
use super::print_json;

pub async fn cmd_add(
    api: &ApiClient,
    amount: f64,
    category: &str,
    project: Option<&str>,
    description: Option<&str>,
    date: Option<&str>,
    json: bool,
) -> Result<()> {
    let expense = NewExpense {
        amount,
        category: category.to_string(),
        project: project.map(str::to_string),
        description: description.map(str::to_string),
        date: date.map(|d| parse_date_arg(d, "--date")).transpose()?,
    };

    let created = api
        .create_expense(&expense)
        .await
        .context("Failed to add expense")?;

    if json {
        return print_json(&created);
    }

    println!(
        "✅ Added expense {} ({:.2} {})",
        created.id, created.amount, created.category
    );
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub async fn cmd_edit(
    api: &ApiClient,
    id: &str,
    amount: Option<f64>,
    category: Option<&str>,
    project: Option<&str>,
    description: Option<&str>,
    date: Option<&str>,
    json: bool,
) -> Result<()> {
    let update = ExpenseUpdate {
        amount,
        category: category.map(str::to_string),
        project: project.map(str::to_string),
        description: description.map(str::to_string),
        date: date.map(|d| parse_date_arg(d, "--date")).transpose()?,
    };

    if update.is_empty() {
        bail!("Nothing to update. Pass at least one of --amount, --category, --project, --description, --date");
    }

    let updated = api
        .update_expense(id, &update)
        .await
        .with_context(|| format!("Failed to update expense {}", id))?;

    if json {
        return print_json(&updated);
    }

    println!("✅ Updated expense {}", updated.id);
    Ok(())
}

pub async fn cmd_delete(api: &ApiClient, id: &str, yes: bool) -> Result<()> {
    // Confirm unless --yes
    if !yes {
        print!("Delete expense {}? [y/N] ", id);
        io::stdout().flush()?;

        if !confirmed(&mut io::stdin().lock())? {
            println!("Aborted.");
            return Ok(());
        }
    }

    api.delete_expense(id)
        .await
        .with_context(|| format!("Failed to delete expense {}", id))?;
    println!("🗑️  Deleted expense {}", id);
    Ok(())
}

/// Read one answer line; only `y` or `yes` proceeds
pub fn confirmed(input: &mut impl BufRead) -> Result<bool> {
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let answer = answer.trim();
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}
