//! CSV export command

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tally_core::export::write_expenses_csv;
use tally_core::{DateRange, ExportOptions};

use super::core::AppContext;
use crate::cli::FilterArgs;

pub async fn cmd_export(
    ctx: &AppContext,
    output: Option<&Path>,
    bom: bool,
    filters: &FilterArgs,
) -> Result<()> {
    let (profile, expenses) = ctx.load_filtered(filters, DateRange::Month).await?;
    let opts = ExportOptions {
        username: profile.username,
        bom,
    };

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            let rows = write_expenses_csv(&mut writer, &expenses, &opts)
                .context("Failed to write CSV")?;
            writer.flush()?;
            println!("✅ Exported {} expenses to {}", rows, path.display());
        }
        None => {
            let stdout = io::stdout();
            write_expenses_csv(stdout.lock(), &expenses, &opts).context("Failed to write CSV")?;
        }
    }

    Ok(())
}
