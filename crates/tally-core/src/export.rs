//! CSV export of expense lists
//!
//! Columns: `Date,Category,Project,Description,Amount,User`. Rows follow the
//! input order. Spreadsheet tools need a UTF-8 byte order mark to detect the
//! encoding of non-ASCII labels, so the BOM is opt-in per export.

use std::io::Write;

use csv::WriterBuilder;

use crate::error::Result;
use crate::models::Expense;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

const HEADERS: [&str; 6] = ["Date", "Category", "Project", "Description", "Amount", "User"];

/// Options for expense export
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Value for the `User` column
    pub username: String,
    /// Prefix the output with a UTF-8 byte order mark
    pub bom: bool,
}

/// Write `expenses` as CSV to `writer`, returning the number of rows
pub fn write_expenses_csv<W: Write>(
    mut writer: W,
    expenses: &[Expense],
    opts: &ExportOptions,
) -> Result<usize> {
    if opts.bom {
        writer.write_all(UTF8_BOM)?;
    }

    let mut csv = WriterBuilder::new().from_writer(writer);
    csv.write_record(HEADERS)?;

    for expense in expenses {
        let date = expense
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        let amount = format_amount(expense.amount);
        csv.write_record([
            date.as_str(),
            expense.category.as_str(),
            expense.project.as_deref().unwrap_or(""),
            expense.description.as_deref().unwrap_or(""),
            amount.as_str(),
            opts.username.as_str(),
        ])?;
    }

    csv.flush()?;
    tracing::debug!(rows = expenses.len(), "Exported expenses to CSV");
    Ok(expenses.len())
}

/// Export to an in-memory string
pub fn expenses_to_csv(expenses: &[Expense], opts: &ExportOptions) -> Result<String> {
    let mut buf = Vec::new();
    write_expenses_csv(&mut buf, expenses, opts)?;
    String::from_utf8(buf)
        .map_err(|e| crate::error::Error::InvalidData(format!("CSV is not UTF-8: {}", e)))
}

/// Shortest exact form of the stored number; whole amounts have no decimals
fn format_amount(amount: f64) -> String {
    amount.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn opts(bom: bool) -> ExportOptions {
        ExportOptions {
            username: "sara".to_string(),
            bom,
        }
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(100.0), "100");
        assert_eq!(format_amount(12.5), "12.5");
        assert_eq!(format_amount(0.99), "0.99");
        assert_eq!(format_amount(0.001), "0.001");
        assert_eq!(format_amount(19.999), "19.999");
    }

    #[test]
    fn test_export_keeps_sub_cent_amounts() {
        let expenses = vec![Expense::new("1", 0.005, "Fees", None)];
        let csv = expenses_to_csv(&expenses, &opts(false)).unwrap();
        assert_eq!(csv.lines().nth(1), Some(",Fees,,,0.005,sara"));
    }

    #[test]
    fn test_export_empty_is_header_only() {
        let csv = expenses_to_csv(&[], &opts(false)).unwrap();
        assert_eq!(csv, "Date,Category,Project,Description,Amount,User\n");
    }

    #[test]
    fn test_export_rows_and_quoting() {
        let expenses = vec![
            Expense::new("1", 12.5, "Food", NaiveDate::from_ymd_opt(2024, 3, 1))
                .with_description("Lunch, with \"friends\""),
            Expense::new("2", 200.0, "Rent", None).with_project("Flat"),
        ];
        let csv = expenses_to_csv(&expenses, &opts(false)).unwrap();
        let lines: Vec<_> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            "2024-03-01,Food,,\"Lunch, with \"\"friends\"\"\",12.5,sara"
        );
        assert_eq!(lines[2], ",Rent,Flat,,200,sara");
    }

    #[test]
    fn test_export_bom() {
        let mut buf = Vec::new();
        let rows = write_expenses_csv(&mut buf, &[], &opts(true)).unwrap();
        assert_eq!(rows, 0);
        assert!(buf.starts_with(UTF8_BOM));
    }
}
