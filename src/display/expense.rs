//! Expense display formatting
//!
//! Register-style listing and a detail view for single expenses.

use super::report::truncate;
use crate::models::ExpenseRecord;

/// Format a single expense as a register row
pub fn format_expense_row(record: &ExpenseRecord, symbol: &str) -> String {
    format!(
        "{:12} {} {:12} {:>12} {:12} {}",
        record.id.short(),
        record.date.format("%Y-%m-%d"),
        truncate(&record.payer, 12),
        record.amount.format_with_symbol(symbol),
        truncate(&record.category, 12),
        truncate(&record.memo, 24)
    )
}

/// Format a list of expenses as a register
pub fn format_expense_list(records: &[ExpenseRecord], symbol: &str) -> String {
    if records.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:12} {:10} {:12} {:>12} {:12} {}\n",
        "ID", "Date", "Payer", "Amount", "Category", "Memo"
    ));
    output.push_str(&"-".repeat(80));
    output.push('\n');

    for record in records {
        output.push_str(format_expense_row(record, symbol).trim_end());
        output.push('\n');
    }

    output
}

/// Format expense details for display
pub fn format_expense_details(record: &ExpenseRecord, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:   {}\n", record.id));
    output.push_str(&format!("UUID:      {}\n", record.id.as_uuid()));
    output.push_str(&format!("Date:      {}\n", record.date.format("%Y-%m-%d")));
    output.push_str(&format!("Payer:     {}\n", record.payer));
    output.push_str(&format!(
        "Amount:    {}\n",
        record.amount.format_with_symbol(symbol)
    ));
    output.push_str(&format!("Category:  {}\n", record.category));

    if !record.memo.is_empty() {
        output.push_str(&format!("Memo:      {}\n", record.memo));
    }

    output.push_str(&format!(
        "Created:   {}\n",
        record.created_at.format("%Y-%m-%d %H:%M:%S")
    ));
    if record.updated_at != record.created_at {
        output.push_str(&format!(
            "Updated:   {}\n",
            record.updated_at.format("%Y-%m-%d %H:%M:%S")
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Amount;
    use chrono::NaiveDate;

    fn record() -> ExpenseRecord {
        ExpenseRecord::new(
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            "B",
            Amount::new(1200.0),
            "Utilities",
        )
        .with_memo("electricity")
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_expense_list(&[], "¥"), "No expenses found.\n");
    }

    #[test]
    fn test_list_contains_row() {
        let record = record();
        let output = format_expense_list(std::slice::from_ref(&record), "¥");

        assert!(output.contains(&record.id.short()));
        assert!(output.contains("2024-03-15"));
        assert!(output.contains("¥1200.00"));
        assert!(output.contains("electricity"));
    }

    #[test]
    fn test_details() {
        let output = format_expense_details(&record(), "$");
        assert!(output.contains("Payer:     B"));
        assert!(output.contains("Amount:    $1200.00"));
        assert!(output.contains("Memo:      electricity"));
        assert!(!output.contains("Updated:"));
    }
}
