//! Expense CLI commands
//!
//! Implements CLI commands for recording, listing, editing and importing
//! expenses.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::Settings;
use crate::display::expense::{format_expense_details, format_expense_list};
use crate::error::{KakeiboError, KakeiboResult};
use crate::models::{Amount, ExpenseRecord};
use crate::services::{
    CreateExpenseInput, ExpenseFilter, ExpenseService, ImportService, PeriodService,
    UpdateExpenseInput,
};
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Participant who paid
        payer: String,
        /// Amount (e.g., "1200", "1,200", "¥1200")
        amount: String,
        /// Category name
        #[arg(short, long)]
        category: String,
        /// Expense date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Memo
        #[arg(short, long)]
        memo: Option<String>,
    },
    /// List expenses
    #[command(alias = "ls")]
    List {
        /// Period: "current", "last", "next", YYYY-MM or YYYY-MM-DD
        #[arg(short, long)]
        period: Option<String>,
        /// Filter by payer
        #[arg(long)]
        payer: Option<String>,
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,
        /// Number of expenses to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Show expense details
    Show {
        /// Expense ID (full UUID or short form)
        id: String,
    },
    /// Edit an expense
    Edit {
        /// Expense ID (full UUID or short form)
        id: String,
        /// New payer
        #[arg(short, long)]
        payer: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New memo
        #[arg(short, long)]
        memo: Option<String>,
    },
    /// Delete an expense
    #[command(alias = "rm")]
    Delete {
        /// Expense ID (full UUID or short form)
        id: String,
    },
    /// Import expenses from a CSV file (date,payer,amount,category[,memo])
    Import {
        /// Path to CSV file
        file: PathBuf,
    },
}

fn parse_amount(input: &str) -> KakeiboResult<Amount> {
    Amount::parse(input).map_err(|e| {
        KakeiboError::Validation(format!(
            "Invalid amount '{}'. Use a number like '1200' or '12.50'. Error: {}",
            input, e
        ))
    })
}

fn parse_date(input: Option<&str>, today: NaiveDate) -> KakeiboResult<NaiveDate> {
    input.map_or(Ok(today), ExpenseRecord::parse_date)
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    today: NaiveDate,
    cmd: ExpenseCommands,
) -> KakeiboResult<()> {
    let service = ExpenseService::new(storage, settings);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            payer,
            amount,
            category,
            date,
            memo,
        } => {
            let input = CreateExpenseInput {
                date: parse_date(date.as_deref(), today)?,
                payer,
                amount: parse_amount(&amount)?,
                category,
                memo,
            };
            let record = service.create(input)?;

            println!("Recorded expense:");
            println!("  ID:       {}", record.id);
            println!("  Date:     {}", record.date);
            println!("  Payer:    {}", record.payer);
            println!("  Amount:   {}", record.amount.format_with_symbol(symbol));
            println!("  Category: {}", record.category);
        }

        ExpenseCommands::List {
            period,
            payer,
            category,
            limit,
        } => {
            let mut filter = ExpenseFilter::new().limit(limit);

            if let Some(input) = period {
                let periods = PeriodService::new(&settings.settlement_period);
                let period = periods.parse(&input, today)?;
                println!("Period: {}\n", periods.format_period_friendly(&period));
                filter = filter.period(period);
            }
            if let Some(payer) = payer {
                filter = filter.payer(payer);
            }
            if let Some(category) = category {
                filter = filter.category(category);
            }

            let records = service.list(filter)?;
            print!("{}", format_expense_list(&records, symbol));
            println!("\nShowing {} expenses", records.len());
        }

        ExpenseCommands::Show { id } => {
            let record = service.require(&id)?;
            print!("{}", format_expense_details(&record, symbol));
        }

        ExpenseCommands::Edit {
            id,
            payer,
            amount,
            category,
            date,
            memo,
        } => {
            let record = service.require(&id)?;
            let input = UpdateExpenseInput {
                date: date.as_deref().map(ExpenseRecord::parse_date).transpose()?,
                payer,
                amount: amount.as_deref().map(parse_amount).transpose()?,
                category,
                memo,
            };
            let updated = service.update(record.id, input)?;

            println!("Updated expense {}", updated.id);
            print!("{}", format_expense_details(&updated, symbol));
        }

        ExpenseCommands::Delete { id } => {
            let record = service.require(&id)?;
            let removed = service.delete(record.id)?;
            println!("Deleted expense {}: {}", removed.id, removed);
        }

        ExpenseCommands::Import { file } => {
            let result = ImportService::new(storage, settings).import_file(&file)?;

            println!("Import complete: {}", file.display());
            println!("  Imported: {}", result.imported.len());
            println!("  Skipped:  {}", result.skipped());
            for err in &result.errors {
                println!("    {}", err);
            }
        }
    }

    Ok(())
}
