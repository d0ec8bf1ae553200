//! CLI commands for reports
//!
//! Provides commands for printing and exporting the period analysis and the
//! settlement plan.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::Settings;
use crate::error::{KakeiboError, KakeiboResult};
use crate::models::Amount;
use crate::reports::{AnalysisReport, SettlementReport};
use crate::services::{records_in_period, ExpenseService, PeriodService};
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Spending per period, by category and by payer
    Analysis {
        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Who owes whom for a period
    #[command(alias = "settlement")]
    Settle {
        /// Period: "current", "last", "next", YYYY-MM or YYYY-MM-DD
        #[arg(short, long)]
        period: Option<String>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List recent settlement periods with their totals
    Periods {
        /// Number of periods to show
        #[arg(short = 'n', long, default_value = "6")]
        count: usize,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    today: NaiveDate,
    cmd: ReportCommands,
) -> KakeiboResult<()> {
    match cmd {
        ReportCommands::Analysis { output } => handle_analysis_report(storage, settings, output),
        ReportCommands::Settle { period, output } => {
            handle_settlement_report(storage, settings, today, period, output)
        }
        ReportCommands::Periods { count } => handle_periods_report(storage, settings, today, count),
    }
}

/// Create `path`, hand a buffered writer to `write`, then flush it
fn export_to_file<F>(path: &Path, write: F) -> KakeiboResult<()>
where
    F: FnOnce(&mut BufWriter<File>) -> KakeiboResult<()>,
{
    let file = File::create(path).map_err(|e| {
        KakeiboError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);
    write(&mut writer)?;
    writer.flush().map_err(|e| {
        KakeiboError::Export(format!("Failed to write file {}: {}", path.display(), e))
    })
}

/// Handle the period analysis report
fn handle_analysis_report(
    storage: &Storage,
    settings: &Settings,
    output: Option<PathBuf>,
) -> KakeiboResult<()> {
    let records = ExpenseService::new(storage, settings).snapshot()?;
    let report = AnalysisReport::generate(
        &records,
        &settings.settlement_period,
        &settings.currency_symbol,
    );

    if let Some(path) = output {
        export_to_file(&path, |writer| report.export_csv(writer))?;
        println!("Analysis exported to: {}", path.display());
    } else {
        print!("{}", report.format_terminal());
    }

    Ok(())
}

/// Handle the settlement report
fn handle_settlement_report(
    storage: &Storage,
    settings: &Settings,
    today: NaiveDate,
    period: Option<String>,
    output: Option<PathBuf>,
) -> KakeiboResult<()> {
    let participants = settings.participant_set()?;
    let period = PeriodService::new(&settings.settlement_period)
        .parse_or_current(period.as_deref(), today)?;

    let records = ExpenseService::new(storage, settings).snapshot()?;
    let report =
        SettlementReport::generate(&records, &participants, period, &settings.currency_symbol)?;

    if let Some(path) = output {
        export_to_file(&path, |writer| report.export_csv(writer))?;
        println!("Settlement exported to: {}", path.display());
    } else {
        print!("{}", report.format_terminal());
    }

    Ok(())
}

/// Handle the recent periods listing
fn handle_periods_report(
    storage: &Storage,
    settings: &Settings,
    today: NaiveDate,
    count: usize,
) -> KakeiboResult<()> {
    let service = PeriodService::new(&settings.settlement_period);
    let records = ExpenseService::new(storage, settings).snapshot()?;

    println!("Settlement periods ({})", settings.settlement_period.describe());
    println!("{}", "-".repeat(60));

    for period in service.recent_periods(today, count).iter().rev() {
        let in_period = records_in_period(&records, period);
        let total: Amount = in_period.iter().map(|r| r.amount).sum();
        let marker = if service.is_current(period, today) {
            "*"
        } else {
            " "
        };
        println!(
            "{} {}  {:>12}  ({} expenses)",
            marker,
            period.key(),
            total.format_with_symbol(&settings.currency_symbol),
            in_period.len()
        );
    }

    Ok(())
}
