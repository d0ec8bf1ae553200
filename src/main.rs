use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use kakeibo::cli::{
    handle_config_command, handle_expense_command, handle_report_command, ConfigCommands,
    ExpenseCommands, ReportCommands,
};
use kakeibo::config::{KakeiboPaths, Settings};
use kakeibo::models::ExpenseRecord;
use kakeibo::storage::Storage;

#[derive(Parser)]
#[command(
    name = "kakeibo",
    version,
    about = "Shared household expense ledger with per-period settlement",
    long_about = "Kakeibo records who paid for what, breaks spending down by \
                  settlement period, and works out who owes whom so that \
                  everybody ends up paying an equal share."
)]
struct Cli {
    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long, global = true, env = "KAKEIBO_TODAY", value_parser = parse_today)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and default settings
    Init,

    /// View or change settings
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Analysis and settlement reports
    #[command(subcommand)]
    Report(ReportCommands),
}

fn parse_today(input: &str) -> Result<NaiveDate, String> {
    ExpenseRecord::parse_date(input).map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let today = cli
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let paths = KakeiboPaths::new()?;

    match cli.command {
        Some(Commands::Init) => {
            if paths.is_initialized() {
                println!("Kakeibo is already initialized at: {}", paths.base_dir().display());
                return Ok(());
            }

            let settings = Settings::default();
            settings.save(&paths)?;
            Storage::new(paths.clone())?.save_all()?;

            println!("Initialized Kakeibo at: {}", paths.base_dir().display());
            println!();
            println!("Participants: {}", settings.participants.join(", "));
            println!("Categories:   {}", settings.categories.join(", "));
            println!();
            println!("Run 'kakeibo config participants <names...>' to set who shares expenses.");
        }
        Some(Commands::Config(cmd)) => {
            let settings = Settings::load_or_create(&paths)?;
            handle_config_command(&paths, settings, cmd)?;
        }
        Some(Commands::Expense(cmd)) => {
            let settings = Settings::load_or_create(&paths)?;
            let storage = open_storage(&paths)?;
            handle_expense_command(&storage, &settings, today, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            let settings = Settings::load_or_create(&paths)?;
            let storage = open_storage(&paths)?;
            handle_report_command(&storage, &settings, today, cmd)?;
        }
        None => {
            println!("Kakeibo - shared household expense ledger");
            println!();
            println!("Run 'kakeibo --help' for usage information.");
        }
    }

    Ok(())
}

fn open_storage(paths: &KakeiboPaths) -> Result<Storage> {
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;
    Ok(storage)
}
