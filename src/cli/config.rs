//! Configuration CLI commands
//!
//! View and change the participants, categories and settlement-period policy.
//! Every change is validated before the settings file is rewritten.

use clap::{ArgGroup, Subcommand};

use crate::config::{KakeiboPaths, Settings};
use crate::error::KakeiboResult;
use crate::models::SettlementPeriodConfig;

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration and paths
    Show,

    /// Set how expenses are grouped into settlement periods
    #[command(group(ArgGroup::new("mode").required(true).args(["cutoff", "calendar"])))]
    Period {
        /// Close each period on this day of the month (1-28)
        #[arg(long)]
        cutoff: Option<u32>,

        /// Use calendar months
        #[arg(long)]
        calendar: bool,
    },

    /// Replace the participant list (order is the settlement order)
    Participants {
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Replace the category list
    Categories {
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Set the currency symbol used in output
    Currency { symbol: String },
}

/// Handle a config command
pub fn handle_config_command(
    paths: &KakeiboPaths,
    mut settings: Settings,
    cmd: ConfigCommands,
) -> KakeiboResult<()> {
    match cmd {
        ConfigCommands::Show => {
            print!("{}", format_settings(paths, &settings));
            return Ok(());
        }
        ConfigCommands::Period { cutoff, .. } => {
            settings.settlement_period = match cutoff {
                Some(day) => SettlementPeriodConfig::custom(day)?,
                None => SettlementPeriodConfig::calendar_month(),
            };
            println!(
                "Settlement period: {}",
                settings.settlement_period.describe()
            );
        }
        ConfigCommands::Participants { names } => {
            settings.participants = names.iter().map(|n| n.trim().to_string()).collect();
            settings.participant_set()?;
            println!("Participants: {}", settings.participants.join(", "));
        }
        ConfigCommands::Categories { names } => {
            settings.categories = names.iter().map(|n| n.trim().to_string()).collect();
            println!("Categories: {}", settings.categories.join(", "));
        }
        ConfigCommands::Currency { symbol } => {
            settings.currency_symbol = symbol;
            println!("Currency symbol: {}", settings.currency_symbol);
        }
    }

    settings.save(paths)?;
    log::info!("Saved settings to {}", paths.settings_file().display());
    Ok(())
}

/// Render settings and paths for `config show`
pub fn format_settings(paths: &KakeiboPaths, settings: &Settings) -> String {
    let mut output = String::new();
    output.push_str("Kakeibo Configuration\n");
    output.push_str("=====================\n");
    output.push_str(&format!("Base directory:  {}\n", paths.base_dir().display()));
    output.push_str(&format!("Settings file:   {}\n", paths.settings_file().display()));
    output.push_str(&format!("Expenses file:   {}\n", paths.expenses_file().display()));
    output.push('\n');
    output.push_str(&format!(
        "Participants:    {}\n",
        settings.participants.join(", ")
    ));
    output.push_str(&format!("Categories:      {}\n", settings.categories.join(", ")));
    output.push_str(&format!(
        "Period:          {}\n",
        settings.settlement_period.describe()
    ));
    output.push_str(&format!("Currency:        {}\n", settings.currency_symbol));
    output
}
