//! Settlement report
//!
//! Who paid what in a period, how far each participant is from the equal
//! share, and the transfers that even things out.

use std::io::Write;

use super::analysis::csv_field;
use crate::display::report::{double_separator, format_balance_colored, separator};
use crate::error::{KakeiboError, KakeiboResult};
use crate::models::{ExpenseRecord, ParticipantSet, Period};
use crate::services::settlement::{settle_period, SettlementPlan};

/// Settlement plan for one period, ready for rendering
#[derive(Debug, Clone)]
pub struct SettlementReport {
    pub plan: SettlementPlan,
    pub currency_symbol: String,
}

impl SettlementReport {
    /// Filter, balance and plan the settlement for `period`
    pub fn generate(
        records: &[ExpenseRecord],
        participants: &ParticipantSet,
        period: Period,
        currency_symbol: &str,
    ) -> KakeiboResult<Self> {
        Ok(Self {
            plan: settle_period(records, participants, period)?,
            currency_symbol: currency_symbol.to_string(),
        })
    }

    /// True when no money needs to move
    pub fn is_settled(&self) -> bool {
        self.plan.transfers.is_empty()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let plan = &self.plan;
        let symbol = self.currency_symbol.as_str();
        let mut output = String::new();

        output.push_str(&format!("Settlement: {}\n", plan.period.key()));
        output.push_str(&double_separator(56));
        output.push('\n');
        output.push_str(&format!(
            "Total spent:  {}  ({} expenses)\n",
            plan.balances.total.format_with_symbol(symbol),
            plan.record_count
        ));
        output.push_str(&format!(
            "Equal share:  {}\n\n",
            plan.balances.equal_share.format_with_symbol(symbol)
        ));

        output.push_str(&format!(
            "{:<16} {:>14} {:>14}\n",
            "Participant", "Paid", "Balance"
        ));
        output.push_str(&separator(56));
        output.push('\n');
        for balance in plan.balances.iter() {
            output.push_str(&format!(
                "{:<16} {:>14} {:>14}\n",
                balance.participant,
                balance.paid.format_with_symbol(symbol),
                format_balance_colored(balance.amount)
            ));
        }
        output.push('\n');

        if self.is_settled() {
            output.push_str("No settlement needed.\n");
        } else {
            output.push_str("Transfers\n");
            output.push_str(&separator(56));
            output.push('\n');
            for transfer in &plan.transfers {
                output.push_str(&format!(
                    "  {} -> {}: {}\n",
                    transfer.from,
                    transfer.to,
                    transfer.amount.format_with_symbol(symbol)
                ));
            }
        }

        output
    }

    /// Export balances and transfers to CSV
    ///
    /// Columns: `Period,Kind,From,To,Amount`. Balance rows leave `To` empty.
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> KakeiboResult<()> {
        let export_err = |e: std::io::Error| KakeiboError::Export(e.to_string());
        let key = self.plan.period.key();

        writeln!(writer, "Period,Kind,From,To,Amount").map_err(export_err)?;

        for balance in self.plan.balances.iter() {
            writeln!(
                writer,
                "{},balance,{},,{:.2}",
                key,
                csv_field(&balance.participant),
                balance.amount.value()
            )
            .map_err(export_err)?;
        }

        for transfer in &self.plan.transfers {
            writeln!(
                writer,
                "{},transfer,{},{},{:.2}",
                key,
                csv_field(&transfer.from),
                csv_field(&transfer.to),
                transfer.amount.value()
            )
            .map_err(export_err)?;
        }

        Ok(())
    }
}
