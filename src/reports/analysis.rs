//! Period analysis report
//!
//! Buckets every record by the settlement period of its own date and sums the
//! spending per period, per category and per payer.

use std::collections::BTreeMap;
use std::io::Write;

use crate::display::report::{double_separator, format_bar, format_share, separator};
use crate::error::{KakeiboError, KakeiboResult};
use crate::models::{Amount, ExpenseRecord, Period, SettlementPeriodConfig};
use crate::services::period::resolve_period;

/// Spending totals for one period
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodAnalysis {
    pub period: Period,
    pub period_key: String,
    pub total_amount: Amount,
    pub category_totals: BTreeMap<String, Amount>,
    pub participant_totals: BTreeMap<String, Amount>,
    pub record_count: usize,
}

impl PeriodAnalysis {
    fn empty(period: Period) -> Self {
        Self {
            period_key: period.key(),
            period,
            total_amount: Amount::zero(),
            category_totals: BTreeMap::new(),
            participant_totals: BTreeMap::new(),
            record_count: 0,
        }
    }

    fn add(&mut self, record: &ExpenseRecord) {
        self.total_amount += record.amount;
        *self
            .category_totals
            .entry(record.category.clone())
            .or_default() += record.amount;
        *self
            .participant_totals
            .entry(record.payer.clone())
            .or_default() += record.amount;
        self.record_count += 1;
    }

    /// Share of the period total spent in `category`
    pub fn category_share(&self, category: &str) -> Option<f64> {
        self.category_totals
            .get(category)
            .and_then(|amount| amount.share_of(self.total_amount))
    }

    /// Share of the period total paid by `participant`
    pub fn participant_share(&self, participant: &str) -> Option<f64> {
        self.participant_totals
            .get(participant)
            .and_then(|amount| amount.share_of(self.total_amount))
    }
}

/// Group `records` by period, newest period first
pub fn aggregate(records: &[ExpenseRecord], config: &SettlementPeriodConfig) -> Vec<PeriodAnalysis> {
    let mut periods: BTreeMap<String, PeriodAnalysis> = BTreeMap::new();

    for record in records {
        let period = resolve_period(record.date, config);
        periods
            .entry(period.key())
            .or_insert_with(|| PeriodAnalysis::empty(period))
            .add(record);
    }

    log::debug!(
        "Aggregated {} records into {} periods",
        records.len(),
        periods.len()
    );

    periods.into_values().rev().collect()
}

/// Analysis of every period with spending
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub periods: Vec<PeriodAnalysis>,
    pub currency_symbol: String,
}

const BAR_WIDTH: usize = 20;

impl AnalysisReport {
    /// Generate the report over a full record snapshot
    pub fn generate(
        records: &[ExpenseRecord],
        config: &SettlementPeriodConfig,
        currency_symbol: &str,
    ) -> Self {
        Self {
            periods: aggregate(records, config),
            currency_symbol: currency_symbol.to_string(),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        if self.periods.is_empty() {
            return "No expenses recorded yet.\n".to_string();
        }

        let mut output = String::new();
        for analysis in &self.periods {
            output.push_str(&format!("Period: {}\n", analysis.period_key));
            output.push_str(&double_separator(64));
            output.push('\n');
            output.push_str(&format!(
                "Total: {}  ({} expenses)\n\n",
                analysis.total_amount.format_with_symbol(&self.currency_symbol),
                analysis.record_count
            ));

            self.push_section(&mut output, "By category", &analysis.category_totals, analysis);
            output.push('\n');
            self.push_section(&mut output, "By payer", &analysis.participant_totals, analysis);
            output.push('\n');
        }
        output
    }

    fn push_section(
        &self,
        output: &mut String,
        title: &str,
        totals: &BTreeMap<String, Amount>,
        analysis: &PeriodAnalysis,
    ) {
        output.push_str(&format!("{}\n", title));
        output.push_str(&separator(64));
        output.push('\n');

        let max = totals
            .values()
            .map(|a| a.value())
            .fold(0.0_f64, f64::max);
        for (name, amount) in totals {
            output.push_str(&format!(
                "  {:<16} {:>12} {:>6}  {}\n",
                name,
                amount.format_with_symbol(&self.currency_symbol),
                format_share(amount.share_of(analysis.total_amount)),
                format_bar(amount.value(), max, BAR_WIDTH)
            ));
        }
    }

    /// Export the report to CSV format
    ///
    /// One row per (period, kind, name); `Kind` is `total`, `category` or
    /// `participant`. Percentage is empty when the period total is zero.
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> KakeiboResult<()> {
        let export_err = |e: std::io::Error| KakeiboError::Export(e.to_string());

        writeln!(writer, "Period,Kind,Name,Amount,Percentage").map_err(export_err)?;

        for analysis in &self.periods {
            writeln!(
                writer,
                "{},total,,{:.2},100.00",
                analysis.period_key,
                analysis.total_amount.value()
            )
            .map_err(export_err)?;

            let rows = analysis
                .category_totals
                .iter()
                .map(|row| ("category", row))
                .chain(
                    analysis
                        .participant_totals
                        .iter()
                        .map(|row| ("participant", row)),
                );
            for (kind, (name, amount)) in rows {
                let pct = amount
                    .share_of(analysis.total_amount)
                    .map(|s| format!("{:.2}", s * 100.0))
                    .unwrap_or_default();
                writeln!(
                    writer,
                    "{},{},{},{:.2},{}",
                    analysis.period_key,
                    kind,
                    csv_field(name),
                    amount.value(),
                    pct
                )
                .map_err(export_err)?;
            }
        }

        Ok(())
    }
}

/// Quote a CSV field when it contains a delimiter, quote or newline
pub(crate) fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(y: i32, m: u32, d: u32, payer: &str, amount: f64, category: &str) -> ExpenseRecord {
        ExpenseRecord::new(
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            payer,
            Amount::new(amount),
            category,
        )
    }

    fn sample() -> Vec<ExpenseRecord> {
        vec![
            record(2024, 2, 25, "A", 100.0, "Food"),
            record(2024, 3, 15, "B", 200.0, "Food"),
            record(2024, 3, 20, "A", 50.0, "Utilities"),
            record(2024, 3, 21, "C", 70.0, "Food"),
        ]
    }

    #[test]
    fn test_aggregate_custom_cutoff() {
        let config = SettlementPeriodConfig::custom(20).unwrap();
        let periods = aggregate(&sample(), &config);

        let keys: Vec<&str> = periods.iter().map(|p| p.period_key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["2024-03-21 ~ 2024-04-20", "2024-02-21 ~ 2024-03-20"]
        );

        let feb_mar = &periods[1];
        assert_eq!(feb_mar.record_count, 3);
        assert_eq!(feb_mar.total_amount, Amount::new(350.0));
        assert_eq!(feb_mar.category_totals["Food"], Amount::new(300.0));
        assert_eq!(feb_mar.category_totals["Utilities"], Amount::new(50.0));
        assert_eq!(feb_mar.participant_totals["A"], Amount::new(150.0));
        assert_eq!(feb_mar.participant_totals["B"], Amount::new(200.0));
        assert!(!feb_mar.participant_totals.contains_key("C"));
    }

    #[test]
    fn test_aggregate_calendar() {
        let periods = aggregate(&sample(), &SettlementPeriodConfig::calendar_month());

        assert_eq!(periods.len(), 2);
        assert_eq!(periods[0].period_key, "2024-03-01 ~ 2024-03-31");
        assert_eq!(periods[0].total_amount, Amount::new(320.0));
        assert_eq!(periods[1].period_key, "2024-02-01 ~ 2024-02-29");
    }

    #[test]
    fn test_aggregate_empty() {
        assert!(aggregate(&[], &SettlementPeriodConfig::default()).is_empty());
    }

    #[test]
    fn test_shares() {
        let periods = aggregate(
            &[record(2024, 5, 1, "A", 25.0, "Food"), record(2024, 5, 2, "B", 75.0, "Other")],
            &SettlementPeriodConfig::calendar_month(),
        );
        let may = &periods[0];
        assert_eq!(may.category_share("Food"), Some(0.25));
        assert_eq!(may.participant_share("B"), Some(0.75));
        assert_eq!(may.category_share("Laundry"), None);
    }

    #[test]
    fn test_zero_total_has_no_share() {
        let periods = aggregate(
            &[record(2024, 5, 1, "A", 0.0, "Food")],
            &SettlementPeriodConfig::calendar_month(),
        );
        assert_eq!(periods[0].category_share("Food"), None);
    }

    #[test]
    fn test_export_csv() {
        let report = AnalysisReport::generate(
            &[record(2024, 5, 1, "A", 25.0, "Food"), record(2024, 5, 2, "B", 75.0, "Other")],
            &SettlementPeriodConfig::calendar_month(),
            "¥",
        );
        let mut buf = Vec::new();
        report.export_csv(&mut buf).unwrap();
        let csv = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "Period,Kind,Name,Amount,Percentage");
        assert_eq!(lines[1], "2024-05-01 ~ 2024-05-31,total,,100.00,100.00");
        assert_eq!(lines[2], "2024-05-01 ~ 2024-05-31,category,Food,25.00,25.00");
        assert_eq!(lines[5], "2024-05-01 ~ 2024-05-31,participant,B,75.00,75.00");
    }

    #[test]
    fn test_format_terminal() {
        let report = AnalysisReport::generate(&sample(), &SettlementPeriodConfig::default(), "¥");
        let output = report.format_terminal();

        assert!(output.contains("Period: 2024-03-01 ~ 2024-03-31"));
        assert!(output.contains("By category"));
        assert!(output.contains("¥320.00"));

        let empty = AnalysisReport::generate(&[], &SettlementPeriodConfig::default(), "¥");
        assert_eq!(empty.format_terminal(), "No expenses recorded yet.\n");
    }

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("Food"), "Food");
        assert_eq!(csv_field("Rent, shared"), "\"Rent, shared\"");
    }
}
