//! Settlement period service
//!
//! Resolves the period a date belongs to under the configured policy, and
//! provides navigation and parsing of period references. "Today" is always
//! passed in by the caller; nothing here reads the clock.

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::error::{KakeiboError, KakeiboResult};
use crate::models::{ExpenseRecord, Period, SettlementPeriodConfig};

/// Map a date to the settlement period containing it
///
/// Calendar mode yields the date's month. With a custom cutoff `c`, a date on
/// or before day `c` belongs to the period ending on day `c` of its month;
/// a later date belongs to the period ending on day `c` of the next month.
/// Each period starts the day after the previous period's cutoff.
pub fn resolve_period(reference: NaiveDate, config: &SettlementPeriodConfig) -> Period {
    let month_start = first_of_month(reference);

    if !config.use_custom_cutoff {
        let next_month = month_start + Months::new(1);
        return Period::new(month_start, next_month - Days::new(1));
    }

    let cutoff = config.cutoff_day.get();
    if reference.day() <= cutoff {
        let prev_month = month_start - Months::new(1);
        Period::new(
            cutoff_date(prev_month, cutoff) + Days::new(1),
            cutoff_date(month_start, cutoff),
        )
    } else {
        let next_month = month_start + Months::new(1);
        Period::new(
            cutoff_date(month_start, cutoff) + Days::new(1),
            cutoff_date(next_month, cutoff),
        )
    }
}

/// Records whose date falls within `period`
pub fn records_in_period(records: &[ExpenseRecord], period: &Period) -> Vec<ExpenseRecord> {
    records
        .iter()
        .filter(|r| period.contains(r.date))
        .cloned()
        .collect()
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

// cutoff is 1..=28, so it exists in every month
fn cutoff_date(month_start: NaiveDate, cutoff: u32) -> NaiveDate {
    month_start + Days::new(u64::from(cutoff - 1))
}

/// Service for settlement period management
pub struct PeriodService<'a> {
    config: &'a SettlementPeriodConfig,
}

impl<'a> PeriodService<'a> {
    /// Create a new period service
    pub fn new(config: &'a SettlementPeriodConfig) -> Self {
        Self { config }
    }

    /// Get the period containing a specific date
    pub fn period_for_date(&self, date: NaiveDate) -> Period {
        resolve_period(date, self.config)
    }

    /// Get the period containing `today`
    pub fn current_period(&self, today: NaiveDate) -> Period {
        let period = self.period_for_date(today);
        log::debug!("Current period for {} is {}", today, period);
        period
    }

    /// Get the period after the given one
    pub fn next_period(&self, period: &Period) -> Period {
        self.period_for_date(period.end + Days::new(1))
    }

    /// Get the period before the given one
    pub fn previous_period(&self, period: &Period) -> Period {
        self.period_for_date(period.start - Days::new(1))
    }

    /// Parse a period reference or fall back to the current period
    pub fn parse_or_current(&self, input: Option<&str>, today: NaiveDate) -> KakeiboResult<Period> {
        match input {
            Some(s) => self.parse(s, today),
            None => Ok(self.current_period(today)),
        }
    }

    /// Parse a period reference
    ///
    /// Formats supported:
    /// - Relative: "current", "now", "this", "last", "previous", "prev", "next"
    /// - A date "2024-03-15": the period containing that date
    /// - A month "2024-03": the period that ends in that month
    pub fn parse(&self, input: &str, today: NaiveDate) -> KakeiboResult<Period> {
        let s = input.trim().to_lowercase();

        match s.as_str() {
            "current" | "now" | "this" => return Ok(self.current_period(today)),
            "last" | "previous" | "prev" => {
                return Ok(self.previous_period(&self.current_period(today)))
            }
            "next" => return Ok(self.next_period(&self.current_period(today))),
            _ => {}
        }

        if let Ok(date) = NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
            return Ok(self.period_for_date(date));
        }

        if let Ok(month_start) = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d") {
            let anchor = if self.config.use_custom_cutoff {
                cutoff_date(month_start, self.config.cutoff_day.get())
            } else {
                month_start
            };
            return Ok(self.period_for_date(anchor));
        }

        Err(KakeiboError::Validation(format!(
            "Invalid period '{}'. Use YYYY-MM, YYYY-MM-DD, current, last or next",
            input.trim()
        )))
    }

    /// The last `count` periods up to and including the current one, oldest first
    pub fn recent_periods(&self, today: NaiveDate, count: usize) -> Vec<Period> {
        let mut periods = Vec::with_capacity(count);
        let mut current = self.current_period(today);

        for _ in 0..count {
            periods.push(current);
            current = self.previous_period(&current);
        }

        periods.reverse();
        periods
    }

    /// Format a period in a human-friendly way
    pub fn format_period_friendly(&self, period: &Period) -> String {
        if self.config.use_custom_cutoff {
            format!(
                "{} - {}",
                period.start.format("%b %d"),
                period.end.format("%b %d, %Y")
            )
        } else {
            period.start.format("%B %Y").to_string()
        }
    }

    /// Check if a period is the one containing `today`
    pub fn is_current(&self, period: &Period, today: NaiveDate) -> bool {
        period.contains(today)
    }
}
