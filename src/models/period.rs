//! Settlement period representation
//!
//! A period is an inclusive date range over which expenses are pooled and
//! equalized. Periods are never stored; they are derived from a reference
//! date and the [`SettlementPeriodConfig`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::expense::DATE_FORMAT;
use crate::error::KakeiboError;

/// Separator between the bounds in a period key
pub const KEY_SEPARATOR: &str = " ~ ";

/// An inclusive accounting period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    /// Create a period from inclusive bounds
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Check if a date falls within this period
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Stable grouping key, e.g. "2024-02-21 ~ 2024-03-20"
    ///
    /// ISO dates sort lexicographically in calendar order, so comparing keys
    /// as strings orders periods chronologically.
    pub fn key(&self) -> String {
        format!(
            "{}{}{}",
            self.start.format(DATE_FORMAT),
            KEY_SEPARATOR,
            self.end.format(DATE_FORMAT)
        )
    }

    /// Number of days covered
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl Ord for Period {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.start.cmp(&other.start).then(self.end.cmp(&other.end))
    }
}

impl PartialOrd for Period {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Day-of-month on which a custom settlement period closes
///
/// Restricted to 1..=28 so the cutoff exists in every month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct CutoffDay(u32);

impl CutoffDay {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 28;

    /// The day of month
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for CutoffDay {
    type Error = KakeiboError;

    fn try_from(day: u32) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&day) {
            Ok(Self(day))
        } else {
            Err(KakeiboError::Config(format!(
                "cutoff day must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                day
            )))
        }
    }
}

impl From<CutoffDay> for u32 {
    fn from(day: CutoffDay) -> Self {
        day.0
    }
}

impl Default for CutoffDay {
    fn default() -> Self {
        Self(25)
    }
}

impl fmt::Display for CutoffDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How records are bucketed into settlement periods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SettlementPeriodConfig {
    /// Use the cutoff day instead of calendar months
    #[serde(default)]
    pub use_custom_cutoff: bool,

    /// Last day of each custom period
    #[serde(default)]
    pub cutoff_day: CutoffDay,
}

impl SettlementPeriodConfig {
    /// Calendar-month periods
    pub fn calendar_month() -> Self {
        Self::default()
    }

    /// Custom periods closing on `cutoff_day` of each month
    pub fn custom(cutoff_day: u32) -> Result<Self, KakeiboError> {
        Ok(Self {
            use_custom_cutoff: true,
            cutoff_day: CutoffDay::try_from(cutoff_day)?,
        })
    }

    /// Human-friendly description
    pub fn describe(&self) -> String {
        if self.use_custom_cutoff {
            format!("custom (closes on day {} of each month)", self.cutoff_day)
        } else {
            "calendar month".to_string()
        }
    }
}
