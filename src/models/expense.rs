//! Expense record model
//!
//! An expense is an immutable fact: on a given date, one participant paid an
//! amount for something in a category. Edits replace the stored record.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::amount::Amount;
use super::ids::ExpenseId;
use crate::error::{KakeiboError, KakeiboResult};

/// Date format used for storage, CLI input and period keys
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A recorded shared expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Unique identifier
    pub id: ExpenseId,

    /// Date the expense was paid
    pub date: NaiveDate,

    /// Participant who paid
    pub payer: String,

    /// Amount paid
    pub amount: Amount,

    /// Category label
    pub category: String,

    /// Free-form note
    #[serde(default)]
    pub memo: String,

    /// When the record was created
    pub created_at: DateTime<Utc>,

    /// When the record was last modified
    pub updated_at: DateTime<Utc>,
}

impl ExpenseRecord {
    /// Create a new expense record
    pub fn new(
        date: NaiveDate,
        payer: impl Into<String>,
        amount: Amount,
        category: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ExpenseId::new(),
            date,
            payer: payer.into(),
            amount,
            category: category.into(),
            memo: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Builder-style memo setter
    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    /// Mark the record as modified now
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Parse a `YYYY-MM-DD` date, rejecting impossible calendar dates
    pub fn parse_date(input: &str) -> KakeiboResult<NaiveDate> {
        NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| {
            KakeiboError::Validation(format!(
                "Invalid date '{}'. Use YYYY-MM-DD",
                input.trim()
            ))
        })
    }
}

impl fmt::Display for ExpenseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} paid {} for {}",
            self.date.format(DATE_FORMAT),
            self.payer,
            self.amount,
            self.category
        )
    }
}
