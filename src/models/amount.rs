//! Amount type for representing expense values
//!
//! Amounts are plain decimals in the ledger's single currency. They are kept
//! at full `f64` precision through every computation and only rounded to two
//! decimals when displayed, so splitting a total across participants never
//! compounds rounding error.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Neg, Sub, SubAssign};

/// Tolerance under which an amount is considered zero.
pub const EPSILON: f64 = 1e-6;

/// Rounding allowance per unit of magnitude for values derived from large sums
pub const RELATIVE_EPSILON: f64 = 1e-12;

/// A monetary amount in the ledger currency
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(f64);

impl Amount {
    /// Create an amount from a raw value
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Create a zero amount
    pub const fn zero() -> Self {
        Self(0.0)
    }

    /// Get the raw value
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Check if the amount is within [`EPSILON`] of zero
    pub fn is_negligible(&self) -> bool {
        self.0.abs() <= EPSILON
    }

    /// Zero tolerance for values computed from sums of about this size
    ///
    /// [`EPSILON`] for everyday totals; grows with the magnitude once `f64`
    /// rounding of the sum itself exceeds it.
    pub fn tolerance(&self) -> f64 {
        EPSILON.max(self.0.abs() * RELATIVE_EPSILON)
    }

    /// Strictly above zero, ignoring floating-point residue
    pub fn is_positive(&self) -> bool {
        self.0 > EPSILON
    }

    /// Strictly below zero, ignoring floating-point residue
    pub fn is_negative(&self) -> bool {
        self.0 < -EPSILON
    }

    /// Get the absolute value
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// The smaller of two amounts
    pub fn min(self, other: Self) -> Self {
        Self(self.0.min(other.0))
    }

    /// Fraction of `total` this amount represents, or `None` for an empty total
    pub fn share_of(&self, total: Amount) -> Option<f64> {
        if total.is_negligible() {
            None
        } else {
            Some(self.0 / total.0)
        }
    }

    /// Parse an amount from user input
    ///
    /// Accepts formats: "1200", "1,200", "12.50", "¥1200", "$12.50"
    pub fn parse(s: &str) -> Result<Self, AmountParseError> {
        let trimmed = s.trim();
        let stripped = trimmed
            .trim_start_matches(['$', '¥', '€', '£'])
            .trim_end_matches('円')
            .replace(',', "");

        let value: f64 = stripped
            .trim()
            .parse()
            .map_err(|_| AmountParseError::InvalidFormat(trimmed.to_string()))?;

        if !value.is_finite() {
            return Err(AmountParseError::NotFinite(trimmed.to_string()));
        }

        Ok(Self(value))
    }

    /// Format with a currency symbol, rounded to two decimals
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{}{:.2}", symbol, self.0.abs())
        } else {
            format!("{}{:.2}", symbol, self.0.abs())
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Residue like -0.0000000001 must not render as "-0.00"
        if self.is_negligible() {
            write!(f, "0.00")
        } else {
            write!(f, "{:.2}", self.0)
        }
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Amount {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Amount {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Div<usize> for Amount {
    type Output = Self;

    fn div(self, divisor: usize) -> Self {
        Self(self.0 / divisor as f64)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |acc, a| acc + a)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |acc, a| acc + *a)
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

/// Error type for amount parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountParseError {
    InvalidFormat(String),
    NotFinite(String),
}

impl fmt::Display for AmountParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountParseError::InvalidFormat(s) => write!(f, "Invalid amount format: {}", s),
            AmountParseError::NotFinite(s) => write!(f, "Amount is not a finite number: {}", s),
        }
    }
}

impl std::error::Error for AmountParseError {}
