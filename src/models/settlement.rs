//! Balance and transfer models
//!
//! Balances are per-participant surpluses (positive) or deficits (negative)
//! against the equal share of one period. Transfers are the payment
//! instructions that bring every balance back to zero.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::amount::Amount;

/// One participant's net position for a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    pub participant: String,
    /// Total the participant paid in the period
    pub paid: Amount,
    /// `paid - equal_share`
    pub amount: Amount,
}

/// Balances of every participant, in participant order
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Balances {
    /// Sum of all amounts paid
    pub total: Amount,
    /// `total / participant count`
    pub equal_share: Amount,
    pub entries: Vec<Balance>,
}

impl Balances {
    /// Balance of a participant, zero when unknown
    pub fn get(&self, participant: &str) -> Amount {
        self.entries
            .iter()
            .find(|b| b.participant == participant)
            .map(|b| b.amount)
            .unwrap_or_default()
    }

    /// Sum of all balances (zero up to floating-point residue)
    pub fn sum(&self) -> Amount {
        self.entries.iter().map(|b| b.amount).sum()
    }

    /// Magnitude under which a single balance counts as zero
    pub fn threshold(&self) -> f64 {
        self.total.tolerance()
    }

    /// Largest residue the balances may keep after settling, one threshold
    /// per participant plus one for the equal-share division
    pub fn residue_tolerance(&self) -> f64 {
        self.threshold() * (self.entries.len() + 1) as f64
    }

    /// True when nobody owes anything
    pub fn is_settled(&self) -> bool {
        let threshold = self.threshold();
        self.entries
            .iter()
            .all(|b| b.amount.value().abs() <= threshold)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Balance> {
        self.entries.iter()
    }
}

/// A directed payment from a participant in deficit to one in surplus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: String,
    pub to: String,
    pub amount: Amount,
}

impl Transfer {
    pub fn new(from: impl Into<String>, to: impl Into<String>, amount: Amount) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            amount,
        }
    }
}

impl fmt::Display for Transfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} pays {} {}", self.from, self.to, self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EPSILON;

    fn balances() -> Balances {
        Balances {
            total: Amount::new(300.0),
            equal_share: Amount::new(100.0),
            entries: vec![
                Balance {
                    participant: "A".into(),
                    paid: Amount::new(300.0),
                    amount: Amount::new(200.0),
                },
                Balance {
                    participant: "B".into(),
                    paid: Amount::zero(),
                    amount: Amount::new(-100.0),
                },
                Balance {
                    participant: "C".into(),
                    paid: Amount::zero(),
                    amount: Amount::new(-100.0),
                },
            ],
        }
    }

    #[test]
    fn test_get_and_sum() {
        let b = balances();
        assert_eq!(b.get("A"), Amount::new(200.0));
        assert_eq!(b.get("Z"), Amount::zero());
        assert!(b.sum().is_negligible());
        assert!(!b.is_settled());
    }

    #[test]
    fn test_threshold_follows_total() {
        let mut b = balances();
        assert_eq!(b.threshold(), EPSILON);
        assert_eq!(b.residue_tolerance(), 4.0 * EPSILON);

        b.total = Amount::new(1e11);
        b.entries[0].amount = Amount::new(0.01);
        b.entries[1].amount = Amount::new(-0.01);
        b.entries[2].amount = Amount::zero();
        assert!(b.is_settled());
    }

    #[test]
    fn test_transfer_display() {
        let t = Transfer::new("B", "A", Amount::new(100.0));
        assert_eq!(t.to_string(), "B pays A 100.00");
    }
}
