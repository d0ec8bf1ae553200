//! Core data models for Kakeibo
//!
//! This module contains the data structures of the shared-expense domain:
//! expense records, amounts, participants, settlement periods, balances and
//! transfers.

pub mod amount;
pub mod expense;
pub mod ids;
pub mod participant;
pub mod period;
pub mod settlement;

pub use amount::{Amount, AmountParseError, EPSILON, RELATIVE_EPSILON};
pub use expense::{ExpenseRecord, DATE_FORMAT};
pub use ids::ExpenseId;
pub use participant::ParticipantSet;
pub use period::{CutoffDay, Period, SettlementPeriodConfig};
pub use settlement::{Balance, Balances, Transfer};
