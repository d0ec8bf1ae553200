//! Service layer for Kakeibo
//!
//! The pure core (period resolution, balances, settlement planning) sits next
//! to the storage-backed services that validate and persist expenses.

pub mod balance;
pub mod expense;
pub mod import;
pub mod period;
pub mod settlement;

pub use balance::compute_balances;
pub use expense::{CreateExpenseInput, ExpenseFilter, ExpenseService, UpdateExpenseInput};
pub use import::{ColumnMapping, ImportResult, ImportService};
pub use period::{records_in_period, resolve_period, PeriodService};
pub use settlement::{plan_settlements, settle_period, SettlementPlan};
