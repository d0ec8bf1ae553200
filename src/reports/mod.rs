//! Reports module for Kakeibo
//!
//! Per-period spending analysis and the settlement plan, each with terminal
//! rendering and CSV export.

pub mod analysis;
pub mod settlement;

pub use analysis::{aggregate, AnalysisReport, PeriodAnalysis};
pub use settlement::SettlementReport;
