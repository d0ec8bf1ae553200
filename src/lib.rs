//! Kakeibo - shared household expense ledger
//!
//! This library provides the core functionality for the Kakeibo application.
//! A fixed group of participants records dated, categorized expenses; the
//! library buckets them into settlement periods (calendar months or a custom
//! cutoff day), summarises spending per period, and works out the transfers
//! that leave everyone having paid an equal share.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, amounts, periods, balances)
//! - `storage`: JSON file storage layer
//! - `services`: Period resolution, balances, settlement, expense CRUD, CSV import
//! - `reports`: Period analysis and settlement reports
//! - `display`: Terminal formatting helpers
//! - `cli`: Command handlers for the `kakeibo` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use kakeibo::config::{KakeiboPaths, Settings};
//! use kakeibo::services::{settle_period, PeriodService};
//!
//! let paths = KakeiboPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let period = PeriodService::new(&settings.settlement_period).current_period(today);
//! let plan = settle_period(&records, &settings.participant_set()?, period)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::KakeiboError;
