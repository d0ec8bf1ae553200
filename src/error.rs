//! Custom error types for Kakeibo
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for Kakeibo operations
#[derive(Error, Debug)]
pub enum KakeiboError {
    /// Configuration-related errors (participants, cutoff day, categories)
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// A single expense record is malformed (bad date, bad amount, ...)
    #[error("Invalid record at line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },

    /// A record names a payer outside the configured participant set
    #[error("Unknown participant '{participant}' in expense {record}")]
    UnknownParticipant { participant: String, record: String },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl KakeiboError {
    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a configuration error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for KakeiboError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for KakeiboError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for KakeiboError {
    fn from(err: csv::Error) -> Self {
        Self::Import(err.to_string())
    }
}

/// Result type alias for Kakeibo operations
pub type KakeiboResult<T> = Result<T, KakeiboError>;
