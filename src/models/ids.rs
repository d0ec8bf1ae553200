//! Strongly-typed identifier for expense records
//!
//! The record store treats the identifier as opaque; the newtype keeps it from
//! being confused with participant or category strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

const DISPLAY_PREFIX: &str = "exp-";

/// Identifier of a stored expense record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(Uuid);

impl ExpenseId {
    /// Create a new random ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Short form shown in listings ("exp-" + first 8 hex digits)
    pub fn short(&self) -> String {
        format!("{}{}", DISPLAY_PREFIX, &self.0.simple().to_string()[..8])
    }

    /// Check whether user input refers to this ID
    ///
    /// Accepts the full UUID, the short display form, or a bare hex prefix of
    /// at least four characters.
    pub fn matches(&self, input: &str) -> bool {
        let input = input.trim().to_lowercase();
        if let Ok(uuid) = Uuid::parse_str(&input) {
            return uuid == self.0;
        }
        let hex = input.strip_prefix(DISPLAY_PREFIX).unwrap_or(&input);
        hex.len() >= 4 && self.0.simple().to_string().starts_with(hex)
    }
}

impl Default for ExpenseId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short())
    }
}

impl From<Uuid> for ExpenseId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}
