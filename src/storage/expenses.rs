//! Expense repository for JSON storage
//!
//! Manages loading and saving expense records to expenses.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;

use crate::error::KakeiboError;
use crate::models::{ExpenseId, ExpenseRecord};

use super::file_io::{read_json, write_json_atomic};

/// Serializable expense data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    expenses: Vec<ExpenseRecord>,
}

/// Repository for expense persistence
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<HashMap<ExpenseId, ExpenseRecord>>,
}

/// Newest first; ties broken by creation time so listings are stable
fn sort_newest_first(records: &mut [ExpenseRecord]) {
    records.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then(b.created_at.cmp(&a.created_at))
            .then(a.id.cmp(&b.id))
    });
}

impl ExpenseRepository {
    /// Create a new expense repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<ExpenseId, ExpenseRecord>>, KakeiboError> {
        self.data
            .read()
            .map_err(|e| KakeiboError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(
        &self,
    ) -> Result<RwLockWriteGuard<'_, HashMap<ExpenseId, ExpenseRecord>>, KakeiboError> {
        self.data
            .write()
            .map_err(|e| KakeiboError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load expenses from disk
    pub fn load(&self) -> Result<(), KakeiboError> {
        let file_data: ExpenseData = read_json(&self.path)?;

        let mut data = self.write()?;
        data.clear();
        for record in file_data.expenses {
            data.insert(record.id, record);
        }

        log::debug!("Loaded {} expenses from {}", data.len(), self.path.display());
        Ok(())
    }

    /// Save expenses to disk
    pub fn save(&self) -> Result<(), KakeiboError> {
        let mut expenses: Vec<_> = self.read()?.values().cloned().collect();
        sort_newest_first(&mut expenses);

        write_json_atomic(&self.path, &ExpenseData { expenses })
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> Result<Option<ExpenseRecord>, KakeiboError> {
        Ok(self.read()?.get(&id).cloned())
    }

    /// Find an expense by full or short ID
    ///
    /// Returns a validation error when a short prefix is ambiguous.
    pub fn find(&self, input: &str) -> Result<Option<ExpenseRecord>, KakeiboError> {
        let data = self.read()?;
        let mut matches = data.values().filter(|r| r.id.matches(input));

        let first = matches.next().cloned();
        if first.is_some() && matches.next().is_some() {
            return Err(KakeiboError::Validation(format!(
                "Expense ID '{}' is ambiguous; use more characters",
                input
            )));
        }
        Ok(first)
    }

    /// Get all expenses, newest first
    pub fn get_all(&self) -> Result<Vec<ExpenseRecord>, KakeiboError> {
        let mut expenses: Vec<_> = self.read()?.values().cloned().collect();
        sort_newest_first(&mut expenses);
        Ok(expenses)
    }

    /// Get expenses in an inclusive date range, newest first
    pub fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ExpenseRecord>, KakeiboError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|r| r.date >= start && r.date <= end)
            .collect())
    }

    /// Insert or update an expense
    pub fn upsert(&self, record: ExpenseRecord) -> Result<(), KakeiboError> {
        self.write()?.insert(record.id, record);
        Ok(())
    }

    /// Delete an expense, returning whether it existed
    pub fn delete(&self, id: ExpenseId) -> Result<bool, KakeiboError> {
        Ok(self.write()?.remove(&id).is_some())
    }

    /// Count expenses
    pub fn count(&self) -> Result<usize, KakeiboError> {
        Ok(self.read()?.len())
    }
}
