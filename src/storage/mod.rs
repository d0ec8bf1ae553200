//! Storage layer for Kakeibo
//!
//! Provides the JSON-file record store with atomic writes and automatic
//! directory creation.

pub mod expenses;
pub mod file_io;

pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};

use crate::config::paths::KakeiboPaths;
use crate::error::KakeiboError;

/// Main storage coordinator
pub struct Storage {
    paths: KakeiboPaths,
    pub expenses: ExpenseRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: KakeiboPaths) -> Result<Self, KakeiboError> {
        paths.ensure_directories()?;

        Ok(Self {
            expenses: ExpenseRepository::new(paths.expenses_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &KakeiboPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), KakeiboError> {
        self.expenses.load()
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), KakeiboError> {
        self.expenses.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = KakeiboPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        storage.load_all().unwrap();
        assert_eq!(storage.expenses.count().unwrap(), 0);
    }
}
