//! JSON file helpers
//!
//! Reads tolerate a missing file (first run); writes go through a sibling
//! temp file and a rename so a crash never leaves a half-written ledger.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::KakeiboError;

fn storage_err(action: &str, path: &Path, err: impl std::fmt::Display) -> KakeiboError {
    KakeiboError::Storage(format!("Failed to {} {}: {}", action, path.display(), err))
}

/// Read JSON from a file, returning the default value if the file doesn't exist
pub fn read_json<T, P>(path: P) -> Result<T, KakeiboError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        log::debug!("{} does not exist yet, starting empty", path.display());
        return Ok(T::default());
    }

    let file = File::open(path).map_err(|e| storage_err("open", path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| storage_err("parse", path, e))
}

/// Write JSON to a file atomically (write to temp, then rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), KakeiboError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| storage_err("create directory", parent, e))?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path).map_err(|e| storage_err("create", &temp_path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| storage_err("serialize", &temp_path, e))?;
    writer
        .flush()
        .map_err(|e| storage_err("flush", &temp_path, e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| storage_err("sync", &temp_path, e))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        storage_err("replace", path, e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct Snapshot {
        payer: String,
        total: f64,
    }

    fn sample() -> Snapshot {
        Snapshot {
            payer: "A".into(),
            total: 300.0,
        }
    }

    #[test]
    fn test_missing_file_reads_default() {
        let temp_dir = TempDir::new().unwrap();
        let data: Snapshot = read_json(temp_dir.path().join("missing.json")).unwrap();
        assert_eq!(data, Snapshot::default());
    }

    #[test]
    fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("snapshot.json");

        write_json_atomic(&path, &sample()).unwrap();

        let loaded: Snapshot = read_json(&path).unwrap();
        assert_eq!(loaded, sample());
        assert!(!temp_dir.path().join("data").join("snapshot.json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let err = read_json::<Snapshot, _>(&path).unwrap_err();
        assert!(matches!(err, KakeiboError::Storage(_)));
    }
}
