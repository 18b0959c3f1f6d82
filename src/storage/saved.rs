// src/storage/saved.rs
use crate::utils::error::StorageError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A date the user chose to keep, with the event it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedDate {
    pub event_name: String,
    pub date: String,
    pub saved_at: String,
}

/// Flat JSON file of confirmed dates.
pub struct SavedDateStore {
    path: PathBuf,
}

impl SavedDateStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Everything saved so far; a missing file is an empty store.
    pub fn load(&self) -> Result<Vec<SavedDate>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        serde_json::from_str(&raw).map_err(|e| StorageError::SerializationError(e.to_string()))
    }

    /// Appends several dates under one event. Returns how many were written.
    pub fn append_all(&self, event_name: &str, dates: &[String]) -> Result<usize, StorageError> {
        if dates.is_empty() {
            return Ok(0);
        }
        let mut saved = self.load()?;
        let saved_at = chrono::Local::now().to_rfc3339();
        saved.extend(dates.iter().map(|date| SavedDate {
            event_name: event_name.to_string(),
            date: date.clone(),
            saved_at: saved_at.clone(),
        }));

        let json = serde_json::to_string_pretty(&saved)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, json)?;

        tracing::debug!("Saved {} dates for '{}' to {}", dates.len(), event_name, self.path.display());
        Ok(dates.len())
    }

    /// Removes the store file. Clearing an absent store is not an error.
    pub fn clear(&self) -> Result<(), StorageError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = SavedDateStore::new(dir.path().join("saved_dates.json"));
        assert!(store.load().unwrap().is_empty());

        store
            .append_all("Summer Fest", &["2026-03-05".to_string()])
            .unwrap();
        let written = store
            .append_all("Gala", &["2026-06-01".to_string(), "2026-06-02".to_string()])
            .unwrap();
        assert_eq!(written, 2);

        let saved = store.load().unwrap();
        assert_eq!(saved.len(), 3);
        assert_eq!(saved[0].event_name, "Summer Fest");
        assert_eq!(saved[2].date, "2026-06-02");
        assert!(!saved[0].saved_at.is_empty());

        store.clear().unwrap();
        assert!(!store.path().exists());
        store.clear().unwrap();
    }

    #[test]
    fn test_corrupt_store_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved_dates.json");
        fs::write(&path, "not json").unwrap();
        let store = SavedDateStore::new(&path);
        assert!(matches!(store.load(), Err(StorageError::SerializationError(_))));
    }
}
