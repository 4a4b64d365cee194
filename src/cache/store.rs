//! Backing stores for the entry cache.
//!
//! The memory store keeps nothing beyond the cache's own slot. The file store
//! mirrors every write to a single JSON document and is re-read on every
//! lookup, so several processes sharing a cache directory see each other's
//! fetches.

use super::CacheError;
use crate::feed::Entry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CACHE_FILE_NAME: &str = "feedbin_cache.json";

/// The last fetched entry set and the instant it goes stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheState {
    pub entries: Vec<Entry>,
    #[serde(rename = "exp")]
    pub expires_at: DateTime<Utc>,
}

impl CacheState {
    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Storage strategy, chosen when the cache is built.
#[derive(Debug)]
pub enum Backend {
    Memory,
    File(FileStore),
}

/// Why a snapshot could not be loaded. Every variant is treated as a cold
/// cache by the caller.
#[derive(Error, Debug)]
pub enum SnapshotMiss {
    #[error("no cache file at {0}")]
    Missing(PathBuf),
    #[error("unreadable cache file: {0}")]
    Unreadable(#[source] io::Error),
    #[error("corrupt cache file: {0}")]
    Corrupt(#[source] serde_json::Error),
}

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Prepare `dir` for use, creating it and any parents.
    pub fn open(dir: &Path) -> Result<Self, CacheError> {
        if dir.as_os_str().is_empty() {
            return Err(CacheError::MissingDirectory);
        }

        fs::create_dir_all(dir).map_err(|source| CacheError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;

        Ok(Self {
            path: dir.join(CACHE_FILE_NAME),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<CacheState, SnapshotMiss> {
        let data = fs::read(&self.path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => SnapshotMiss::Missing(self.path.clone()),
            _ => SnapshotMiss::Unreadable(err),
        })?;
        serde_json::from_slice(&data).map_err(SnapshotMiss::Corrupt)
    }

    /// Overwrite the snapshot file with `state`.
    pub fn save(&self, state: &CacheState) -> Result<(), CacheError> {
        let data = serde_json::to_vec(state).map_err(CacheError::Encode)?;
        fs::write(&self.path, data).map_err(|source| CacheError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_state() -> CacheState {
        let published = Utc.with_ymd_and_hms(2024, 3, 9, 8, 15, 0).unwrap();
        CacheState {
            entries: vec![Entry {
                id: 7,
                feed_id: 3,
                title: "Hello".to_string(),
                author: "Ann".to_string(),
                summary: "Short".to_string(),
                content: "<p>Long</p>".to_string(),
                url: "https://example.com/7".to_string(),
                published_at: published,
                created_at: published,
            }],
            expires_at: Utc.with_ymd_and_hms(2024, 3, 9, 8, 20, 0).unwrap(),
        }
    }

    #[test]
    fn test_open_rejects_empty_path() {
        let err = FileStore::open(Path::new("")).unwrap_err();
        assert!(matches!(err, CacheError::MissingDirectory));
    }

    #[test]
    fn test_open_creates_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");

        let store = FileStore::open(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(store.path(), nested.join(CACHE_FILE_NAME));
    }

    #[test]
    fn test_open_fails_when_directory_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"not a directory").unwrap();

        let err = FileStore::open(&blocker.join("cache")).unwrap_err();
        assert!(matches!(err, CacheError::CreateDir { .. }));
    }

    #[test]
    fn test_file_layout() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        store.save(&sample_state()).unwrap();

        let raw: serde_json::Value =
            serde_json::from_slice(&fs::read(store.path()).unwrap()).unwrap();
        assert_eq!(raw["exp"], "2024-03-09T08:20:00Z");
        let entry = &raw["entries"][0];
        assert_eq!(entry["id"], 7);
        assert_eq!(entry["feed_id"], 3);
        assert_eq!(entry["published"], "2024-03-09T08:15:00Z");
        assert_eq!(entry["created_at"], "2024-03-09T08:15:00Z");
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        let state = sample_state();

        store.save(&state).unwrap();
        assert_eq!(store.load().unwrap(), state);
    }

    #[test]
    fn test_load_missing_and_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert!(matches!(store.load(), Err(SnapshotMiss::Missing(_))));

        fs::write(store.path(), b"{\"entries\": [").unwrap();
        assert!(matches!(store.load(), Err(SnapshotMiss::Corrupt(_))));
    }

    #[test]
    fn test_save_overwrites_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        store.save(&sample_state()).unwrap();

        let empty = CacheState {
            entries: Vec::new(),
            expires_at: sample_state().expires_at,
        };
        store.save(&empty).unwrap();
        assert_eq!(store.load().unwrap(), empty);
    }
}
