//! Time-bounded cache for the most recently fetched entry set.

mod clock;
mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use store::{Backend, CacheState, FileStore, SnapshotMiss, CACHE_FILE_NAME};

use crate::feed::Entry;
use chrono::{DateTime, Utc};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("cache directory is not set")]
    MissingDirectory,
    #[error("cache expiration {0:?} is out of range")]
    InvalidTtl(Duration),
    #[error("failed to create cache directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write cache file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode cache data: {0}")]
    Encode(#[source] serde_json::Error),
}

impl CacheError {
    /// Whether the error comes from bad configuration rather than the filesystem.
    pub fn is_config(&self) -> bool {
        matches!(self, CacheError::MissingDirectory | CacheError::InvalidTtl(_))
    }
}

/// Freshness of the in-memory slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Empty,
    Fresh { expires_at: DateTime<Utc> },
    Stale { expired_at: DateTime<Utc> },
}

/// Read-through storage for the latest entries.
///
/// A write replaces the whole entry set and restarts the expiry window.
/// Nothing is evicted: staleness is decided when reading.
pub struct Cache {
    backend: Backend,
    ttl: chrono::Duration,
    clock: Arc<dyn Clock>,
    state: RwLock<Option<CacheState>>,
}

impl Cache {
    /// Build a cache, mirrored to `dir` when one is given.
    pub fn new(dir: Option<&Path>, ttl: Duration) -> Result<Self, CacheError> {
        Self::with_clock(dir, ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(
        dir: Option<&Path>,
        ttl: Duration,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, CacheError> {
        let ttl = chrono::Duration::from_std(ttl).map_err(|_| CacheError::InvalidTtl(ttl))?;
        let backend = match dir {
            Some(dir) => Backend::File(FileStore::open(dir)?),
            None => Backend::Memory,
        };

        Ok(Self {
            backend,
            ttl,
            clock,
            state: RwLock::new(None),
        })
    }

    /// Location of the durable mirror, if any.
    pub fn file_path(&self) -> Option<&Path> {
        match &self.backend {
            Backend::Memory => None,
            Backend::File(store) => Some(store.path()),
        }
    }

    /// Replace the cached entries and start a new expiry window.
    ///
    /// In durable mode the file is rewritten while the write lock is held. If
    /// that write fails the in-memory state keeps the new entries and the
    /// error is returned.
    pub fn set(&self, entries: Vec<Entry>) -> Result<(), CacheError> {
        let mut state = self.write_state();
        let fresh = CacheState {
            entries,
            expires_at: self
                .clock
                .now()
                .checked_add_signed(self.ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        };

        let saved = match &self.backend {
            Backend::Memory => Ok(()),
            Backend::File(store) => store.save(&fresh),
        };
        *state = Some(fresh);
        saved
    }

    /// The cached entries, if they have not expired.
    pub fn get(&self) -> Option<Vec<Entry>> {
        match &self.backend {
            Backend::Memory => {
                let state = self.read_state();
                let now = self.clock.now();
                state
                    .as_ref()
                    .filter(|state| state.is_fresh_at(now))
                    .map(|state| state.entries.clone())
            }
            Backend::File(store) => self.get_from_file(store),
        }
    }

    fn get_from_file(&self, store: &FileStore) -> Option<Vec<Entry>> {
        let loaded = {
            let _state = self.read_state();
            store.load()
        };

        let snapshot = match loaded {
            Ok(snapshot) => snapshot,
            // A missing or damaged file is a cold cache, not a fault.
            Err(_miss) => return None,
        };
        if !snapshot.is_fresh_at(self.clock.now()) {
            return None;
        }

        let entries = snapshot.entries.clone();
        let mut state = self.write_state();
        // A concurrent set may have landed since the file was read.
        let newer_in_memory = state
            .as_ref()
            .is_some_and(|current| current.expires_at > snapshot.expires_at);
        if !newer_in_memory {
            *state = Some(snapshot);
        }
        Some(entries)
    }

    pub fn status(&self) -> CacheStatus {
        let state = self.read_state();
        match state.as_ref() {
            None => CacheStatus::Empty,
            Some(state) if state.is_fresh_at(self.clock.now()) => CacheStatus::Fresh {
                expires_at: state.expires_at,
            },
            Some(state) => CacheStatus::Stale {
                expired_at: state.expires_at,
            },
        }
    }

    // The slot is always replaced wholesale, so a poisoned lock still holds
    // a consistent value.
    fn read_state(&self) -> RwLockReadGuard<'_, Option<CacheState>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, Option<CacheState>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("backend", &self.backend)
            .field("ttl", &self.ttl)
            .field("status", &self.status())
            .finish()
    }
}
