//! Read-through access to the latest entries.

use super::AppError;
use crate::cache::Cache;
use crate::feed::Entry;
use crate::net::{FeedSource, FetchError};
use crate::ui::Spinner;

/// Serves entries from the cache and falls back to the feed source on a miss.
pub struct Reader<S> {
    source: S,
    cache: Cache,
    fetch_limit: usize,
    show_progress: bool,
}

impl<S: FeedSource> Reader<S> {
    pub fn new(source: S, cache: Cache, fetch_limit: usize) -> Self {
        Self {
            source,
            cache,
            fetch_limit,
            show_progress: false,
        }
    }

    /// Show a spinner on stderr while talking to the API.
    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Cached entries if fresh, otherwise a fresh fetch that is written back.
    ///
    /// The fetched entries are returned even when the cache write fails.
    pub fn latest(&self, ignore_cache: bool) -> Result<Vec<Entry>, AppError> {
        if ignore_cache {
            log::debug!("ignoring cache");
        } else if let Some(entries) = self.cache.get() {
            log::debug!("cache hit: {} entries", entries.len());
            return Ok(entries);
        } else {
            log::debug!("cache miss");
        }

        let entries = self.fetch()?;
        if let Err(err) = self.cache.set(entries.clone()) {
            log::warn!("failed to update cache: {err}");
        }
        Ok(entries)
    }

    /// Fetch unconditionally and store the result, surfacing cache failures.
    pub fn refresh(&self) -> Result<Vec<Entry>, AppError> {
        let entries = self.fetch()?;
        self.cache.set(entries.clone())?;
        if let Some(path) = self.cache.file_path() {
            log::info!("cached {} entries in {}", entries.len(), path.display());
        }
        Ok(entries)
    }

    fn fetch(&self) -> Result<Vec<Entry>, FetchError> {
        let _spinner = self
            .show_progress
            .then(|| Spinner::start("Fetching latest entries"));
        let entries = self.source.fetch_latest(self.fetch_limit)?;
        log::debug!("fetched {} entries", entries.len());
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheError, CacheStatus, ManualClock};
    use chrono::{TimeZone, Utc};
    use std::cell::Cell;
    use std::fs;
    use std::sync::Arc;
    use std::time::Duration;

    const TTL: Duration = Duration::from_secs(5 * 60);

    fn entry(id: i64) -> Entry {
        let at = Utc.with_ymd_and_hms(2024, 4, 1, 9, 0, 0).unwrap();
        Entry {
            id,
            feed_id: 1,
            title: format!("Entry {id}"),
            author: String::new(),
            summary: String::new(),
            content: String::new(),
            url: format!("https://example.com/{id}"),
            published_at: at,
            created_at: at,
        }
    }

    struct FakeSource {
        entries: Vec<Entry>,
        status: Option<u16>,
        calls: Cell<usize>,
        last_limit: Cell<usize>,
    }

    impl FakeSource {
        fn ok(entries: Vec<Entry>) -> Self {
            Self {
                entries,
                status: None,
                calls: Cell::new(0),
                last_limit: Cell::new(0),
            }
        }

        fn rejecting(status: u16) -> Self {
            Self {
                status: Some(status),
                ..Self::ok(Vec::new())
            }
        }
    }

    impl FeedSource for FakeSource {
        fn fetch_latest(&self, limit: usize) -> Result<Vec<Entry>, FetchError> {
            self.calls.set(self.calls.get() + 1);
            self.last_limit.set(limit);
            match self.status {
                Some(status) => Err(FetchError::Auth { status }),
                None => Ok(self.entries.clone()),
            }
        }
    }

    fn memory_cache(clock: Arc<ManualClock>) -> Cache {
        Cache::with_clock(None, TTL, clock).unwrap()
    }

    #[test]
    fn test_miss_fetches_and_stores() {
        let source = FakeSource::ok(vec![entry(1), entry(2)]);
        let reader = Reader::new(&source, memory_cache(Arc::default()), 20);

        assert_eq!(reader.latest(false).unwrap(), vec![entry(1), entry(2)]);
        assert_eq!(source.calls.get(), 1);
        assert_eq!(source.last_limit.get(), 20);
        assert_eq!(reader.cache().get(), Some(vec![entry(1), entry(2)]));
    }

    #[test]
    fn test_hit_skips_source() {
        let source = FakeSource::ok(vec![entry(3)]);
        let cache = memory_cache(Arc::default());
        cache.set(vec![entry(1)]).unwrap();
        let reader = Reader::new(&source, cache, 20);

        assert_eq!(reader.latest(false).unwrap(), vec![entry(1)]);
        assert_eq!(source.calls.get(), 0);
    }

    #[test]
    fn test_ignore_cache_bypasses_fresh_entries() {
        let source = FakeSource::ok(vec![entry(3)]);
        let cache = memory_cache(Arc::default());
        cache.set(vec![entry(1)]).unwrap();
        let reader = Reader::new(&source, cache, 20);

        assert_eq!(reader.latest(true).unwrap(), vec![entry(3)]);
        assert_eq!(source.calls.get(), 1);
        assert_eq!(reader.cache().get(), Some(vec![entry(3)]));
    }

    #[test]
    fn test_stale_cache_refetches() {
        let clock = Arc::new(ManualClock::default());
        let source = FakeSource::ok(vec![entry(2)]);
        let cache = memory_cache(clock.clone());
        cache.set(vec![entry(1)]).unwrap();
        clock.advance(chrono::Duration::minutes(6));
        let reader = Reader::new(&source, cache, 20);

        assert_eq!(reader.latest(false).unwrap(), vec![entry(2)]);
        assert_eq!(source.calls.get(), 1);
    }

    #[test]
    fn test_auth_failure_leaves_cache_untouched() {
        let clock = Arc::new(ManualClock::default());
        let source = FakeSource::rejecting(401);
        let cache = memory_cache(clock.clone());
        cache.set(vec![entry(1)]).unwrap();
        clock.advance(chrono::Duration::minutes(6));
        let reader = Reader::new(&source, cache, 20);

        let err = reader.latest(false).unwrap_err();
        assert!(matches!(err, AppError::Fetch(FetchError::Auth { status: 401 })));
        assert!(matches!(reader.cache().status(), CacheStatus::Stale { .. }));

        let empty = Reader::new(&source, memory_cache(Arc::default()), 20);
        assert!(empty.refresh().is_err());
        assert_eq!(empty.cache().status(), CacheStatus::Empty);
    }

    #[test]
    fn test_write_failure_handling() {
        let dir = tempfile::tempdir().unwrap();
        let cache = Cache::new(Some(dir.path()), TTL).unwrap();
        fs::create_dir(cache.file_path().unwrap()).unwrap();
        let source = FakeSource::ok(vec![entry(1)]);
        let reader = Reader::new(&source, cache, 20);

        // Listing still shows what was fetched.
        assert_eq!(reader.latest(false).unwrap(), vec![entry(1)]);

        // An explicit refresh reports the failed write.
        let err = reader.refresh().unwrap_err();
        assert!(matches!(err, AppError::Cache(CacheError::Write { .. })));
    }
}
