use super::AppError;
use crate::cache::{Cache, CacheError};
use crate::net::Credentials;
use std::path::PathBuf;
use std::time::Duration;

/// Where the cache lives and how long fetched entries stay fresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSettings {
    /// `None` keeps the cache in memory only.
    pub dir: Option<PathBuf>,
    pub ttl: Duration,
}

impl CacheSettings {
    pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

    /// Resolve the cache directory, falling back to the per-user cache dir.
    pub fn resolve(dir: Option<PathBuf>, persist: bool, ttl: Duration) -> Result<Self, AppError> {
        if !persist {
            return Ok(Self { dir: None, ttl });
        }

        let dir = dir.or_else(default_cache_dir).ok_or_else(|| {
            AppError::Config("could not determine a cache directory, set --cache-dir".to_string())
        })?;
        Ok(Self { dir: Some(dir), ttl })
    }

    pub fn open(&self) -> Result<Cache, CacheError> {
        Cache::new(self.dir.as_deref(), self.ttl)
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            dir: default_cache_dir(),
            ttl: Self::DEFAULT_TTL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySettings {
    pub display_limit: usize,
    pub randomize: bool,
    pub interactive: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            display_limit: 5,
            randomize: false,
            interactive: false,
        }
    }
}

pub fn default_cache_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|base| base.join("greed"))
}

pub fn credentials(username: Option<String>, password: Option<String>) -> Result<Credentials, AppError> {
    match (username, password) {
        (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
            Ok(Credentials::new(username, password))
        }
        _ => Err(AppError::Config(
            "username and password are required".to_string(),
        )),
    }
}

/// Reject zero for limits that must select at least one entry.
pub fn positive_limit(name: &str, value: usize) -> Result<usize, AppError> {
    if value == 0 {
        return Err(AppError::Config(format!("{name} must be greater than 0")));
    }
    Ok(value)
}
