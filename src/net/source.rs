use crate::feed::Entry;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("authentication failed (HTTP {status})")]
    Auth { status: u16 },
    #[error("unexpected status code: {0}")]
    UnexpectedStatus(u16),
    #[error("failed to fetch entries: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Somewhere the latest entries can be fetched from.
pub trait FeedSource {
    /// Fetch up to `limit` entries, newest first.
    fn fetch_latest(&self, limit: usize) -> Result<Vec<Entry>, FetchError>;
}

impl<S: FeedSource + ?Sized> FeedSource for &S {
    fn fetch_latest(&self, limit: usize) -> Result<Vec<Entry>, FetchError> {
        (**self).fetch_latest(limit)
    }
}
