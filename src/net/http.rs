use super::source::{FeedSource, FetchError};
use crate::feed::Entry;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use std::fmt;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.feedbin.com/v2";

/// Username and password for HTTP basic auth.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Blocking client for the Feedbin v2 API.
pub struct FeedbinClient {
    client: Client,
    credentials: Credentials,
    base_url: String,
}

impl FeedbinClient {
    const USER_AGENT: &'static str = concat!("greed/", env!("CARGO_PKG_VERSION"));
    const TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(credentials: Credentials) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(Self::USER_AGENT)
            .timeout(Self::TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            credentials,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn entries_url(&self, limit: usize) -> Result<Url, FetchError> {
        let mut url = Url::parse(&format!(
            "{}/entries.json",
            self.base_url.trim_end_matches('/')
        ))?;
        url.query_pairs_mut()
            .append_pair("per_page", &limit.to_string())
            .append_pair("order", "desc");
        Ok(url)
    }
}

impl FeedSource for FeedbinClient {
    fn fetch_latest(&self, limit: usize) -> Result<Vec<Entry>, FetchError> {
        let url = self.entries_url(limit)?;
        let response = self
            .client
            .get(url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .header(ACCEPT, "application/json")
            .send()?;

        match response.status() {
            StatusCode::OK => {}
            status @ (StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) => {
                return Err(FetchError::Auth {
                    status: status.as_u16(),
                })
            }
            status => return Err(FetchError::UnexpectedStatus(status.as_u16())),
        }

        let body = response.bytes()?;
        serde_json::from_slice(&body).map_err(FetchError::Decode)
    }
}
