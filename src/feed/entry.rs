use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A single feed item as returned by the Feedbin entries endpoint.
///
/// Field names match the Feedbin JSON so the same shape is used on the wire
/// and in the durable cache file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub feed_id: i64,
    #[serde(default, deserialize_with = "nullable_string")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub author: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub summary: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub content: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub url: String,
    #[serde(rename = "published")]
    pub published_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Entry {
    /// Title to show in listings, falling back to the URL for untitled items.
    pub fn display_title(&self) -> &str {
        if !self.title.trim().is_empty() {
            self.title.trim()
        } else if !self.url.is_empty() {
            &self.url
        } else {
            "(untitled)"
        }
    }
}

// Feedbin sends `null` for missing titles and authors.
fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
