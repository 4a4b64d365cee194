pub mod http;
pub mod source;

pub use http::{Credentials, FeedbinClient, DEFAULT_BASE_URL};
pub use source::{FeedSource, FetchError};
