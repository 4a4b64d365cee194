pub mod app;
pub mod cache;
pub mod feed;
pub mod net;
pub mod ui;

pub use cache::Cache;
pub use feed::Entry;
pub use net::{FeedSource, FeedbinClient};
