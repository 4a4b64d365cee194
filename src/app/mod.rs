pub mod reader;
pub mod settings;

pub use reader::Reader;
pub use settings::{CacheSettings, DisplaySettings};

use crate::cache::CacheError;
use crate::net::FetchError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Config(String),
    #[error("cache: {0}")]
    Cache(#[from] CacheError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("failed to render entries: {0}")]
    Render(#[from] io::Error),
}
