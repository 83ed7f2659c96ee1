use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PerfdefsError {
    #[error("Counter table error: {0}")]
    RawError(#[from] perfdefs_raw::RawError),

    #[error("Unknown counter: {0}")]
    UnknownCounter(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    ParseError(String),
}

pub type Result<T> = std::result::Result<T, PerfdefsError>;
