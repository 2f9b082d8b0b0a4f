// src/error.rs
//! Error types for the lookup pipeline.
//!
//! Nothing here crosses the resolver boundary: provider and cache failures are
//! logged and downgraded to "no data" / cache miss. These surface only from
//! construction, export and the CLI.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Connection failure, timeout, body decode
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response
    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// Page or payload did not have the expected shape
    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Record failed validation (e.g. empty name)
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error("configuration error: {0}")]
    Config(String),
}
