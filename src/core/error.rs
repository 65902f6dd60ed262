//! Error types

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    /// Year input that is not an integer
    #[error("Please enter a valid year (e.g. {example}), got {input:?}.")]
    InvalidYear { input: String, example: i32 },

    /// Transport-level failure talking to the API
    #[error("Failed to fetch data: {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-2xx status
    #[error("Failed to fetch data: {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Body is not an organizations document
    #[error("Failed to decode organizations from {origin}: {source}")]
    Decode {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read {}: {source}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ExportError {
    /// Whether this is a network/HTTP failure
    pub fn is_fetch(&self) -> bool {
        matches!(self, ExportError::Request { .. } | ExportError::Status { .. })
    }
}
