//! Error types for ftk-remote

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RemoteError>;

/// Failures talking to the document API.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("Access denied (HTTP {status}); check the personal access token")]
    Unauthorized { status: u16 },

    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("HTTP error {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The service could not render the requested nodes. Recoverable: callers
    /// treat it as "nothing resolved".
    #[error("Export failed: {0}")]
    Export(String),
}

impl RemoteError {
    pub fn is_export(&self) -> bool {
        matches!(self, RemoteError::Export(_))
    }
}

/// Failure fetching one export URL.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request for {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error {status}: {url}")]
    Status { url: String, status: u16 },
}
