//! Error types for ftk-pack

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PackError>;

#[derive(Error, Debug)]
pub enum PackError {
    #[error("Failed to optimize '{name}': {reason}")]
    Optimize { name: String, reason: String },

    #[error("Invalid SVG: {0}")]
    Svg(String),

    #[error("Invalid attribute pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Optimize task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PackError {
    pub(crate) fn svg(e: impl std::fmt::Display) -> Self {
        PackError::Svg(e.to_string())
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PackError::Write {
            path: path.into(),
            source,
        }
    }
}
