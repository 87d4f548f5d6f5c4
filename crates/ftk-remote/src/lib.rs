//! Remote document access for figma-toolkit
//!
//! This crate provides:
//! - The `DocumentClient` contract (document tree + export URL resolution)
//! - The `ContentFetcher` contract (plain GET of resolved export URLs)
//! - Figma REST implementations of both, built on reqwest

pub mod client;
pub mod error;
pub mod fetch;
pub mod figma;

pub use client::DocumentClient;
pub use error::{FetchError, RemoteError, Result};
pub use fetch::{ContentFetcher, HttpFetcher};
pub use figma::FigmaClient;

/// Default Figma REST endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.figma.com";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub(crate) fn user_agent() -> String {
    format!("figma-toolkit/{}", env!("CARGO_PKG_VERSION"))
}
