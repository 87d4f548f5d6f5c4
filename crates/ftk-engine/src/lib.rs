//! Extraction and download pipeline for figma-toolkit
//!
//! `Session` owns a loaded document and answers page/component lookups.
//! `ComponentLoader` turns component nodes into SVG content, going through the
//! export cache so each export URL is fetched at most once.

pub mod error;
pub mod loader;
pub mod session;

pub use error::{EngineError, Result};
pub use loader::{ComponentLoader, DEFAULT_CONCURRENCY, LoadResult, LoadStats, LoadedComponent};
pub use session::Session;
