//! Persistent export cache for figma-toolkit
//!
//! This crate provides:
//! - An in-memory map from export hash to fetched content
//! - Whole-file JSON persistence (load at startup, flush after each batch)

pub mod cache;
pub mod error;

pub use cache::ContentCache;
pub use error::{CacheError, Result};
