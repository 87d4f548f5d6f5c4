//! Core domain models for figma-toolkit
//!
//! This crate contains:
//! - Document tree model (Document, Node, Role)
//! - Tree navigation (depth-first extraction by role or name)
//! - Export parameters and export references
//! - Input selectors (`FILE_ID/PAGE_NAME`)

pub mod document;
pub mod error;
pub mod export;
pub mod input;
pub mod navigate;

pub use document::{Component, Document, Frame, Node, Role};
pub use error::{Error, Result};
pub use export::{ExportParams, ExportRef, ImageFormat, url_hash};
pub use input::FigmaInput;
pub use navigate::{TreeNode, extract, find_named, pages};
