//! Icon packs for figma-toolkit
//!
//! This crate provides:
//! - `IconPack`, the optimized name → SVG mapping
//! - A streaming SVG optimizer
//! - Emitters: individual SVG files, JSON, React and Angular templates

pub mod emit;
pub mod error;
pub mod pack;
pub mod svg;

pub use emit::angular::{ComponentJson, ComponentMapping, angular_template};
pub use emit::files::SaveOptions;
pub use emit::react::{render_css, render_tsx, write_react};
pub use error::{PackError, Result};
pub use pack::IconPack;
pub use svg::{OptimizeOptions, SvgOptimizer};
