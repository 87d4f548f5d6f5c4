//! Export parameters and resolved export references

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Svg,
    Png,
    Jpg,
    Pdf,
}

impl ImageFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Svg => "svg",
            ImageFormat::Png => "png",
            ImageFormat::Jpg => "jpg",
            ImageFormat::Pdf => "pdf",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "svg" => Ok(ImageFormat::Svg),
            "png" => Ok(ImageFormat::Png),
            "jpg" | "jpeg" => Ok(ImageFormat::Jpg),
            "pdf" => Ok(ImageFormat::Pdf),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}

/// Options passed to the remote export endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportParams {
    #[serde(default)]
    pub format: ImageFormat,

    /// Embed source node ids in the rendered output
    #[serde(default = "default_true")]
    pub include_id: bool,

    /// Collapse stroke primitives into fills
    #[serde(default = "default_true")]
    pub simplify_stroke: bool,
}

impl Default for ExportParams {
    fn default() -> Self {
        Self {
            format: ImageFormat::Svg,
            include_id: true,
            simplify_stroke: true,
        }
    }
}

impl ExportParams {
    /// Query pairs understood by the images endpoint.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("format", self.format.to_string())];
        if self.format == ImageFormat::Svg {
            pairs.push(("svg_include_id", self.include_id.to_string()));
            pairs.push(("svg_simplify_stroke", self.simplify_stroke.to_string()));
        }
        pairs
    }
}

fn default_true() -> bool {
    true
}

/// One node's resolved export: a transient URL and the stable key derived
/// from it. Only `hash` may outlive the resolution call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRef {
    pub id: String,
    pub url: String,
    pub hash: String,
}

impl ExportRef {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            id: id.into(),
            hash: url_hash(&url),
            url,
        }
    }
}

/// Cache key for an export URL. Keys the reference, not the fetched content.
pub fn url_hash(url: &str) -> String {
    blake3::hash(url.as_bytes()).to_hex().to_string()
}
