//! One `.svg` file per icon

use std::path::{Path, PathBuf};

use quick_xml::escape::escape;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::emit::write_file;
use crate::{IconPack, Result};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Attributes of the `<svg>` wrapper written around each icon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveOptions {
    pub width: String,
    pub height: String,
    pub view_box: String,
    pub fill: String,
    pub class_name: Option<String>,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            width: "24".to_string(),
            height: "24".to_string(),
            view_box: "0 0 24 24".to_string(),
            fill: "currentColor".to_string(),
            class_name: None,
        }
    }
}

impl SaveOptions {
    /// Wrap optimized inner markup in a standalone document.
    pub fn wrap(&self, inner: &str) -> String {
        let class = self
            .class_name
            .as_deref()
            .map(|c| format!(r#" class="{}""#, escape(c)))
            .unwrap_or_default();
        format!(
            r#"<svg xmlns="{}" width="{}" height="{}" viewBox="{}" fill="{}"{}>{}</svg>"#,
            SVG_NS,
            escape(self.width.as_str()),
            escape(self.height.as_str()),
            escape(self.view_box.as_str()),
            escape(self.fill.as_str()),
            class,
            inner
        )
    }
}

/// File name for an icon; path separators become `-`.
pub fn file_name(name: &str) -> String {
    let safe: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c => c,
        })
        .collect();
    format!("{}.svg", safe)
}

impl IconPack {
    /// Write every icon to `dir/<name>.svg`. Returns the written paths.
    pub async fn save_icons(&self, dir: &Path, options: &SaveOptions) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(self.len());
        for (name, inner) in self.iter() {
            let path = dir.join(file_name(name));
            write_file(&path, options.wrap(inner)).await?;
            debug!("Wrote {}", path.display());
            written.push(path);
        }
        Ok(written)
    }
}
