//! Output formats built from an icon pack

pub mod angular;
pub mod files;
pub mod react;

use std::path::Path;

use crate::{PackError, Result};

/// Write `contents` to `path`, creating parent directories.
pub(crate) async fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| PackError::write(parent, e))?;
    }
    tokio::fs::write(path, contents)
        .await
        .map_err(|e| PackError::write(path, e))
}
