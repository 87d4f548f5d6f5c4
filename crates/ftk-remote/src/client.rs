//! Document client trait

use std::collections::HashMap;

use async_trait::async_trait;
use ftk_core::{Document, ExportParams};

use crate::Result;

/// Contract for the remote document API.
#[async_trait]
pub trait DocumentClient: Send + Sync {
    /// Load the full document tree. No retries.
    async fn fetch_document(&self, file_id: &str) -> Result<Document>;

    /// Resolve node ids to transient export URLs.
    ///
    /// Nodes the service could not render are left out of the map. A
    /// service-reported export failure is `RemoteError::Export`.
    async fn resolve_export_urls(
        &self,
        file_id: &str,
        ids: &[String],
        params: &ExportParams,
    ) -> Result<HashMap<String, String>>;
}
