//! Component loader
//!
//! One `download` call is one batch:
//! 1. Resolve export URLs for every component id
//! 2. Fetch the URLs whose hash is not cached yet, concurrently
//! 3. Flush the cache once
//! 4. Project the cache back onto the component list
//!
//! Only a failure to reach the document API aborts the batch. An export error
//! resolves nothing and a failed fetch leaves that one component without
//! content.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use ftk_cache::ContentCache;
use ftk_core::{ExportParams, ExportRef, Node};
use ftk_remote::{ContentFetcher, DocumentClient, RemoteError};
use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

/// Default number of export URLs fetched at once.
pub const DEFAULT_CONCURRENCY: usize = 16;

pub struct ComponentLoader {
    client: Arc<dyn DocumentClient>,
    fetcher: Arc<dyn ContentFetcher>,
    cache: Arc<ContentCache>,
    file_id: String,
    params: ExportParams,
    concurrency: usize,
}

/// Outcome for one requested component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedComponent {
    pub id: String,
    pub name: String,
    /// `None` when the export could not be resolved or fetched
    pub content: Option<String>,
}

/// Counters for one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub requested: usize,
    pub resolved: usize,
    pub cached: usize,
    pub fetched: usize,
    pub failed: usize,
}

/// Result of a batch, in request order.
#[derive(Debug, Clone, Default)]
pub struct LoadResult {
    pub components: Vec<LoadedComponent>,
    pub stats: LoadStats,
}

impl LoadResult {
    /// Flat `name -> content` of the components that have content. A name
    /// that appears twice keeps the later component's content.
    pub fn icons(&self) -> BTreeMap<String, String> {
        self.components
            .iter()
            .filter_map(|c| c.content.as_ref().map(|svg| (c.name.clone(), svg.clone())))
            .collect()
    }

    pub fn into_icons(self) -> BTreeMap<String, String> {
        self.components
            .into_iter()
            .filter_map(|c| c.content.map(|svg| (c.name, svg)))
            .collect()
    }

    /// Content of the last component called `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.components
            .iter()
            .rev()
            .find(|c| c.name == name)
            .and_then(|c| c.content.as_deref())
    }

    pub fn missing(&self) -> impl Iterator<Item = &LoadedComponent> {
        self.components.iter().filter(|c| c.content.is_none())
    }
}

impl ComponentLoader {
    pub fn new(
        client: Arc<dyn DocumentClient>,
        fetcher: Arc<dyn ContentFetcher>,
        cache: Arc<ContentCache>,
        file_id: impl Into<String>,
    ) -> Self {
        Self {
            client,
            fetcher,
            cache,
            file_id: file_id.into(),
            params: ExportParams::default(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    pub fn with_params(mut self, params: ExportParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn cache(&self) -> &ContentCache {
        &self.cache
    }

    pub async fn download(&self, components: &[&Node]) -> Result<LoadResult, RemoteError> {
        let mut stats = LoadStats {
            requested: components.len(),
            ..Default::default()
        };

        let ids: Vec<String> = components.iter().map(|c| c.id().to_string()).collect();
        let exports = self.resolve(&ids).await?;
        stats.resolved = exports.len();

        // Several nodes may share one URL; fetch each hash once.
        let mut scheduled = HashSet::new();
        let mut pending = Vec::new();
        for export in exports.values() {
            if self.cache.contains(&export.hash) {
                stats.cached += 1;
            } else if scheduled.insert(export.hash.as_str()) {
                pending.push(export);
            }
        }

        let outcomes: Vec<bool> = stream::iter(pending)
            .map(|export| self.fetch_one(export))
            .buffer_unordered(self.concurrency)
            .collect()
            .await;
        stats.fetched = outcomes.iter().filter(|ok| **ok).count();
        stats.failed = outcomes.len() - stats.fetched;

        if let Err(e) = self.cache.flush().await {
            warn!("Failed to persist export cache: {}", e);
        }

        let components = components
            .iter()
            .map(|node| LoadedComponent {
                id: node.id().to_string(),
                name: node.name().to_string(),
                content: exports
                    .get(node.id())
                    .and_then(|export| self.cache.get(&export.hash)),
            })
            .collect();

        info!(
            "Downloaded {} components ({} resolved, {} cached, {} fetched, {} failed)",
            stats.requested, stats.resolved, stats.cached, stats.fetched, stats.failed
        );
        Ok(LoadResult { components, stats })
    }

    async fn resolve(&self, ids: &[String]) -> Result<HashMap<String, ExportRef>, RemoteError> {
        let urls = match self
            .client
            .resolve_export_urls(&self.file_id, ids, &self.params)
            .await
        {
            Ok(urls) => urls,
            Err(RemoteError::Export(reason)) => {
                warn!("Export failed for {}, nothing resolved: {}", self.file_id, reason);
                HashMap::new()
            }
            Err(e) => return Err(e),
        };

        Ok(urls
            .into_iter()
            .map(|(id, url)| (id.clone(), ExportRef::new(id, url)))
            .collect())
    }

    async fn fetch_one(&self, export: &ExportRef) -> bool {
        match self.fetcher.fetch(&export.url).await {
            Ok(body) => {
                debug!("Fetched export for node {}", export.id);
                self.cache.put(export.hash.clone(), body);
                true
            }
            Err(e) => {
                warn!("Skipping node {}: {}", export.id, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(name: &str, content: Option<&str>) -> LoadedComponent {
        LoadedComponent {
            id: name.to_string(),
            name: name.to_string(),
            content: content.map(String::from),
        }
    }

    #[test]
    fn test_projections_share_one_result() {
        let result = LoadResult {
            components: vec![loaded("star", Some("<svg/>a")), loaded("heart", None)],
            stats: LoadStats::default(),
        };

        let icons = result.icons();
        assert_eq!(icons.len(), 1);
        assert_eq!(icons["star"], "<svg/>a");

        assert_eq!(result.components.len(), 2);
        let missing: Vec<_> = result.missing().map(|c| c.name.as_str()).collect();
        assert_eq!(missing, vec!["heart"]);
        assert_eq!(result.get("star"), Some("<svg/>a"));
        assert_eq!(result.get("heart"), None);

        assert_eq!(result.into_icons(), icons);
    }

    #[test]
    fn test_duplicate_names_keep_last() {
        let mut first = loaded("dup", Some("one"));
        first.id = "1".to_string();
        let mut second = loaded("dup", Some("two"));
        second.id = "2".to_string();

        let result = LoadResult {
            components: vec![first, second],
            stats: LoadStats::default(),
        };
        assert_eq!(result.icons()["dup"], "two");
        assert_eq!(result.get("dup"), Some("two"));
    }
}
