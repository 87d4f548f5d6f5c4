//! Export content cache
//!
//! Keys are hashes of export URLs (see `ftk_core::url_hash`), values are the
//! fetched SVG bodies. The whole map lives in memory and is written back as a
//! single JSON object. There is no locking across processes: two runs sharing
//! a path race and the last flush wins.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use dashmap::DashMap;
use tracing::{debug, warn};

use crate::{CacheError, Result};

pub struct ContentCache {
    path: PathBuf,
    entries: DashMap<String, String>,
}

impl ContentCache {
    /// Empty cache that will flush to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: DashMap::new(),
        }
    }

    /// Load the cache stored at `path`.
    ///
    /// A missing, unreadable or malformed file yields an empty cache. The cache
    /// only saves network round-trips, so losing it is preferable to failing.
    pub async fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cache = Self::new(path.clone());

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No cache at {}, starting empty", path.display());
                return cache;
            }
            Err(e) => {
                warn!("Ignoring unreadable cache {}: {}", path.display(), e);
                return cache;
            }
        };

        match serde_json::from_slice::<BTreeMap<String, String>>(&bytes) {
            Ok(map) => {
                debug!("Loaded {} cache entries from {}", map.len(), path.display());
                Self {
                    path,
                    entries: map.into_iter().collect(),
                }
            }
            Err(e) => {
                warn!("Ignoring malformed cache {}: {}", path.display(), e);
                cache
            }
        }
    }

    /// Per-user default location.
    pub fn default_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "figma-toolkit", "figma-toolkit")
        {
            dirs.cache_dir().join("cache.json")
        } else if let Some(home) = directories::BaseDirs::new() {
            home.home_dir().join(".figma-toolkit.cache.json")
        } else {
            PathBuf::from(".figma-toolkit.cache.json")
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, hash: &str) -> Option<String> {
        self.entries.get(hash).map(|entry| entry.value().clone())
    }

    pub fn contains(&self, hash: &str) -> bool {
        self.entries.contains_key(hash)
    }

    /// Insert in memory. The first write for a hash wins; returns whether the
    /// entry was new.
    pub fn put(&self, hash: impl Into<String>, content: impl Into<String>) -> bool {
        let mut inserted = false;
        self.entries.entry(hash.into()).or_insert_with(|| {
            inserted = true;
            content.into()
        });
        inserted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rewrite the persisted file with the full in-memory map.
    pub async fn flush(&self) -> Result<()> {
        let snapshot: BTreeMap<String, String> = self
            .entries
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        let json = serde_json::to_vec(&snapshot)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| CacheError::Write {
                    path: self.path.clone(),
                    source,
                })?;
        }

        tokio::fs::write(&self.path, json)
            .await
            .map_err(|source| CacheError::Write {
                path: self.path.clone(),
                source,
            })?;

        debug!("Flushed {} cache entries to {}", snapshot.len(), self.path.display());
        Ok(())
    }
}

impl std::fmt::Debug for ContentCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentCache")
            .field("path", &self.path)
            .field("entries", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");

        let cache = ContentCache::load(&path).await;
        assert!(cache.is_empty());
        cache.put("h1", "<svg/>a");
        cache.flush().await.unwrap();

        let reloaded = ContentCache::load(&path).await;
        assert_eq!(reloaded.get("h1").as_deref(), Some("<svg/>a"));
        assert_eq!(reloaded.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ContentCache::load(dir.path().join("absent.json")).await;
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_file_fails_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");
        std::fs::write(&path, "{ not json").unwrap();

        let cache = ContentCache::load(&path).await;
        assert!(cache.is_empty());

        // Still usable and overwrites the corrupt file on flush
        cache.put("h", "c");
        cache.flush().await.unwrap();
        assert_eq!(ContentCache::load(&path).await.get("h").as_deref(), Some("c"));
    }

    #[tokio::test]
    async fn test_flush_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/cache.json");

        let cache = ContentCache::new(&path);
        cache.put("h", "c");
        cache.flush().await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_flush_writes_whole_map() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");

        let cache = ContentCache::new(&path);
        cache.put("b", "2");
        cache.put("a", "1");
        cache.flush().await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw, r#"{"a":"1","b":"2"}"#);
    }

    #[test]
    fn test_first_write_wins() {
        let cache = ContentCache::new("unused.json");
        assert!(cache.put("h", "first"));
        assert!(!cache.put("h", "second"));
        assert_eq!(cache.get("h").as_deref(), Some("first"));
        assert!(cache.contains("h"));
        assert!(!cache.contains("other"));
    }
}
