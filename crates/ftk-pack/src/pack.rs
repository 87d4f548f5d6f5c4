//! Icon pack domain model

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::try_join_all;
use tracing::debug;

use crate::svg::{OptimizeOptions, SvgOptimizer};
use crate::{PackError, Result};

/// Named SVG markup, keyed by component name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IconPack {
    icons: BTreeMap<String, String>,
}

impl IconPack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.icons.get(name).map(String::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.icons.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.icons.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Optimize every icon on the blocking pool.
    ///
    /// All icons are optimized concurrently. The first failure aborts the call
    /// and leaves the pack unchanged.
    pub async fn optimize(&mut self, options: &OptimizeOptions) -> Result<()> {
        let optimizer = Arc::new(SvgOptimizer::new(options.clone())?);

        let jobs: Vec<(String, String)> = self
            .icons
            .iter()
            .map(|(name, svg)| (name.clone(), svg.clone()))
            .collect();

        let tasks = jobs.into_iter().map(|(name, svg)| {
            let optimizer = Arc::clone(&optimizer);
            async move {
                let handle = tokio::task::spawn_blocking(move || match optimizer.optimize(&svg) {
                    Ok(optimized) => Ok((name, optimized)),
                    Err(e) => Err(PackError::Optimize {
                        name,
                        reason: e.to_string(),
                    }),
                });
                match handle.await {
                    Ok(result) => result,
                    Err(e) => Err(PackError::Join(e)),
                }
            }
        });

        let optimized = try_join_all(tasks).await?;
        debug!("Optimized {} icons", optimized.len());
        self.icons.extend(optimized);
        Ok(())
    }

    /// Snapshot of the current contents.
    pub fn export(&self) -> BTreeMap<String, String> {
        self.icons.clone()
    }

    /// Pretty-printed JSON object, sorted by name.
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.icons)?)
    }
}

impl From<BTreeMap<String, String>> for IconPack {
    fn from(icons: BTreeMap<String, String>) -> Self {
        Self { icons }
    }
}

impl FromIterator<(String, String)> for IconPack {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            icons: iter.into_iter().collect(),
        }
    }
}
