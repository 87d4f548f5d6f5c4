pub mod component;
pub mod download;
pub mod export;
pub mod generate;
pub mod react;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result, bail};
use ftk_cache::ContentCache;
use ftk_config::Config;
use ftk_engine::{ComponentLoader, Session};
use ftk_pack::IconPack;
use ftk_remote::{FigmaClient, HttpFetcher};
use tracing::info;

use crate::cli::Cli;

const MISSING_TOKEN: &str = "Missing Figma personal access token. Please provide via --access-token or FIGMA_ACCESS_TOKEN environment variable.";

/// Clients and cache shared by every command.
pub struct Toolkit {
    pub client: Arc<FigmaClient>,
    pub fetcher: Arc<HttpFetcher>,
    pub cache: Arc<ContentCache>,
    config: Config,
}

impl Toolkit {
    pub async fn new(cli: &Cli, config: &Config) -> Result<Self> {
        let token = access_token(cli.access_token.as_deref())?;
        let timeout = Duration::from_secs(config.remote.timeout_secs);

        let client = FigmaClient::new(token, config.remote.api_base.clone(), timeout)?;
        let fetcher = HttpFetcher::new(timeout)?;

        let cache_path = cli
            .cache
            .clone()
            .or_else(|| config.cache_path.clone())
            .unwrap_or_else(ContentCache::default_path);
        let cache = ContentCache::load(cache_path).await;

        Ok(Self {
            client: Arc::new(client),
            fetcher: Arc::new(fetcher),
            cache: Arc::new(cache),
            config: config.clone(),
        })
    }

    pub async fn session(&self, file_id: &str) -> Result<Session> {
        Ok(Session::load(self.client.as_ref(), file_id).await?)
    }

    pub fn loader(&self, file_id: &str) -> ComponentLoader {
        ComponentLoader::new(
            self.client.clone(),
            self.fetcher.clone(),
            self.cache.clone(),
            file_id,
        )
        .with_params(self.config.export.clone())
        .with_concurrency(self.config.remote.max_concurrent_fetches)
    }

    /// Downloaded and optimized icon pack for `page` (every page when `None`).
    pub async fn icon_pack(&self, file_id: &str, page: Option<&str>) -> Result<IconPack> {
        let session = self.session(file_id).await?;
        let mut pack = session.icon_pack(page, &self.loader(file_id)).await?;
        info!("Optimizing {} icons", pack.len());
        pack.optimize(&self.config.optimize).await?;
        Ok(pack)
    }
}

pub fn access_token(token: Option<&str>) -> Result<String> {
    match token.map(str::trim) {
        Some(token) if !token.is_empty() => Ok(token.to_string()),
        _ => bail!(MISSING_TOKEN),
    }
}

/// Write to `output`, or stdout when `None`.
pub async fn emit(output: Option<&Path>, contents: &str) -> Result<()> {
    match output {
        Some(path) => {
            tokio::fs::write(path, contents)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => {
            use tokio::io::AsyncWriteExt;
            let mut stdout = tokio::io::stdout();
            stdout.write_all(contents.as_bytes()).await?;
            stdout.flush().await?;
        }
    }
    Ok(())
}
