use std::path::{Path, PathBuf};

use ftk_core::ExportParams;
use ftk_engine::DEFAULT_CONCURRENCY;
use ftk_pack::OptimizeOptions;
use ftk_remote::{DEFAULT_API_BASE, DEFAULT_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};

/// Configuration for figma-toolkit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Export cache file; the per-user cache dir when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_path: Option<PathBuf>,

    #[serde(default)]
    pub remote: RemoteConfig,

    #[serde(default)]
    pub export: ExportParams,

    #[serde(default)]
    pub optimize: OptimizeOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_concurrency")]
    pub max_concurrent_fetches: usize,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            timeout_secs: default_timeout(),
            max_concurrent_fetches: default_concurrency(),
        }
    }
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(&config)?;
            std::fs::write(path, content)?;
            Ok(config)
        }
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "figma-toolkit", "figma-toolkit") {
            dirs.config_dir().join("config.toml")
        } else if let Some(home) = directories::BaseDirs::new() {
            home.home_dir().join(".figma-toolkit").join("config.toml")
        } else {
            PathBuf::from(".figma-toolkit/config.toml")
        }
    }
}
