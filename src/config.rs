use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub assets: AssetsConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Listing endpoint; detail documents are fetched via the URLs the
    /// listing returns.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_size: default_page_size(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "https://pokeapi.co/api/v2/pokemon".to_string()
}
fn default_page_size() -> u32 {
    15
}
fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct AssetsConfig {
    /// Where `<id>.png` images live: an `http(s)://` base or a local
    /// directory.
    #[serde(default = "default_image_base")]
    pub image_base: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            image_base: default_image_base(),
        }
    }
}

fn default_image_base() -> String {
    "./assets/img".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct FeedConfig {
    /// Pagination ceiling: no further page is requested once the offset
    /// reaches this many entries.
    #[serde(default = "default_max_entries")]
    pub max_entries: u32,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
        }
    }
}

fn default_max_entries() -> u32 {
    150
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:7341".to_string()
}

impl Config {
    /// All-defaults config, used when no config file is present.
    pub fn minimal() -> Self {
        Self::default()
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.api.page_size == 0 {
        anyhow::bail!("api.page_size must be > 0");
    }

    if config.api.timeout_secs == 0 {
        anyhow::bail!("api.timeout_secs must be > 0");
    }

    if config.feed.max_entries < config.api.page_size {
        anyhow::bail!("feed.max_entries must be >= api.page_size");
    }

    if config.api.base_url.is_empty() {
        anyhow::bail!("api.base_url must not be empty");
    }

    Ok(config)
}
