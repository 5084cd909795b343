//! Image resource resolution.
//!
//! Every entity owns one image named `<id>.png`. Where that lives depends
//! on deployment: a static HTTP base in front of the gallery, or a local
//! directory when building a static page. The [`ImageStore`] trait is the
//! seam; the enricher only sees `resolve`.

use anyhow::{bail, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::AssetsConfig;

/// Resolves an entity id to the location of its image resource.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Resolve `<id>.png`. Errors are per-entity and dropped silently by
    /// the enrichment phase.
    async fn resolve(&self, id: &str) -> Result<String>;
}

/// Images served over HTTP: `GET <base>/<id>.png` must succeed, and the
/// response's final URL (after redirects) is the resolved location.
pub struct HttpImageStore {
    http: reqwest::Client,
    base: String,
}

impl HttpImageStore {
    pub fn new(base: &str, timeout_secs: u64) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base: base.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ImageStore for HttpImageStore {
    async fn resolve(&self, id: &str) -> Result<String> {
        let url = format!("{}/{}.png", self.base, id);
        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            bail!("image not available: {}", url);
        }

        Ok(response.url().to_string())
    }
}

/// Images in a local directory: `<dir>/<id>.png` must exist. The resolved
/// location is the relative-or-absolute path as configured, suitable for
/// an `src` attribute in a locally rendered page.
pub struct DirImageStore {
    dir: PathBuf,
}

impl DirImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl ImageStore for DirImageStore {
    async fn resolve(&self, id: &str) -> Result<String> {
        let path = self.dir.join(format!("{}.png", id));

        if !path.is_file() {
            bail!("image not available: {}", path.display());
        }

        Ok(path.display().to_string())
    }
}

/// Pick a store implementation from the assets config: an `http(s)://`
/// base gets the HTTP store, anything else is treated as a directory.
pub fn open_store(config: &AssetsConfig, timeout_secs: u64) -> Result<Box<dyn ImageStore>> {
    if config.image_base.starts_with("http://") || config.image_base.starts_with("https://") {
        Ok(Box::new(HttpImageStore::new(&config.image_base, timeout_secs)?))
    } else {
        Ok(Box::new(DirImageStore::new(&config.image_base)))
    }
}
