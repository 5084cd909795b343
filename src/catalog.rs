//! Catalog HTTP client: listing pages, detail documents, id derivation.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::time::Duration;

use crate::config::ApiConfig;
use crate::models::{EntityRef, ListingPage};
use crate::pagination::Paginator;
use crate::sanitize::strip_markup;

/// Detail document shape: only the category slots are decoded, everything
/// else in the body is ignored.
#[derive(Debug, Deserialize)]
struct DetailDocument {
    types: Vec<CategorySlot>,
}

#[derive(Debug, Deserialize)]
struct CategorySlot {
    #[serde(rename = "type")]
    category: CategoryName,
}

#[derive(Debug, Deserialize)]
struct CategoryName {
    name: String,
}

/// Client for the remote catalog API.
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    /// Fetch one listing page at the cursor's current offset.
    ///
    /// Returns up to `page_size` references, fewer when the remote source
    /// has fewer remaining. A non-success HTTP status is a page-level
    /// failure with a fixed message; the caller decides what to do with it.
    pub async fn fetch_page(&self, paginator: &Paginator) -> Result<Vec<EntityRef>> {
        let url = format!(
            "{}?limit={}&offset={}",
            self.base_url,
            paginator.page_size(),
            paginator.offset()
        );

        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            bail!("could not load the creature listing");
        }

        let page: ListingPage = response
            .json()
            .await
            .context("Invalid listing response body")?;

        Ok(page.results)
    }

    /// Fetch one entity's detail document and return its sanitized
    /// category names, in document order.
    ///
    /// A detail document with no categories is an error: the entity would
    /// be unrenderable (no accent color, no label).
    pub async fn fetch_categories(&self, entity: &EntityRef) -> Result<Vec<String>> {
        let response = self.http.get(&entity.url).send().await?;

        if !response.status().is_success() {
            bail!("could not load detail document for '{}'", entity.name);
        }

        let detail: DetailDocument = response
            .json()
            .await
            .with_context(|| format!("Invalid detail document for '{}'", entity.name))?;

        let categories: Vec<String> = detail
            .types
            .iter()
            .map(|slot| strip_markup(&slot.category.name))
            .filter(|name| !name.is_empty())
            .collect();

        if categories.is_empty() {
            bail!("detail document for '{}' has no categories", entity.name);
        }

        Ok(categories)
    }
}

/// Derive the entity identifier from a reference URL: the trailing numeric
/// path segment (`.../pokemon/25/` → `25`). The URL is sanitized first so
/// the id can be safely interpolated into paths and markup.
pub fn entity_id(url: &str) -> Result<String> {
    let cleaned = strip_markup(url);
    let id = cleaned
        .split('/')
        .filter(|segment| !segment.is_empty())
        .next_back()
        .context("reference URL has no path segments")?;

    if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
        bail!("reference URL does not end in a numeric id: {}", cleaned);
    }

    Ok(id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_from_trailing_segment() {
        assert_eq!(
            entity_id("https://pokeapi.co/api/v2/pokemon/25/").unwrap(),
            "25"
        );
    }

    #[test]
    fn id_without_trailing_slash() {
        assert_eq!(
            entity_id("https://pokeapi.co/api/v2/pokemon/133").unwrap(),
            "133"
        );
    }

    #[test]
    fn id_survives_markup_in_url() {
        assert_eq!(
            entity_id("https://pokeapi.co/api/v2/pokemon/7<script>x</script>/").unwrap(),
            "7"
        );
    }

    #[test]
    fn rejects_non_numeric_id() {
        assert!(entity_id("https://pokeapi.co/api/v2/pokemon/pikachu/").is_err());
        assert!(entity_id("").is_err());
        assert!(entity_id("///").is_err());
    }
}
