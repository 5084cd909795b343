//! Core data models that flow through the feed pipeline.
//!
//! A listing page produces [`EntityRef`]s; enrichment turns the surviving
//! refs into [`EntityRecord`]s, the unit the renderer consumes.

use serde::Deserialize;

/// One entry of a listing page: a named reference to a detail document.
///
/// Transient — consumed by the enrichment phases of the same page and
/// never stored.
#[derive(Debug, Clone, Deserialize)]
pub struct EntityRef {
    pub name: String,
    pub url: String,
}

/// Body of the listing endpoint response.
#[derive(Debug, Deserialize)]
pub struct ListingPage {
    pub results: Vec<EntityRef>,
}

/// A fully enriched catalog entry, ready to render.
///
/// Immutable after assembly. `categories` is non-empty: an entity whose
/// detail document carries no categories is dropped during enrichment.
#[derive(Debug, Clone)]
pub struct EntityRecord {
    pub id: String,
    pub name: String,
    pub categories: Vec<String>,
    pub image_url: String,
}
