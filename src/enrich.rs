//! Per-page enrichment: detail categories, then images, merged by id.
//!
//! Both phases fan out concurrently across the page's entities through
//! [`only_fulfilled`], so one slow or failing entity never blocks or fails
//! the rest. The phases are strictly sequential relative to each other.
//!
//! The merge is keyed by entity id, not by list position: the two phases
//! can lose different entities, and positional alignment would attach one
//! entity's categories to another's image. An entity missing either field
//! is dropped whole; the survivors keep original listing order.

use crate::assets::ImageStore;
use crate::catalog::{entity_id, CatalogClient};
use crate::fulfilled::only_fulfilled;
use crate::models::{EntityRecord, EntityRef};
use crate::sanitize::strip_markup;

/// Detail-phase output: one surviving entity with its categories.
struct DetailedEntity {
    id: String,
    name: String,
    categories: Vec<String>,
}

/// Enrich one listing page into renderable records.
///
/// The result may be shorter than the input: entities whose detail or
/// image fetch failed are silently omitted.
pub async fn enrich_page(
    client: &CatalogClient,
    images: &dyn ImageStore,
    refs: Vec<EntityRef>,
) -> Vec<EntityRecord> {
    // Phase 1: detail documents → (id, name, categories).
    let detailed = only_fulfilled(refs, |entity| async move {
        let id = entity_id(&entity.url)?;
        let categories = client.fetch_categories(&entity).await?;
        anyhow::Ok(DetailedEntity {
            id,
            name: strip_markup(&entity.name),
            categories,
        })
    })
    .await;

    // Phase 2: image lookups for the survivors, keyed by id.
    let ids: Vec<String> = detailed.iter().map(|e| e.id.clone()).collect();
    let resolved = only_fulfilled(ids, |id| async move {
        let url = images.resolve(&id).await?;
        anyhow::Ok((id, url))
    })
    .await;

    // Merge by id in phase-1 (= listing) order.
    detailed
        .into_iter()
        .filter_map(|entity| {
            let image_url = resolved
                .iter()
                .find(|(id, _)| *id == entity.id)
                .map(|(_, url)| url.clone())?;
            Some(EntityRecord {
                id: entity.id,
                name: entity.name,
                categories: entity.categories,
                image_url,
            })
        })
        .collect()
}
