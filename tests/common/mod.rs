//! In-process stub catalog server for the integration tests.
//!
//! Serves a listing endpoint, per-entity detail documents, and image
//! files, with switches for per-entity and page-level failures.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

/// Stub behavior switches. Entities are numbered `1..=total`.
#[derive(Default)]
pub struct StubCatalog {
    pub total: u32,
    /// Detail fetches for these ids answer 500.
    pub detail_failures: HashSet<u32>,
    /// Image fetches for these ids answer 404.
    pub image_failures: HashSet<u32>,
    /// These ids get a `<script>`-laced category name.
    pub scripted_categories: HashSet<u32>,
    /// When set, the listing endpoint answers 500.
    pub fail_listing: AtomicBool,
    /// Number of listing requests received.
    pub listing_hits: AtomicUsize,
    base: OnceLock<String>,
}

impl StubCatalog {
    pub fn with_total(total: u32) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }
}

pub struct StubServer {
    pub addr: SocketAddr,
    pub state: Arc<StubCatalog>,
}

impl StubServer {
    pub fn listing_url(&self) -> String {
        format!("http://{}/api/v2/pokemon", self.addr)
    }

    pub fn image_base(&self) -> String {
        format!("http://{}/img", self.addr)
    }

    pub fn listing_hits(&self) -> usize {
        self.state.listing_hits.load(Ordering::SeqCst)
    }
}

/// Deterministic categories per entity id.
pub fn categories_for(id: u32) -> Vec<&'static str> {
    match id % 3 {
        1 => vec!["fire"],
        2 => vec!["water"],
        _ => vec!["grass", "poison"],
    }
}

pub async fn spawn_stub(state: StubCatalog) -> StubServer {
    let state = Arc::new(state);

    let app = Router::new()
        .route("/api/v2/pokemon", get(handle_listing))
        .route("/api/v2/pokemon/{id}", get(handle_detail))
        .route("/img/{file}", get(handle_image))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    state.base.set(format!("http://{}", addr)).unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubServer { addr, state }
}

#[derive(Deserialize)]
struct ListingQuery {
    limit: u32,
    offset: u32,
}

async fn handle_listing(
    State(state): State<Arc<StubCatalog>>,
    Query(query): Query<ListingQuery>,
) -> impl IntoResponse {
    state.listing_hits.fetch_add(1, Ordering::SeqCst);

    if state.fail_listing.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "listing down").into_response();
    }

    let base = state.base.get().unwrap();
    let first = query.offset + 1;
    let last = (query.offset + query.limit).min(state.total);

    let results: Vec<serde_json::Value> = (first..=last)
        .map(|id| {
            serde_json::json!({
                "name": format!("creature-{}", id),
                "url": format!("{}/api/v2/pokemon/{}", base, id),
            })
        })
        .collect();

    Json(serde_json::json!({ "count": state.total, "results": results })).into_response()
}

async fn handle_detail(
    State(state): State<Arc<StubCatalog>>,
    Path(id): Path<u32>,
) -> impl IntoResponse {
    if state.detail_failures.contains(&id) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "detail down").into_response();
    }

    let names: Vec<String> = if state.scripted_categories.contains(&id) {
        vec!["<script>alert(1)</script>fire".to_string()]
    } else {
        categories_for(id).iter().map(|c| c.to_string()).collect()
    };

    let types: Vec<serde_json::Value> = names
        .iter()
        .enumerate()
        .map(|(slot, name)| {
            serde_json::json!({
                "slot": slot + 1,
                "type": { "name": name }
            })
        })
        .collect();

    Json(serde_json::json!({
        "id": id,
        "name": format!("creature-{}", id),
        "types": types,
    }))
    .into_response()
}

async fn handle_image(
    State(state): State<Arc<StubCatalog>>,
    Path(file): Path<String>,
) -> impl IntoResponse {
    let id: u32 = match file.strip_suffix(".png").and_then(|s| s.parse().ok()) {
        Some(id) => id,
        None => return (StatusCode::BAD_REQUEST, "bad image name").into_response(),
    };

    if state.image_failures.contains(&id) || id == 0 || id > state.total {
        return (StatusCode::NOT_FOUND, "no such image").into_response();
    }

    (
        [(header::CONTENT_TYPE, "image/png")],
        b"\x89PNG\r\n\x1a\n".to_vec(),
    )
        .into_response()
}
