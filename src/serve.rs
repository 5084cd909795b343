//! Gallery feed HTTP server.
//!
//! Serves the rendered gallery and a pull-based page endpoint. The browser
//! side of infinite scroll reduces to "ask for the next page when the
//! sentinel nears the viewport"; the server owns the feed state machine,
//! so reloading the page restarts the feed and concurrent requests are
//! serialized on the controller.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/` | Gallery document containing the first page |
//! | `GET`  | `/feed/next` | Next enriched page as JSON (`entries`, `html`, `done`) |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! Error responses use a JSON envelope:
//!
//! ```json
//! { "error": { "code": "upstream_error", "message": "could not load the creature listing" } }
//! ```

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};

use crate::assets;
use crate::catalog::CatalogClient;
use crate::config::Config;
use crate::feed::FeedController;
use crate::models::EntityRecord;
use crate::pagination::Paginator;
use crate::render::{render_cards, render_document};

/// Shared application state. The feed controller sits behind an async
/// mutex: a page fetch in flight blocks the next `/feed/next` until it
/// settles, so requests on the controller can never overlap.
#[derive(Clone)]
struct AppState {
    config: Arc<Config>,
    feed: Arc<Mutex<FeedController>>,
}

fn new_feed(config: &Config) -> anyhow::Result<FeedController> {
    let client = CatalogClient::new(&config.api)?;
    let images = assets::open_store(&config.assets, config.api.timeout_secs)?;
    let paginator = Paginator::new(config.api.page_size, config.feed.max_entries);
    Ok(FeedController::new(client, images, paginator))
}

/// Build the feed router. Exposed so tests can serve it on an ephemeral
/// port; [`run_server`] is the CLI entry point.
pub fn build_router(config: &Config) -> anyhow::Result<Router> {
    let config = Arc::new(config.clone());
    let feed = new_feed(&config)?;

    let state = AppState {
        config,
        feed: Arc::new(Mutex::new(feed)),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Ok(Router::new()
        .route("/", get(handle_gallery))
        .route("/feed/next", get(handle_next_page))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(state))
}

/// Start the feed server on the configured bind address.
///
/// Runs until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let app = build_router(config)?;

    println!("Feed server listening on http://{}", config.server.bind);

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

/// JSON error envelope.
#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

/// 502 for failures against the upstream catalog.
fn upstream_error(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_GATEWAY,
        code: "upstream_error".to_string(),
        message: message.into(),
    }
}

/// 500 for failures inside the server itself.
fn internal_error(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        code: "internal".to_string(),
        message: message.into(),
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ GET / ============

/// Serves the gallery document seeded with the first page of cards.
///
/// Loading the gallery restarts the feed: the document always shows the
/// first page, and the following `/feed/next` calls continue from there.
async fn handle_gallery(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let mut feed = state.feed.lock().await;
    *feed = new_feed(&state.config).map_err(|e| internal_error(e.to_string()))?;

    let records = feed
        .next_page()
        .await
        .map_err(|e| upstream_error(e.to_string()))?
        .unwrap_or_default();

    Ok(Html(render_document(&records, Some("/feed/next"))))
}

// ============ GET /feed/next ============

/// JSON body for one feed page.
#[derive(Serialize)]
struct FeedPageResponse {
    entries: Vec<EntryResponse>,
    /// The page's cards as an HTML fragment, ready to append to the list.
    html: String,
    /// True once the pagination ceiling has been reached; no further page
    /// will ever be returned.
    done: bool,
}

#[derive(Serialize)]
struct EntryResponse {
    id: String,
    name: String,
    categories: Vec<String>,
    image_url: String,
}

impl From<&EntityRecord> for EntryResponse {
    fn from(record: &EntityRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            categories: record.categories.clone(),
            image_url: record.image_url.clone(),
        }
    }
}

/// Handler for `GET /feed/next`: advance the feed by one page.
///
/// After the ceiling is reached the endpoint keeps answering with an empty
/// page and `done: true` — a late or repeated sentinel trigger performs no
/// fetch.
async fn handle_next_page(State(state): State<AppState>) -> Result<Json<FeedPageResponse>, AppError> {
    let mut feed = state.feed.lock().await;

    let page = feed
        .next_page()
        .await
        .map_err(|e| upstream_error(e.to_string()))?;

    let response = match page {
        Some(records) => FeedPageResponse {
            entries: records.iter().map(EntryResponse::from).collect(),
            html: render_cards(&records),
            done: feed.state() == crate::feed::FeedState::Done,
        },
        None => FeedPageResponse {
            entries: Vec::new(),
            html: String::new(),
            done: true,
        },
    };

    Ok(Json(response))
}
