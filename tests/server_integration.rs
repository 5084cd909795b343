//! In-process tests for the feed HTTP server: gallery, `/feed/next`
//! contract, error envelope, and health.

mod common;

use std::sync::atomic::Ordering;

use pokefeed::config::{ApiConfig, AssetsConfig, Config, FeedConfig, ServerConfig};
use pokefeed::serve::build_router;

use common::{spawn_stub, StubCatalog, StubServer};

/// Serve the router on an ephemeral port and return its base URL.
async fn spawn_server(stub: &StubServer, page_size: u32, max_entries: u32) -> String {
    let config = Config {
        api: ApiConfig {
            base_url: stub.listing_url(),
            page_size,
            timeout_secs: 5,
        },
        assets: AssetsConfig {
            image_base: stub.image_base(),
        },
        feed: FeedConfig { max_entries },
        server: ServerConfig {
            bind: "127.0.0.1:0".to_string(),
        },
    };

    let app = build_router(&config).unwrap();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn gallery_reload_serves_first_page_again() {
    let stub = spawn_stub(StubCatalog::with_total(45)).await;
    let base = spawn_server(&stub, 15, 45).await;

    let first = reqwest::get(format!("{}/", base))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(first.contains("1. Creature-1"));
    assert!(first.contains("15. Creature-15"));
    assert!(!first.contains("16. Creature-16"));

    // A reload restarts the feed instead of consuming the next page.
    let reload = reqwest::get(format!("{}/", base))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(reload.contains("1. Creature-1"));
    assert!(!reload.contains("16. Creature-16"));

    // The page points its sentinel at the feed endpoint.
    assert!(reload.contains("feed-sentinel"));
    assert!(reload.contains("/feed/next"));
}

#[tokio::test]
async fn feed_next_continues_until_done() {
    let stub = spawn_stub(StubCatalog::with_total(45)).await;
    let base = spawn_server(&stub, 15, 45).await;

    // Gallery consumes the first page.
    reqwest::get(format!("{}/", base)).await.unwrap();

    let page: serde_json::Value = reqwest::get(format!("{}/feed/next", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let entries = page["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 15);
    assert_eq!(entries[0]["id"], "16");
    assert_eq!(entries[14]["id"], "30");
    assert!(page["html"].as_str().unwrap().contains("<li class=\"card"));
    assert_eq!(page["done"], false);

    // Third page reaches the ceiling.
    let page: serde_json::Value = reqwest::get(format!("{}/feed/next", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(page["entries"].as_array().unwrap().len(), 15);
    assert_eq!(page["entries"][0]["id"], "31");
    assert_eq!(page["done"], true);

    // Past the ceiling: empty page, still done, and no upstream request.
    let hits_before = stub.listing_hits();
    let page: serde_json::Value = reqwest::get(format!("{}/feed/next", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(page["entries"].as_array().unwrap().is_empty());
    assert_eq!(page["html"], "");
    assert_eq!(page["done"], true);
    assert_eq!(stub.listing_hits(), hits_before);
}

#[tokio::test]
async fn upstream_failure_maps_to_error_envelope() {
    let catalog = StubCatalog::with_total(15);
    catalog.fail_listing.store(true, Ordering::SeqCst);
    let stub = spawn_stub(catalog).await;
    let base = spawn_server(&stub, 15, 150).await;

    let response = reqwest::get(format!("{}/feed/next", base)).await.unwrap();
    assert_eq!(response.status(), 502);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"]["code"], "upstream_error");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("could not load the creature listing"));

    let response = reqwest::get(format!("{}/", base)).await.unwrap();
    assert_eq!(response.status(), 502);

    // The feed recovers once the upstream does, from the start.
    stub.state.fail_listing.store(false, Ordering::SeqCst);
    let page: serde_json::Value = reqwest::get(format!("{}/feed/next", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(page["entries"][0]["id"], "1");
}

#[tokio::test]
async fn health_reports_version() {
    let stub = spawn_stub(StubCatalog::with_total(15)).await;
    let base = spawn_server(&stub, 15, 150).await;

    let body: serde_json::Value = reqwest::get(format!("{}/health", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
