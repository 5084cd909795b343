//! # pokefeed
//!
//! A paginated creature-catalog feed client with partial-failure-tolerant
//! enrichment.
//!
//! pokefeed pages through a remote catalog listing (PokéAPI by default),
//! concurrently enriches every page with detail categories and an image
//! resource per entity, and renders the survivors as HTML cards — via a
//! CLI, a static gallery writer, or a small feed server with a pull-based
//! "next page" endpoint.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌───────────────────┐   ┌──────────┐
//! │ Catalog  │──▶│   Enrichment      │──▶│ Renderer │
//! │ listing  │   │ details + images  │   │  (HTML)  │
//! └──────────┘   │ (only_fulfilled)  │   └────┬─────┘
//!      ▲         └───────────────────┘        │
//!      │                                      ▼
//! ┌──────────┐                          ┌──────────┐
//! │ Paginator│◀───── FeedController ───▶│ CLI/HTTP │
//! └──────────┘      (Armed/Fetching/    └──────────┘
//!                        Done)
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! pokefeed fetch --pages 2          # print two enriched pages
//! pokefeed render -o gallery.html   # build a static gallery
//! pokefeed serve                    # serve / and /feed/next
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`fulfilled`] | Settle-all, keep-successes concurrency helper |
//! | [`catalog`] | Listing/detail HTTP client and id derivation |
//! | [`assets`] | Image resource resolution (HTTP or local directory) |
//! | [`enrich`] | Per-page enrichment and identity-keyed merge |
//! | [`pagination`] | Owned pagination cursor with ceiling |
//! | [`render`] | Color table, cards, gallery document |
//! | [`feed`] | Pull-based page state machine |
//! | [`sanitize`] | Markup stripping and HTML escaping |
//! | [`progress`] | Stderr progress reporting |
//! | [`fetch_cmd`] | `fetch` subcommand: print enriched pages |
//! | [`gallery`] | `render` subcommand: write a static gallery file |
//! | [`serve`] | Feed HTTP server |

pub mod assets;
pub mod catalog;
pub mod config;
pub mod enrich;
pub mod feed;
pub mod fetch_cmd;
pub mod fulfilled;
pub mod gallery;
pub mod models;
pub mod pagination;
pub mod progress;
pub mod render;
pub mod sanitize;
pub mod serve;
