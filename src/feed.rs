//! Feed controller: the pull-based page state machine.
//!
//! "Load more when the reader nears the end of the list" reduces to an
//! explicit [`next_page`] call from whoever consumes the feed (CLI loop,
//! gallery builder, or the `/feed/next` handler). The controller is
//! exclusively held while a page is in flight, so requests can never
//! overlap.
//!
//! [`next_page`]: FeedController::next_page

use anyhow::Result;

use crate::assets::ImageStore;
use crate::catalog::CatalogClient;
use crate::enrich::enrich_page;
use crate::models::EntityRecord;
use crate::pagination::Paginator;
use crate::progress::{FeedProgressEvent, FeedProgressReporter, NoProgress};

/// Controller state. `Fetching` is only observable from within
/// [`FeedController::next_page`]; between calls the controller is either
/// armed for the next request or permanently done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedState {
    Armed,
    Fetching,
    Done,
}

pub struct FeedController {
    client: CatalogClient,
    images: Box<dyn ImageStore>,
    paginator: Paginator,
    state: FeedState,
    progress: Box<dyn FeedProgressReporter>,
}

impl FeedController {
    pub fn new(client: CatalogClient, images: Box<dyn ImageStore>, paginator: Paginator) -> Self {
        Self {
            client,
            images,
            paginator,
            state: FeedState::Armed,
            progress: Box::new(NoProgress),
        }
    }

    pub fn with_progress(mut self, progress: Box<dyn FeedProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    pub fn state(&self) -> FeedState {
        self.state
    }

    pub fn offset(&self) -> u32 {
        self.paginator.offset()
    }

    /// Fetch, enrich, and return the next page.
    ///
    /// - `Ok(None)` once the pagination ceiling has been reached: no
    ///   request is issued and the controller stays `Done`.
    /// - `Ok(Some(records))` on success; per-entity failures have already
    ///   been dropped, so the page may hold fewer records than the page
    ///   size (or none). The cursor advances exactly once.
    /// - `Err` when the listing fetch itself fails; the cursor does not
    ///   advance and the controller re-arms, so the caller may try again.
    pub async fn next_page(&mut self) -> Result<Option<Vec<EntityRecord>>> {
        if self.state == FeedState::Done || self.paginator.exhausted() {
            self.state = FeedState::Done;
            return Ok(None);
        }

        self.state = FeedState::Fetching;
        let offset = self.paginator.offset();
        self.progress.report(FeedProgressEvent::Listing { offset });

        let refs = match self.client.fetch_page(&self.paginator).await {
            Ok(refs) => refs,
            Err(e) => {
                self.state = FeedState::Armed;
                return Err(e);
            }
        };

        let requested = refs.len();
        let records = enrich_page(&self.client, self.images.as_ref(), refs).await;
        self.progress.report(FeedProgressEvent::PageDone {
            offset,
            requested,
            kept: records.len(),
        });

        self.paginator.advance();
        self.state = if self.paginator.exhausted() {
            FeedState::Done
        } else {
            FeedState::Armed
        };

        Ok(Some(records))
    }
}
