//! Pagination cursor.
//!
//! An owned value threaded through the feed controller — there is no
//! process-wide counter. The offset only ever advances, by exactly one
//! page size, and only after the page it addressed has been fully fetched
//! and enriched.

/// Cursor over the listing endpoint: fixed page size, monotonically
/// increasing offset, fixed ceiling.
#[derive(Debug, Clone)]
pub struct Paginator {
    page_size: u32,
    offset: u32,
    max_entries: u32,
}

impl Paginator {
    pub fn new(page_size: u32, max_entries: u32) -> Self {
        Self {
            page_size,
            offset: 0,
            max_entries,
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// True once the offset has reached the ceiling; no further page may
    /// be requested.
    pub fn exhausted(&self) -> bool {
        self.offset >= self.max_entries
    }

    /// Advance by one page. Callers invoke this exactly once per
    /// successfully completed page, and never once [`exhausted`] is true.
    ///
    /// [`exhausted`]: Paginator::exhausted
    pub fn advance(&mut self) {
        self.offset += self.page_size;
    }
}
