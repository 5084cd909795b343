//! Fetch progress reporting.
//!
//! Reports observable progress while pages are fetched and enriched, so a
//! long `pokefeed fetch` run shows what is happening. Progress is emitted
//! on **stderr** so stdout remains parseable for scripts.

use std::io::Write;

/// A single progress event for a feed run.
#[derive(Clone, Debug)]
pub enum FeedProgressEvent {
    /// Listing request issued for the page at `offset`.
    Listing { offset: u32 },
    /// Page enriched: `kept` of `requested` entities survived.
    PageDone {
        offset: u32,
        requested: usize,
        kept: usize,
    },
}

/// Reports feed progress. Implementations write to stderr (human or JSON).
pub trait FeedProgressReporter: Send + Sync {
    fn report(&self, event: FeedProgressEvent);
}

/// Human-friendly progress: "fetch offset 30  listing...".
pub struct StderrProgress;

impl FeedProgressReporter for StderrProgress {
    fn report(&self, event: FeedProgressEvent) {
        let line = match &event {
            FeedProgressEvent::Listing { offset } => {
                format!("fetch offset {}  listing...\n", offset)
            }
            FeedProgressEvent::PageDone {
                offset,
                requested,
                kept,
            } => {
                format!(
                    "fetch offset {}  enriched  {} / {} entities\n",
                    offset, kept, requested
                )
            }
        };
        let _ = std::io::stderr().lock().write_all(line.as_bytes());
        let _ = std::io::stderr().lock().flush();
    }
}

/// Machine-readable progress: one JSON object per line on stderr.
pub struct JsonProgress;

impl FeedProgressReporter for JsonProgress {
    fn report(&self, event: FeedProgressEvent) {
        let obj = match &event {
            FeedProgressEvent::Listing { offset } => serde_json::json!({
                "event": "progress",
                "phase": "listing",
                "offset": offset
            }),
            FeedProgressEvent::PageDone {
                offset,
                requested,
                kept,
            } => serde_json::json!({
                "event": "progress",
                "phase": "page_done",
                "offset": offset,
                "requested": requested,
                "kept": kept
            }),
        };
        if let Ok(line) = serde_json::to_string(&obj) {
            let _ = writeln!(std::io::stderr().lock(), "{}", line);
            let _ = std::io::stderr().lock().flush();
        }
    }
}

/// No-op reporter when progress is disabled.
pub struct NoProgress;

impl FeedProgressReporter for NoProgress {
    fn report(&self, _event: FeedProgressEvent) {}
}

/// Progress mode for the CLI: off, human (stderr), or JSON (stderr).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProgressMode {
    Off,
    Human,
    Json,
}

impl ProgressMode {
    /// Default: human progress when stderr is a TTY, otherwise off.
    pub fn default_for_tty() -> Self {
        if atty::is(atty::Stream::Stderr) {
            ProgressMode::Human
        } else {
            ProgressMode::Off
        }
    }

    pub fn reporter(&self) -> Box<dyn FeedProgressReporter> {
        match self {
            ProgressMode::Off => Box::new(NoProgress),
            ProgressMode::Human => Box::new(StderrProgress),
            ProgressMode::Json => Box::new(JsonProgress),
        }
    }
}
