use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use tracing::debug;

/// Debug-level progress reporting for per-document column access.
///
/// Requesting document 0 restarts the clock; afterwards a line is emitted
/// every `log_every` documents and on the last document of the segment.
/// Pings are lock-free, so concurrent readers of one column never wait on
/// each other.
#[derive(Debug)]
pub struct ProgressTracker {
    field: String,
    doc_count: u32,
    log_every: u32,
    origin: Instant,
    requests: AtomicU64,
    /// Microseconds after `origin` at which document 0 was last requested.
    started_us: AtomicU64,
}

impl ProgressTracker {
    pub fn new(field: &str, doc_count: u32, min_every: u32) -> Self {
        let log_every = if doc_count == 0 {
            u32::MAX
        } else {
            (doc_count / 10).max(min_every).max(1)
        };
        Self {
            field: field.to_string(),
            doc_count,
            log_every,
            origin: Instant::now(),
            requests: AtomicU64::new(0),
            started_us: AtomicU64::new(0),
        }
    }

    pub fn log_every(&self) -> u32 {
        self.log_every
    }

    pub fn requests(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    fn now_us(&self) -> u64 {
        self.origin.elapsed().as_micros() as u64
    }

    pub fn ping(&self, doc: u32) {
        if doc == 0 {
            self.started_us.store(self.now_us(), Ordering::Relaxed);
            self.requests.store(1, Ordering::Relaxed);
            debug!(
                field = %self.field,
                "Reading synthesized column value in doc 0/{}", self.doc_count
            );
            return;
        }
        let requests = self.requests.fetch_add(1, Ordering::Relaxed) + 1;
        if doc % self.log_every == 0 || doc + 1 == self.doc_count {
            let ms = self
                .now_us()
                .saturating_sub(self.started_us.load(Ordering::Relaxed))
                / 1000;
            let speed = if ms == 0 {
                0.0
            } else {
                requests as f64 / ms as f64
            };
            debug!(
                field = %self.field,
                "Reading synthesized column value in doc {}/{}: {}ms since doc 0, requests={}, {:.2} docs/ms",
                doc,
                self.doc_count,
                ms,
                requests,
                speed
            );
        }
    }
}
