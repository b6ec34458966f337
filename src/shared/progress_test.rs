use std::sync::Arc;
use std::thread;

use crate::shared::progress::ProgressTracker;

#[test]
fn log_interval_has_a_floor() {
    assert_eq!(ProgressTracker::new("f", 500, 1000).log_every(), 1000);
    assert_eq!(ProgressTracker::new("f", 50_000, 1000).log_every(), 5000);
    assert_eq!(ProgressTracker::new("f", 0, 1000).log_every(), u32::MAX);
}

#[test]
fn doc_zero_resets_request_count() {
    let tracker = ProgressTracker::new("f", 10, 1);
    for doc in 0..10 {
        tracker.ping(doc);
    }
    assert_eq!(tracker.requests(), 10);
    tracker.ping(0);
    assert_eq!(tracker.requests(), 1);
}

#[test]
fn concurrent_pings_are_all_counted() {
    let tracker = Arc::new(ProgressTracker::new("f", 4000, 1));
    tracker.ping(0);
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let tracker = Arc::clone(&tracker);
            thread::spawn(move || {
                for doc in 1..=500u32 {
                    tracker.ping(t * 500 + doc);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(tracker.requests(), 1 + 8 * 500);
}
