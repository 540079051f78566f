//! Progress-callback trait for per-item run events.
//!
//! Inject an [`Arc<dyn ProbeProgressCallback>`] via
//! [`crate::config::ProbeConfigBuilder::progress_callback`] to receive events
//! as a run generates or verifies each item. An item is one raster document,
//! one PDF, or one generated file.
//!
//! # Example
//!
//! ```rust
//! use navit_probe::{ProbeConfig, ProbeProgressCallback};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     completed: Arc<AtomicUsize>,
//! }
//!
//! impl ProbeProgressCallback for CountingCallback {
//!     fn on_item_complete(&self, index: usize, total: usize, label: &str, outcome: &str) {
//!         self.completed.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("{index}/{total} {label}: {outcome}");
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback {
//!     completed: Arc::new(AtomicUsize::new(0)),
//! });
//!
//! let config = ProbeConfig::builder()
//!     .progress_callback(counter as Arc<dyn ProbeProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::sync::Arc;

/// Called by generators and verifiers as they work through their items.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Indices are 1-based.
pub trait ProbeProgressCallback: Send + Sync {
    /// Called once before the first item.
    fn on_run_start(&self, total_items: usize) {
        let _ = total_items;
    }

    /// Called before an item is generated, loaded or rendered.
    fn on_item_start(&self, index: usize, total: usize, label: &str) {
        let _ = (index, total, label);
    }

    /// Called when an item finished.
    ///
    /// # Arguments
    /// * `outcome`: short summary, e.g. `"glm PASS, qwen PASS"` or a file size
    fn on_item_complete(&self, index: usize, total: usize, label: &str, outcome: &str) {
        let _ = (index, total, label, outcome);
    }

    /// Called when an item could not be processed at all.
    fn on_item_error(&self, index: usize, total: usize, label: &str, error: &str) {
        let _ = (index, total, label, error);
    }

    /// Called once after every item has been attempted.
    ///
    /// # Arguments
    /// * `success_count`: items that completed without an item-level error
    fn on_run_complete(&self, total_items: usize, success_count: usize) {
        let _ = (total_items, success_count);
    }
}

/// A no-op implementation for callers that don't need progress events.
///
/// This is the default when no callback is configured.
pub struct NoopProgressCallback;

impl ProbeProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ProbeConfig`].
pub type ProgressCallback = Arc<dyn ProbeProgressCallback>;

/// The configured callback, or a no-op one.
pub(crate) fn resolve(cb: &Option<ProgressCallback>) -> ProgressCallback {
    cb.clone()
        .unwrap_or_else(|| Arc::new(NoopProgressCallback) as ProgressCallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct TrackingCallback {
        starts: AtomicUsize,
        completes: AtomicUsize,
        errors: AtomicUsize,
        started_total: AtomicUsize,
        completed_total: AtomicUsize,
    }

    impl ProbeProgressCallback for TrackingCallback {
        fn on_run_start(&self, total_items: usize) {
            self.started_total.store(total_items, Ordering::SeqCst);
        }

        fn on_item_start(&self, _index: usize, _total: usize, _label: &str) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }

        fn on_item_complete(&self, _index: usize, _total: usize, _label: &str, _outcome: &str) {
            self.completes.fetch_add(1, Ordering::SeqCst);
        }

        fn on_item_error(&self, _index: usize, _total: usize, _label: &str, _error: &str) {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }

        fn on_run_complete(&self, _total_items: usize, success_count: usize) {
            self.completed_total.store(success_count, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_run_start(5);
        cb.on_item_start(1, 5, "01_long_receipt");
        cb.on_item_complete(1, 5, "01_long_receipt", "glm PASS");
        cb.on_item_error(2, 5, "02_wide_spreadsheet", "cannot load image");
        cb.on_run_complete(5, 4);
    }

    #[test]
    fn tracking_callback_receives_events() {
        let tracker = TrackingCallback::default();

        tracker.on_run_start(3);
        assert_eq!(tracker.started_total.load(Ordering::SeqCst), 3);

        tracker.on_item_start(1, 3, "a");
        tracker.on_item_complete(1, 3, "a", "qwen PASS");
        tracker.on_item_start(2, 3, "b");
        tracker.on_item_complete(2, 3, "b", "qwen CHECK");
        tracker.on_item_start(3, 3, "c");
        tracker.on_item_error(3, 3, "c", "cannot open PDF");

        assert_eq!(tracker.starts.load(Ordering::SeqCst), 3);
        assert_eq!(tracker.completes.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.errors.load(Ordering::SeqCst), 1);

        tracker.on_run_complete(3, 2);
        assert_eq!(tracker.completed_total.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn resolve_falls_back_to_noop() {
        let cb = resolve(&None);
        cb.on_run_start(10);
        cb.on_item_complete(1, 10, "x", "ok");
    }
}
