//! Progress-callback trait for batch conversion events.
//!
//! Inject an [`Arc<dyn BatchProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to receive
//! events as [`crate::convert::convert_batch`] works through its files.
//! Single-document conversion is synchronous and fast, so it fires no events.
//!
//! The trait is `Send + Sync` because files are converted concurrently and
//! events can arrive from several tasks at once, in completion order.
//!
//! # Example
//!
//! ```rust
//! use md2docx::{BatchProgressCallback, ConversionConfig};
//! use std::path::Path;
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     completed: AtomicUsize,
//! }
//!
//! impl BatchProgressCallback for CountingCallback {
//!     fn on_file_complete(&self, input: &Path, total_files: usize, docx_bytes: usize) {
//!         let done = self.completed.fetch_add(1, Ordering::SeqCst) + 1;
//!         eprintln!("{}/{} {} ({} bytes)", done, total_files, input.display(), docx_bytes);
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback { completed: AtomicUsize::new(0) });
//!
//! let config = ConversionConfig::builder()
//!     .progress_callback(counter as Arc<dyn BatchProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::path::Path;
use std::sync::Arc;

/// Called by [`crate::convert::convert_batch`] as it processes each file.
///
/// All methods have default no-op implementations so callers only override
/// what they care about.
pub trait BatchProgressCallback: Send + Sync {
    /// Called once before any file is read.
    fn on_batch_start(&self, total_files: usize) {
        let _ = total_files;
    }

    /// Called just before a file is read.
    fn on_file_start(&self, input: &Path, total_files: usize) {
        let _ = (input, total_files);
    }

    /// Called when a file has been converted and written.
    ///
    /// # Arguments
    /// * `input`       — the source text file
    /// * `total_files` — files in the batch
    /// * `docx_bytes`  — size of the written document
    fn on_file_complete(&self, input: &Path, total_files: usize, docx_bytes: usize) {
        let _ = (input, total_files, docx_bytes);
    }

    /// Called when a file fails; the batch carries on.
    fn on_file_error(&self, input: &Path, total_files: usize, error: &str) {
        let _ = (input, total_files, error);
    }

    /// Called once after every file has been attempted.
    fn on_batch_complete(&self, total_files: usize, success_count: usize) {
        let _ = (total_files, success_count);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl BatchProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn BatchProgressCallback>;
