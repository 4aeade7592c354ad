//! Simplified Progress Reporting API
//!
//! This module provides a minimal API for the core library to report progress
//! and output messages without direct dependencies on CLI-specific formatting.
//! A consumer installs a [`ProgressReporter`] once; when none is installed all
//! calls are no-ops.

use std::sync::{LazyLock, Mutex};

/// Represents different levels of output for structured reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputLevel {
    /// Processing steps (» Processing)
    Processing,
    /// Success messages (✓ Success)
    Success,
    /// Error messages
    Error,
    /// Warning messages
    Warning,
    /// General information
    Info,
}

/// A simplified trait for progress reporting
pub trait ProgressReporter: Send + Sync {
    /// Output a message at a specific level
    fn output(&self, level: OutputLevel, text: &str);

    /// Output a key-value status pair
    fn output_status(&self, label: &str, value: &str, highlight: bool);

    /// Report sampling progress for the current variant
    fn sample_progress(&self, completed: usize, total: usize);

    /// Finish any active progress bar, leaving it visible
    fn finish_progress(&self);

    /// Clear any active progress bar
    fn clear_progress(&self);
}

/// Global progress reporter instance
static PROGRESS_REPORTER: LazyLock<Mutex<Option<Box<dyn ProgressReporter>>>> =
    LazyLock::new(|| Mutex::new(None));

/// Set the global progress reporter
pub fn set_progress_reporter(reporter: Box<dyn ProgressReporter>) {
    if let Ok(mut r) = PROGRESS_REPORTER.lock() {
        *r = Some(reporter);
    }
}

/// Remove the global progress reporter
pub fn clear_progress_reporter() {
    if let Ok(mut r) = PROGRESS_REPORTER.lock() {
        *r = None;
    }
}

/// Execute a function with the progress reporter if available
#[inline]
pub fn with_reporter<F>(f: F)
where
    F: FnOnce(&dyn ProgressReporter),
{
    if let Ok(guard) = PROGRESS_REPORTER.lock() {
        if let Some(reporter) = guard.as_ref() {
            f(reporter.as_ref());
        }
    }
}

/// Output a processing step
pub fn processing(message: &str) {
    with_reporter(|r| r.output(OutputLevel::Processing, message));
}

/// Output a status line
pub fn status(label: &str, value: &str, highlight: bool) {
    with_reporter(|r| r.output_status(label, value, highlight));
}

/// Output a success message
pub fn success(message: &str) {
    with_reporter(|r| r.output(OutputLevel::Success, message));
}

/// Output an error message
pub fn error(message: &str) {
    with_reporter(|r| r.output(OutputLevel::Error, message));
}

/// Output a warning message
pub fn warning(message: &str) {
    with_reporter(|r| r.output(OutputLevel::Warning, message));
}

/// Output general information
pub fn info(message: &str) {
    with_reporter(|r| r.output(OutputLevel::Info, message));
}

/// Report sampling progress
pub fn sample_progress(completed: usize, total: usize) {
    with_reporter(|r| r.sample_progress(completed, total));
}

/// Finish progress bar
pub fn finish_progress() {
    with_reporter(|r| r.finish_progress());
}

/// Clear progress bar
pub fn clear_progress() {
    with_reporter(|r| r.clear_progress());
}
