//! Observing a run as it happens.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use listcopy_copy::{CopyError, CopyProgress};

/// What happened to one attempt at one file.
#[derive(Debug, Clone, Copy)]
pub enum Outcome<'a> {
    /// Contents and metadata were written.
    Copied,
    /// The target already matched the source.
    SkippedIdentical,
    /// The attempt failed and the file will be tried again.
    RetryableFailure {
        /// Why the attempt failed.
        cause: &'a CopyError,
        /// Attempts made so far.
        attempt: u32,
        /// Attempt ceiling.
        max_attempts: u32,
    },
    /// The source does not exist; the file is abandoned.
    SourceMissing,
    /// The retry ceiling was reached; the file is abandoned.
    Exhausted {
        /// Why the last attempt failed.
        cause: &'a CopyError,
        /// Attempts made.
        attempts: u32,
    },
}

impl Outcome<'_> {
    /// Whether this outcome counts toward progress.
    #[must_use]
    pub const fn is_progress(&self) -> bool {
        matches!(self, Self::Copied | Self::SkippedIdentical)
    }
}

/// Receives run events.
///
/// `on_outcome` is called from worker threads, `on_progress` from the
/// progress tracker thread. Both default to doing nothing.
pub trait Reporter: Send + Sync {
    /// A worker finished an attempt at `job`.
    fn on_outcome(&self, _worker: usize, _job: &str, _outcome: &Outcome<'_>) {}

    /// Another file was disposed of.
    fn on_progress(&self, _progress: &CopyProgress) {}
}

/// A reporter that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {}
