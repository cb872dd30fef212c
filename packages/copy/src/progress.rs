//! Progress tracking for copy runs.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::time::{Duration, Instant};

use crate::copy::TransferOutcome;

/// Progress information for a copy run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyProgress {
    /// Total number of files in the run.
    pub files_total: u64,
    /// Number of files disposed of so far (copied or skipped).
    pub files_done: u64,
    /// Number of files actually copied.
    pub files_copied: u64,
    /// Number of files skipped because the target was current.
    pub files_skipped: u64,
    /// Time since the run started.
    pub elapsed: Duration,
    /// Estimated time until every file is disposed of.
    pub remaining: Duration,
}

impl CopyProgress {
    /// Calculate progress as a percentage (0.0 to 100.0).
    #[must_use]
    pub fn percentage(&self) -> f64 {
        if self.files_total == 0 {
            100.0
        } else {
            (self.files_done as f64 / self.files_total as f64) * 100.0
        }
    }
}

/// Linear extrapolation of the time left: `elapsed / done * (total - done)`.
///
/// Returns zero until at least one file is done.
#[must_use]
pub fn estimate_remaining(elapsed: Duration, done: u64, total: u64) -> Duration {
    if done == 0 {
        return Duration::ZERO;
    }
    let left = total.saturating_sub(done);
    elapsed.mul_f64(left as f64 / done as f64)
}

/// Running tally of disposed files for a single run.
///
/// Owned by one consumer; feed it one outcome per disposed file.
#[derive(Debug)]
pub struct ProgressTracker {
    files_total: u64,
    files_copied: u64,
    files_skipped: u64,
    started: Instant,
}

impl ProgressTracker {
    /// Create a tracker for `files_total` files, starting the clock now.
    #[must_use]
    pub fn new(files_total: u64) -> Self {
        Self::started_at(files_total, Instant::now())
    }

    /// Create a tracker whose clock started at `started`.
    #[must_use]
    pub const fn started_at(files_total: u64, started: Instant) -> Self {
        Self {
            files_total,
            files_copied: 0,
            files_skipped: 0,
            started,
        }
    }

    /// Record one disposed file and return the updated progress.
    pub fn record(&mut self, outcome: TransferOutcome) -> CopyProgress {
        match outcome {
            TransferOutcome::Copied => self.files_copied += 1,
            TransferOutcome::SkippedIdentical => self.files_skipped += 1,
        }
        self.snapshot()
    }

    /// Number of files disposed of so far.
    #[must_use]
    pub const fn done(&self) -> u64 {
        self.files_copied + self.files_skipped
    }

    /// Get a progress snapshot.
    #[must_use]
    pub fn snapshot(&self) -> CopyProgress {
        let elapsed = self.started.elapsed();
        let done = self.done();
        CopyProgress {
            files_total: self.files_total,
            files_done: done,
            files_copied: self.files_copied,
            files_skipped: self.files_skipped,
            elapsed,
            remaining: estimate_remaining(elapsed, done, self.files_total),
        }
    }
}
