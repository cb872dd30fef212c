//! Error types for copy runs.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use listcopy_copy::CopyError;
use thiserror::Error;

/// Errors surfaced by a copy run.
///
/// The per-file variants are reported by workers; only the first one
/// observed becomes the run's error.
#[derive(Debug, Error)]
pub enum RunError {
    /// The source file does not exist. Never retried.
    #[error("Worker {worker}: source file missing {}", path.display())]
    SourceMissing {
        /// Worker that claimed the file.
        worker: usize,
        /// Absolute source path.
        path: PathBuf,
    },

    /// Every attempt to copy the file failed.
    #[error("Worker {worker}: failed to copy {} after {attempts} attempts: {source}", path.display())]
    RetryExhausted {
        /// Worker that claimed the file.
        worker: usize,
        /// Absolute source path.
        path: PathBuf,
        /// Number of attempts made.
        attempts: u32,
        /// The error from the last attempt.
        #[source]
        source: CopyError,
    },

    /// The run was cancelled before it completed.
    #[error("Copy interrupted before completion")]
    Interrupted,
}

impl RunError {
    /// Whether this error reports a cancelled run rather than a file failure.
    #[must_use]
    pub const fn is_interrupted(&self) -> bool {
        matches!(self, Self::Interrupted)
    }
}
