//! Configuration types for listcopy.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use path_clean::PathClean;
use serde::{Deserialize, Serialize};

/// Default number of attempts per file.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default pause between attempts.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Default log file path.
pub const DEFAULT_LOG_FILE: &str = "copy.log";

/// Settings as they appear in a `listcopy.toml` file.
///
/// Every field is optional; missing values are filled in from the
/// command line, the environment, or built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileConfig {
    /// Root directory files are copied from.
    #[serde(default)]
    pub source_dir: Option<PathBuf>,

    /// Root directory files are copied to.
    #[serde(default)]
    pub dest_dir: Option<PathBuf>,

    /// Path to the list of files to copy.
    #[serde(default)]
    pub files_list: Option<PathBuf>,

    /// Number of concurrent workers.
    #[serde(default)]
    pub thread_count: Option<usize>,

    /// Compare existing targets by content digest instead of modification time.
    #[serde(default)]
    pub verify_hash: Option<bool>,

    /// Attempts per file before giving up.
    #[serde(default)]
    pub retries: Option<u32>,

    /// Pause between attempts, in milliseconds.
    #[serde(default)]
    pub retry_delay_ms: Option<u64>,

    /// Path of the log file.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

/// Bounded, fixed-interval retry behaviour for a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Fixed pause between attempts.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff: DEFAULT_RETRY_DELAY,
        }
    }
}

/// Everything a copy run needs. Immutable for the duration of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Root directory files are copied from.
    pub source_root: PathBuf,
    /// Root directory files are copied to.
    pub dest_root: PathBuf,
    /// Number of concurrent workers (at least one).
    pub worker_count: usize,
    /// Compare existing targets by content digest instead of modification time.
    pub verify_hash: bool,
    /// Per-file retry behaviour.
    pub retry: RetryPolicy,
}

impl RunConfig {
    /// Create a run configuration with the default retry policy.
    #[must_use]
    pub fn new(
        source_root: impl Into<PathBuf>,
        dest_root: impl Into<PathBuf>,
        worker_count: usize,
        verify_hash: bool,
    ) -> Self {
        Self {
            source_root: source_root.into(),
            dest_root: dest_root.into(),
            worker_count,
            verify_hash,
            retry: RetryPolicy::default(),
        }
    }

    /// Replace the retry policy.
    #[must_use]
    pub const fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Absolute source path for a relative job path.
    #[must_use]
    pub fn source_path(&self, job: &str) -> PathBuf {
        join_clean(&self.source_root, job)
    }

    /// Absolute destination path for a relative job path.
    #[must_use]
    pub fn dest_path(&self, job: &str) -> PathBuf {
        join_clean(&self.dest_root, job)
    }
}

/// Join `job` under `root`; a leading `/` or drive prefix on `job` is dropped.
fn join_clean(root: &Path, job: &str) -> PathBuf {
    let relative: PathBuf = Path::new(job)
        .components()
        .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
        .collect();
    root.join(relative).clean()
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// The copy run configuration.
    pub run: RunConfig,
    /// Path to the list of files to copy.
    pub files_list: PathBuf,
    /// Path of the append-only log file.
    pub log_file: PathBuf,
}
