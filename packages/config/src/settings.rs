//! Layered settings resolution.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;
use crate::types::{DEFAULT_LOG_FILE, FileConfig, RetryPolicy, RunConfig, Settings};

/// Config file picked up from the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "listcopy.toml";

/// Values supplied on the command line or through environment variables.
///
/// These take precedence over anything in the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    /// Explicit config file path.
    pub config_file: Option<PathBuf>,
    /// Root directory files are copied from.
    pub source_dir: Option<PathBuf>,
    /// Root directory files are copied to.
    pub dest_dir: Option<PathBuf>,
    /// Path to the list of files to copy.
    pub files_list: Option<PathBuf>,
    /// Number of concurrent workers.
    pub thread_count: Option<usize>,
    /// Compare by content digest instead of modification time.
    pub verify_hash: Option<bool>,
    /// Attempts per file.
    pub retries: Option<u32>,
    /// Pause between attempts, in milliseconds.
    pub retry_delay_ms: Option<u64>,
    /// Path of the log file.
    pub log_file: Option<PathBuf>,
}

/// Pick the config file to load, if any.
///
/// An explicit path is always returned, even if it does not exist, so that
/// loading it reports the problem. Otherwise `listcopy.toml` in `cwd` is used
/// when present.
#[must_use]
pub fn find_config_file(overrides: &SettingsOverrides, cwd: &Path) -> Option<PathBuf> {
    if let Some(path) = &overrides.config_file {
        return Some(path.clone());
    }

    let candidate = cwd.join(DEFAULT_CONFIG_FILE);
    candidate.is_file().then_some(candidate)
}

/// Merge overrides, file settings and defaults into final settings.
///
/// # Errors
///
/// * [`ConfigError::MissingSettings`] naming every required setting that no
///   layer provided
/// * [`ConfigError::InvalidWorkerCount`] if the worker count is zero
/// * [`ConfigError::InvalidRetryCount`] if the retry count is zero
pub fn resolve_settings(
    overrides: &SettingsOverrides,
    file: &FileConfig,
) -> Result<Settings, ConfigError> {
    let source_dir = overrides.source_dir.clone().or_else(|| file.source_dir.clone());
    let dest_dir = overrides.dest_dir.clone().or_else(|| file.dest_dir.clone());
    let files_list = overrides.files_list.clone().or_else(|| file.files_list.clone());

    let mut missing = Vec::new();
    if source_dir.is_none() {
        missing.push("SOURCE_DIR");
    }
    if dest_dir.is_none() {
        missing.push("DEST_DIR");
    }
    if files_list.is_none() {
        missing.push("FILES_LIST_PATH");
    }

    let (Some(source_dir), Some(dest_dir), Some(files_list)) = (source_dir, dest_dir, files_list)
    else {
        return Err(ConfigError::MissingSettings(missing));
    };

    let worker_count = overrides
        .thread_count
        .or(file.thread_count)
        .unwrap_or_else(num_cpus::get);
    if worker_count == 0 {
        return Err(ConfigError::InvalidWorkerCount);
    }

    let defaults = RetryPolicy::default();
    let max_attempts = overrides
        .retries
        .or(file.retries)
        .unwrap_or(defaults.max_attempts);
    if max_attempts == 0 {
        return Err(ConfigError::InvalidRetryCount);
    }
    let backoff = overrides
        .retry_delay_ms
        .or(file.retry_delay_ms)
        .map_or(defaults.backoff, Duration::from_millis);

    let verify_hash = overrides.verify_hash.or(file.verify_hash).unwrap_or(false);

    let log_file = overrides
        .log_file
        .clone()
        .or_else(|| file.log_file.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    let run = RunConfig::new(source_dir, dest_dir, worker_count, verify_hash).with_retry(
        RetryPolicy {
            max_attempts,
            backoff,
        },
    );

    Ok(Settings {
        run,
        files_list,
        log_file,
    })
}
