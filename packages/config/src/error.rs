//! Error types for configuration loading.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while resolving settings or reading the file list.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file {}: {source}", path.display())]
    ReadError {
        /// Path to the file that couldn't be read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML configuration.
    #[error("Failed to parse TOML config {}: {source}", path.display())]
    TomlParseError {
        /// Path to the file that couldn't be parsed.
        path: PathBuf,
        /// The underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// Required settings were not provided by any source.
    #[error("Missing required settings: {}", .0.join(", "))]
    MissingSettings(Vec<&'static str>),

    /// The worker count must be at least one.
    #[error("THREAD_COUNT must be a positive integer")]
    InvalidWorkerCount,

    /// The retry ceiling must allow at least one attempt.
    #[error("RETRY_COUNT must be a positive integer")]
    InvalidRetryCount,

    /// Failed to load a `.env` file.
    #[error("Failed to load environment file {}: {source}", path.display())]
    DotenvError {
        /// Path to the `.env` file.
        path: PathBuf,
        /// The underlying dotenv error.
        #[source]
        source: dotenvy::Error,
    },

    /// Failed to read the list of files to copy.
    #[error("Failed to read files list {}: {source}", path.display())]
    FileListReadError {
        /// Path to the files list.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}
