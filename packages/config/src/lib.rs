//! Configuration loading for listcopy.
//!
//! This crate resolves the settings for a copy run and reads the list of
//! files to copy.
//!
//! # Settings Sources
//!
//! Highest precedence first:
//!
//! * Command line flags and their environment variables (`SOURCE_DIR`,
//!   `DEST_DIR`, `FILES_LIST_PATH`, `THREAD_COUNT`, ...)
//! * A `.env` file in the working directory, loaded into the environment
//!   before flags are parsed
//! * A TOML file (`--config`, or `listcopy.toml` in the working directory)
//! * Built-in defaults
//!
//! # Example
//!
//! ```rust,ignore
//! use listcopy_config::{SettingsOverrides, load_settings, read_files_list};
//!
//! let settings = load_settings(&overrides, &std::env::current_dir()?)?;
//! let jobs = read_files_list(&settings.files_list)?;
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod dotenv;
mod error;
mod filelist;
mod settings;
mod toml_loader;
mod types;

pub use dotenv::{DOTENV_FILE, load_dotenv};
pub use error::ConfigError;
pub use filelist::read_files_list;
pub use settings::{DEFAULT_CONFIG_FILE, SettingsOverrides, find_config_file, resolve_settings};
pub use toml_loader::load_toml_config;
pub use types::{
    DEFAULT_LOG_FILE, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY, FileConfig, RetryPolicy,
    RunConfig, Settings,
};

use std::path::Path;

/// Resolve settings, loading a config file if one is selected.
///
/// # Arguments
///
/// * `overrides` - Values from the command line and environment
/// * `cwd` - Directory searched for `listcopy.toml`
///
/// # Errors
///
/// * If the selected config file cannot be read or parsed
/// * If required settings are missing or invalid
pub fn load_settings(overrides: &SettingsOverrides, cwd: &Path) -> Result<Settings, ConfigError> {
    let file = match find_config_file(overrides, cwd) {
        Some(path) => load_toml_config(&path)?,
        None => FileConfig::default(),
    };

    resolve_settings(overrides, &file)
}
