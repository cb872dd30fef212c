//! Loading environment variables from a `.env` file.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::io;
use std::path::Path;

use crate::error::ConfigError;

/// Environment file read from the working directory.
pub const DOTENV_FILE: &str = ".env";

/// Load `.env` from `dir` into the process environment.
///
/// Variables already set in the environment are left untouched. Returns
/// `false` if there is no `.env` file.
///
/// Must run before any other thread is spawned.
///
/// # Errors
///
/// * If the file exists but cannot be read or parsed
pub fn load_dotenv(dir: &Path) -> Result<bool, ConfigError> {
    let path = dir.join(DOTENV_FILE);

    match dotenvy::from_path(&path) {
        Ok(()) => {
            log::debug!("Loaded environment from {}", path.display());
            Ok(true)
        }
        Err(dotenvy::Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(ConfigError::DotenvError { path, source }),
    }
}
