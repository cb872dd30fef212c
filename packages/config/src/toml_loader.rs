//! TOML configuration file loader.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::types::FileConfig;

/// Load a TOML configuration file.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Errors
///
/// * If the file cannot be read
/// * If the file cannot be parsed as TOML
pub fn load_toml_config(path: &Path) -> Result<FileConfig, ConfigError> {
    log::debug!("Loading TOML config from {}", path.display());

    let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config: FileConfig = toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    log::debug!("Loaded config: {config:?}");

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_toml_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
sourceDir = "/mnt/source"
destDir = "/mnt/backup"
filesList = "files.txt"
threadCount = 8
verifyHash = true
retries = 5
retryDelayMs = 250
logFile = "run.log"
"#
        )
        .unwrap();

        let config = load_toml_config(file.path()).unwrap();

        assert_eq!(config.source_dir, Some(PathBuf::from("/mnt/source")));
        assert_eq!(config.dest_dir, Some(PathBuf::from("/mnt/backup")));
        assert_eq!(config.files_list, Some(PathBuf::from("files.txt")));
        assert_eq!(config.thread_count, Some(8));
        assert_eq!(config.verify_hash, Some(true));
        assert_eq!(config.retries, Some(5));
        assert_eq!(config.retry_delay_ms, Some(250));
        assert_eq!(config.log_file, Some(PathBuf::from("run.log")));
    }

    #[test]
    fn test_load_minimal_toml_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"sourceDir = "/src""#).unwrap();

        let config = load_toml_config(file.path()).unwrap();

        assert_eq!(config.source_dir, Some(PathBuf::from("/src")));
        assert!(config.dest_dir.is_none());
        assert!(config.thread_count.is_none());
    }

    #[test]
    fn test_load_invalid_toml_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "threadCount = \"many\"").unwrap();

        let err = load_toml_config(file.path()).unwrap_err();

        assert!(matches!(err, ConfigError::TomlParseError { .. }));
    }
}
