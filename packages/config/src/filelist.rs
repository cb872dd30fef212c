//! Reading the list of files to copy.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::ConfigError;

/// Read a files list: one relative path per line.
///
/// Lines are trimmed and blank lines dropped. Everything else, including
/// lines starting with `#`, is taken literally as a path.
///
/// # Errors
///
/// * If the file cannot be opened or read
pub fn read_files_list(path: &Path) -> Result<Vec<String>, ConfigError> {
    let map_err = |e| ConfigError::FileListReadError {
        path: path.to_path_buf(),
        source: e,
    };

    let reader = BufReader::new(File::open(path).map_err(map_err)?);

    let mut files = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(map_err)?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            files.push(trimmed.to_string());
        }
    }

    log::debug!("Read {} entries from {}", files.len(), path.display());

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_files_list() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "file1.txt\n  file2.txt  \n\n# Comment\n\t\ndir/file3.txt\n"
        )
        .unwrap();

        let files = read_files_list(file.path()).unwrap();

        assert_eq!(
            files,
            vec!["file1.txt", "file2.txt", "# Comment", "dir/file3.txt"]
        );
    }

    #[test]
    fn test_read_files_list_without_trailing_newline() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "only.txt").unwrap();

        assert_eq!(read_files_list(file.path()).unwrap(), vec!["only.txt"]);
    }

    #[test]
    fn test_read_files_list_not_found() {
        let err = read_files_list(Path::new("/nonexistent/files.txt")).unwrap_err();
        assert!(matches!(err, ConfigError::FileListReadError { .. }));
    }
}
