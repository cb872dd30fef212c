//! Single file transfer with metadata preservation.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs::{self, File, Metadata};
use std::io;
use std::path::Path;

use filetime::FileTime;

use crate::compare::{CompareMode, files_match};
use crate::error::CopyError;

/// Result of a successful transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOutcome {
    /// Contents and metadata were written to the target.
    Copied,
    /// The target already matched the source and was left untouched.
    SkippedIdentical,
}

/// Transfer one file from `source` to `target`.
///
/// Parent directories of the target are created as needed. If the target
/// already exists it is compared against the source using `mode` and left
/// alone when it matches. Otherwise the contents are copied, followed by
/// the permission bits and the access/modification times.
///
/// # Arguments
///
/// * `source` - Source file path
/// * `target` - Target file path
/// * `mode` - How to decide whether an existing target is current
///
/// # Errors
///
/// * [`CopyError::SourceNotFound`] if the source does not exist
/// * If the target directory cannot be created
/// * If the comparison, the content copy, or applying metadata fails. The
///   target may be left partially written in that case.
pub fn transfer_file(
    source: &Path,
    target: &Path,
    mode: CompareMode,
) -> Result<TransferOutcome, CopyError> {
    log::debug!(
        "Transferring file: {} -> {}",
        source.display(),
        target.display()
    );

    let metadata = match fs::metadata(source) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(CopyError::SourceNotFound {
                path: source.to_path_buf(),
            });
        }
        Err(e) => {
            return Err(CopyError::MetadataError {
                path: source.to_path_buf(),
                io_error: e,
            });
        }
    };

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| CopyError::CreateDirError {
            path: parent.to_path_buf(),
            io_error: e,
        })?;
    }

    let target_exists = target.try_exists().map_err(|e| CopyError::MetadataError {
        path: target.to_path_buf(),
        io_error: e,
    })?;

    if target_exists && files_match(source, target, mode)? {
        log::info!("Skipping {}: target is up to date", target.display());
        return Ok(TransferOutcome::SkippedIdentical);
    }

    copy_contents(source, target, target_exists)?;
    apply_metadata(&metadata, target)?;

    Ok(TransferOutcome::Copied)
}

/// Copy file contents, trying reflink first for fresh targets.
fn copy_contents(source: &Path, target: &Path, target_exists: bool) -> Result<(), CopyError> {
    // reflink refuses to replace an existing file
    if !target_exists && reflink_copy::reflink(source, target).is_ok() {
        log::trace!("Reflinked {} -> {}", source.display(), target.display());
        return Ok(());
    }

    let copy_error = |e: io::Error| CopyError::FileCopyError {
        source_path: source.to_path_buf(),
        target_path: target.to_path_buf(),
        io_error: e,
    };

    let mut reader = File::open(source).map_err(copy_error)?;
    let mut writer = File::create(target).map_err(copy_error)?;
    let bytes = io::copy(&mut reader, &mut writer).map_err(copy_error)?;

    log::trace!(
        "Copied {bytes} bytes {} -> {}",
        source.display(),
        target.display()
    );

    Ok(())
}

/// Apply the source's permission bits and timestamps to the target.
fn apply_metadata(metadata: &Metadata, target: &Path) -> Result<(), CopyError> {
    fs::set_permissions(target, metadata.permissions()).map_err(|e| {
        CopyError::PermissionsError {
            path: target.to_path_buf(),
            io_error: e,
        }
    })?;

    let atime = FileTime::from_last_access_time(metadata);
    let mtime = FileTime::from_last_modification_time(metadata);
    filetime::set_file_times(target, atime, mtime).map_err(|e| CopyError::TimestampsError {
        path: target.to_path_buf(),
        io_error: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn mtime(path: &Path) -> FileTime {
        FileTime::from_last_modification_time(&fs::metadata(path).unwrap())
    }

    #[test]
    fn test_transfer_creates_new_with_metadata() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source.txt");
        let target = dir.path().join("out/nested/target.txt");

        fs::write(&source, "hello world").unwrap();
        let atime = FileTime::from_unix_time(1_600_000_000, 0);
        let source_mtime = FileTime::from_unix_time(1_650_000_000, 0);
        filetime::set_file_times(&source, atime, source_mtime).unwrap();

        let result = transfer_file(&source, &target, CompareMode::ContentHash).unwrap();

        assert_eq!(result, TransferOutcome::Copied);
        // check atime before reading the target back
        assert_eq!(
            FileTime::from_last_access_time(&fs::metadata(&target).unwrap()),
            atime
        );
        assert_eq!(mtime(&target), source_mtime);
        assert_eq!(fs::read_to_string(&target).unwrap(), "hello world");
    }

    #[cfg(unix)]
    #[test]
    fn test_transfer_copies_permission_bits() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let source = dir.path().join("script.sh");
        let target = dir.path().join("copy/script.sh");

        fs::write(&source, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&source, fs::Permissions::from_mode(0o750)).unwrap();

        transfer_file(&source, &target, CompareMode::ModifiedTime).unwrap();

        let mode = fs::metadata(&target).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o750);
    }

    #[test]
    fn test_transfer_skips_identical_content() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source.txt");
        let target = dir.path().join("target.txt");

        fs::write(&source, "identical").unwrap();
        fs::write(&target, "identical").unwrap();
        let before = FileTime::from_unix_time(1_000_000, 0);
        filetime::set_file_mtime(&target, before).unwrap();

        let result = transfer_file(&source, &target, CompareMode::ContentHash).unwrap();

        assert_eq!(result, TransferOutcome::SkippedIdentical);
        assert_eq!(mtime(&target), before);
        assert_eq!(fs::read_to_string(&target).unwrap(), "identical");
    }

    #[test]
    fn test_transfer_overwrites_stale_target() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source.txt");
        let target = dir.path().join("target.txt");

        fs::write(&source, "new content").unwrap();
        fs::write(&target, "old content, and longer").unwrap();

        let result = transfer_file(&source, &target, CompareMode::ContentHash).unwrap();

        assert_eq!(result, TransferOutcome::Copied);
        assert_eq!(fs::read_to_string(&target).unwrap(), "new content");
    }

    #[test]
    fn test_transfer_mtime_mode_skips_newer_target() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source.txt");
        let target = dir.path().join("target.txt");

        fs::write(&source, "source content").unwrap();
        fs::write(&target, "target content").unwrap();
        filetime::set_file_mtime(&source, FileTime::from_unix_time(1_000_000, 0)).unwrap();
        filetime::set_file_mtime(&target, FileTime::from_unix_time(2_000_000, 0)).unwrap();

        let result = transfer_file(&source, &target, CompareMode::ModifiedTime).unwrap();

        assert_eq!(result, TransferOutcome::SkippedIdentical);
        assert_eq!(fs::read_to_string(&target).unwrap(), "target content");
    }

    #[test]
    fn test_transfer_source_not_found() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("nonexistent.txt");
        let target = dir.path().join("target.txt");

        let err = transfer_file(&source, &target, CompareMode::ContentHash).unwrap_err();

        assert!(matches!(err, CopyError::SourceNotFound { .. }));
        assert!(!err.is_retryable());
        assert!(!target.exists());
    }

    #[test]
    fn test_transfer_twice_skips_second_time() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source.txt");
        let target = dir.path().join("target.txt");
        fs::write(&source, "content").unwrap();

        let first = transfer_file(&source, &target, CompareMode::ContentHash).unwrap();
        let second = transfer_file(&source, &target, CompareMode::ContentHash).unwrap();

        assert_eq!(first, TransferOutcome::Copied);
        assert_eq!(second, TransferOutcome::SkippedIdentical);
    }
}
