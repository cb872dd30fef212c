//! Equality checks between a source file and an existing target.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs::{self, File};
use std::io;
use std::path::Path;

use crate::error::CopyError;

/// How to decide whether an existing target is already up to date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompareMode {
    /// The target is current if its modification time is not older than the source's.
    #[default]
    ModifiedTime,
    /// The target is current if its content digest equals the source's.
    ContentHash,
}

impl CompareMode {
    /// Pick the mode matching a `verify_hash` setting.
    #[must_use]
    pub const fn from_verify_hash(verify_hash: bool) -> Self {
        if verify_hash {
            Self::ContentHash
        } else {
            Self::ModifiedTime
        }
    }
}

/// Check whether `target` can be treated as a copy of `source`.
///
/// Both files are expected to exist.
///
/// # Arguments
///
/// * `source` - Source file path
/// * `target` - Existing target file path
/// * `mode` - Comparison strategy
///
/// # Errors
///
/// * If either file cannot be stat'd or read. An unreadable file is never
///   reported as "different".
pub fn files_match(source: &Path, target: &Path, mode: CompareMode) -> Result<bool, CopyError> {
    let result = match mode {
        CompareMode::ModifiedTime => target_is_newer(source, target),
        CompareMode::ContentHash => contents_equal(source, target),
    };

    result.map_err(|e| CopyError::CompareError {
        source_path: source.to_path_buf(),
        target_path: target.to_path_buf(),
        io_error: e,
    })
}

/// Compute the BLAKE3 digest of a file's full contents.
///
/// # Errors
///
/// * If the file cannot be opened or read
pub fn file_digest(path: &Path) -> io::Result<blake3::Hash> {
    let mut file = File::open(path)?;
    let mut hasher = blake3::Hasher::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(hasher.finalize())
}

fn target_is_newer(source: &Path, target: &Path) -> io::Result<bool> {
    let source_mtime = fs::metadata(source)?.modified()?;
    let target_mtime = fs::metadata(target)?.modified()?;
    Ok(target_mtime >= source_mtime)
}

fn contents_equal(source: &Path, target: &Path) -> io::Result<bool> {
    if fs::metadata(source)?.len() != fs::metadata(target)?.len() {
        return Ok(false);
    }

    let source_digest = file_digest(source)?;
    let target_digest = file_digest(target)?;
    log::trace!(
        "Digests {} / {} for {} and {}",
        source_digest.to_hex(),
        target_digest.to_hex(),
        source.display(),
        target.display()
    );

    Ok(source_digest == target_digest)
}
