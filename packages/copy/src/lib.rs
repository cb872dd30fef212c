//! Single file transfer with skip detection and progress tracking.
//!
//! This crate provides the per-file building blocks of a list copy:
//!
//! * Equality checks between a source and an existing target, either by
//!   modification time or by BLAKE3 content digest
//! * Transfer of one file's contents, permission bits and timestamps,
//!   using `reflink-copy` when the target is new
//! * A progress tracker with linear time-remaining estimates
//!
//! # Example
//!
//! ```rust,ignore
//! use listcopy_copy::{CompareMode, TransferOutcome, transfer_file};
//!
//! match transfer_file(source, target, CompareMode::ContentHash)? {
//!     TransferOutcome::Copied => println!("copied"),
//!     TransferOutcome::SkippedIdentical => println!("already up to date"),
//! }
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod compare;
mod copy;
mod error;
mod progress;

pub use compare::{CompareMode, file_digest, files_match};
pub use copy::{TransferOutcome, transfer_file};
pub use error::CopyError;
pub use progress::{CopyProgress, ProgressTracker, estimate_remaining};
