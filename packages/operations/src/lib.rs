//! Concurrent copy runs for listcopy.
//!
//! This crate runs a list of relative paths through a fixed pool of worker
//! threads:
//!
//! * A shared queue hands each file to exactly one worker
//! * Workers retry transient failures a bounded number of times
//! * A single tracker turns completions into progress estimates
//! * A single collector keeps the first error and logs the rest
//! * A [`CancellationToken`] stops the pool at its next blocking point
//!
//! # Example
//!
//! ```rust,ignore
//! use listcopy_operations::{CancellationToken, SilentReporter, run};
//!
//! let cancel = CancellationToken::new();
//! let result = run(&config, &jobs, &cancel, &SilentReporter);
//! println!("{} copied, {} skipped", result.copied, result.skipped);
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod cancel;
mod error;
mod reporter;
mod run;
mod worker;

pub use cancel::CancellationToken;
pub use error::RunError;
pub use listcopy_copy::CopyProgress;
pub use reporter::{Outcome, Reporter, SilentReporter};
pub use run::{RunResult, run, run_with_transfer};
pub use worker::{FileTransfer, Transfer};
