//! listcopy CLI entry point.
//!
//! Copies the files named in a list from a source tree to a destination
//! tree using a pool of parallel workers.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod args;
mod logging;
mod output;
mod progress;
mod signals;

use std::env;

use clap::Parser;

use args::Args;
use listcopy_config::{load_dotenv, load_settings, read_files_list};
use listcopy_operations::{CancellationToken, RunError};
use progress::{CliReporter, ProgressManager};
use signals::EXIT_INTERRUPTED;

/// Exit status for configuration errors and failed files.
const EXIT_FAILURE: i32 = 1;

fn main() {
    // .env feeds the environment fallbacks of the flags
    if let Err(e) = load_environment() {
        output::print_error(&e.to_string());
        std::process::exit(EXIT_FAILURE);
    }

    let args = Args::parse();

    // Before any other thread exists, so every thread inherits the signal mask
    let cancel = CancellationToken::new();
    if let Err(e) = signals::install(cancel.clone()) {
        output::print_warning(&format!("Interrupt handling unavailable: {e}"));
    }

    let code = match run(&args, &cancel) {
        Ok(code) => code,
        Err(e) => {
            output::print_error(&e.to_string());
            EXIT_FAILURE
        }
    };

    log::logger().flush();
    std::process::exit(code);
}

/// Load `.env` from the working directory, if present.
fn load_environment() -> Result<(), Box<dyn std::error::Error>> {
    let cwd = env::current_dir()?;
    load_dotenv(&cwd)?;
    Ok(())
}

/// Main application logic. Returns the process exit status.
fn run(args: &Args, cancel: &CancellationToken) -> Result<i32, Box<dyn std::error::Error>> {
    let cwd = env::current_dir()?;
    let settings = load_settings(&args.overrides(), &cwd)?;

    logging::init(&settings.log_file, args.verbose)?;

    let jobs = read_files_list(&settings.files_list)?;

    output::print_header("List Copy");
    output::print_run_info(&settings.run, jobs.len());

    let reporter = CliReporter::new(ProgressManager::new(
        args.should_show_progress(),
        jobs.len() as u64,
    ));

    let result = listcopy_operations::run(&settings.run, &jobs, cancel, &reporter);

    reporter.finish();
    output::print_summary(&result);

    match &result.error {
        None => {
            output::print_success();
            Ok(0)
        }
        Some(RunError::Interrupted) => {
            output::print_warning("Copy interrupted before completion");
            Ok(EXIT_INTERRUPTED)
        }
        Some(err) => {
            output::print_error(&format!("Copy failed: {err}"));
            Ok(EXIT_FAILURE)
        }
    }
}
