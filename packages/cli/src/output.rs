//! Terminal output formatting.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use colored::Colorize;
use indicatif::HumanDuration;
use listcopy_config::RunConfig;
use listcopy_operations::RunResult;

/// Print a header message.
pub fn print_header(message: &str) {
    println!("\n{} {}\n", "📦", message.bold());
}

/// Print what is about to be copied.
pub fn print_run_info(config: &RunConfig, file_count: usize) {
    println!("Source:      {}", config.source_root.display().to_string().cyan());
    println!("Destination: {}", config.dest_root.display().to_string().cyan());
    println!(
        "Copying {} file{} with {} worker{}, comparing by {}",
        file_count,
        if file_count == 1 { "" } else { "s" },
        config.worker_count,
        if config.worker_count == 1 { "" } else { "s" },
        if config.verify_hash {
            "content hash"
        } else {
            "modification time"
        }
    );
    println!();
}

/// Print the final counts of a run.
pub fn print_summary(result: &RunResult) {
    println!();
    println!(
        "{} copied, {} skipped, {} failed of {} in {}",
        result.copied.to_string().green(),
        result.skipped.to_string().yellow(),
        if result.failed == 0 {
            result.failed.to_string().dimmed()
        } else {
            result.failed.to_string().red()
        },
        result.total,
        HumanDuration(result.elapsed)
    );
}

/// Print success message.
pub fn print_success() {
    println!("{} Copy complete!", "✅");
}

/// Print error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "Warning:".yellow().bold(), message);
}
