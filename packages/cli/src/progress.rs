//! Progress bar and per-file output for the CLI.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::io::Write;

use colored::Colorize;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use listcopy_operations::{CopyProgress, Outcome, Reporter};

/// Progress bar for a copy run.
///
/// When disabled, progress is printed as plain lines instead.
pub struct ProgressManager {
    bar: ProgressBar,
    enabled: bool,
}

impl ProgressManager {
    /// Create a progress manager for `total` files.
    #[must_use]
    pub fn new(enabled: bool, total: u64) -> Self {
        if !enabled {
            return Self {
                bar: ProgressBar::hidden(),
                enabled,
            };
        }

        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("  [{bar:25.green/dim}] {pos}/{len} files ({percent}%) {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("━━─"),
        );
        Self { bar, enabled }
    }

    /// Show updated progress.
    pub fn update(&self, progress: &CopyProgress) {
        if self.enabled {
            self.bar.set_position(progress.files_done);
            self.bar
                .set_message(format!("~{} remaining", HumanDuration(progress.remaining)));
        } else {
            self.println(&format_progress(progress));
        }
    }

    /// Print a line without disturbing the bar.
    pub fn println(&self, line: &str) {
        if self.enabled {
            self.bar.println(line);
        } else {
            println!("{line}");
            // Flush to ensure output appears immediately
            let _ = std::io::stdout().flush();
        }
    }

    /// Remove the bar (for clean output after completion).
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

/// Plain text progress line.
fn format_progress(progress: &CopyProgress) -> String {
    format!(
        "Progress: {}/{} ({:.1}%), estimated time remaining: {}",
        progress.files_done,
        progress.files_total,
        progress.percentage(),
        HumanDuration(progress.remaining)
    )
}

/// Describe one worker outcome for the terminal.
///
/// Skips and failures get their own glyph and colour so they stand out
/// from plain copies.
fn describe(worker: usize, job: &str, outcome: &Outcome<'_>) -> String {
    match outcome {
        Outcome::Copied => format!("{} Worker {worker}: copied {job}", "✓".green()),
        Outcome::SkippedIdentical => format!(
            "{} Worker {worker}: {}",
            "⚠".yellow(),
            format!("skipped {job}, files are identical").yellow()
        ),
        Outcome::RetryableFailure {
            cause,
            attempt,
            max_attempts,
        } => format!(
            "{} Worker {worker}: error copying {job}, retrying ({attempt}/{max_attempts}): {}",
            "↻".yellow(),
            cause.to_string().dimmed()
        ),
        Outcome::SourceMissing => format!(
            "{} Worker {worker}: {}",
            "✗".red(),
            format!("source file missing {job}").red()
        ),
        Outcome::Exhausted { cause, attempts } => format!(
            "{} Worker {worker}: {} {cause}",
            "✗".red(),
            format!("failed to copy {job} after {attempts} attempts:").red()
        ),
    }
}

/// Reporter that drives the terminal output.
pub struct CliReporter {
    progress: ProgressManager,
}

impl CliReporter {
    /// Create a reporter writing through `progress`.
    #[must_use]
    pub const fn new(progress: ProgressManager) -> Self {
        Self { progress }
    }

    /// Clear the progress bar once the run is over.
    pub fn finish(&self) {
        self.progress.finish();
    }
}

impl Reporter for CliReporter {
    fn on_outcome(&self, worker: usize, job: &str, outcome: &Outcome<'_>) {
        self.progress.println(&describe(worker, job, outcome));
    }

    fn on_progress(&self, progress: &CopyProgress) {
        self.progress.update(progress);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    use listcopy_copy::CopyError;

    #[test]
    fn test_format_progress() {
        let progress = CopyProgress {
            files_total: 10,
            files_done: 3,
            files_copied: 2,
            files_skipped: 1,
            elapsed: Duration::from_secs(3),
            remaining: Duration::from_secs(7),
        };

        let line = format_progress(&progress);

        assert!(line.starts_with("Progress: 3/10 (30.0%), estimated time remaining: "));
    }

    #[test]
    fn test_describe_outcomes() {
        colored::control::set_override(false);

        assert_eq!(
            describe(1, "a.txt", &Outcome::Copied),
            "✓ Worker 1: copied a.txt"
        );
        assert_eq!(
            describe(2, "b.txt", &Outcome::SkippedIdentical),
            "⚠ Worker 2: skipped b.txt, files are identical"
        );
        assert_eq!(
            describe(0, "c.txt", &Outcome::SourceMissing),
            "✗ Worker 0: source file missing c.txt"
        );

        let cause = CopyError::SourceNotFound {
            path: PathBuf::from("d.txt"),
        };
        assert_eq!(
            describe(
                3,
                "d.txt",
                &Outcome::Exhausted {
                    cause: &cause,
                    attempts: 3
                }
            ),
            "✗ Worker 3: failed to copy d.txt after 3 attempts: Source file not found: d.txt"
        );
    }
}
