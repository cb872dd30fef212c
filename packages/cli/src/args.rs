//! CLI argument definitions.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use clap::Parser;
use clap::builder::BoolishValueParser;
use listcopy_config::SettingsOverrides;

/// CLI arguments for listcopy.
///
/// Every setting can also come from an environment variable or from a
/// `listcopy.toml` file; flags win over both.
#[derive(Debug, Parser)]
#[command(
    name = "listcopy",
    about = "Copy a list of files between directory trees using parallel workers",
    version
)]
pub struct Args {
    /// File listing the paths to copy, one per line, relative to the source.
    #[arg(index = 1, env = "FILES_LIST_PATH")]
    pub files_list: Option<PathBuf>,

    /// Source root directory.
    #[arg(long, short = 's', env = "SOURCE_DIR")]
    pub source: Option<PathBuf>,

    /// Destination root directory.
    #[arg(long, short = 'd', env = "DEST_DIR")]
    pub dest: Option<PathBuf>,

    /// Number of concurrent copy workers (defaults to the CPU count).
    #[arg(long, short = 'j', env = "THREAD_COUNT")]
    pub threads: Option<usize>,

    /// Compare existing files by content hash instead of modification time.
    ///
    /// Accepts an optional value, so `--verify-hash=false` or `VERIFY_HASH=false`
    /// turns off a `verifyHash = true` from the config file.
    #[arg(
        long,
        env = "VERIFY_HASH",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub verify_hash: Option<bool>,

    /// Attempts per file before giving up.
    #[arg(long, env = "RETRY_COUNT")]
    pub retries: Option<u32>,

    /// Pause between attempts, in milliseconds.
    #[arg(long, env = "RETRY_DELAY_MS")]
    pub retry_delay_ms: Option<u64>,

    /// Append log output to this file (default: copy.log).
    #[arg(long, env = "LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Settings file to load (default: listcopy.toml if present).
    #[arg(long = "config", short = 'c', env = "LISTCOPY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable progress bars (useful for CI environments).
    #[arg(long = "no-progress")]
    pub no_progress: bool,

    /// Enable verbose output.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Args {
    /// Settings supplied by flags and environment variables.
    #[must_use]
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            config_file: self.config.clone(),
            source_dir: self.source.clone(),
            dest_dir: self.dest.clone(),
            files_list: self.files_list.clone(),
            thread_count: self.threads,
            verify_hash: self.verify_hash,
            retries: self.retries,
            retry_delay_ms: self.retry_delay_ms,
            log_file: self.log_file.clone(),
        }
    }

    /// Determine if we should show progress bars.
    #[must_use]
    pub fn should_show_progress(&self) -> bool {
        !self.no_progress && console::Term::stdout().is_term()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_command_line() {
        let args = Args::try_parse_from([
            "listcopy",
            "files.txt",
            "--source",
            "/src",
            "--dest",
            "/dst",
            "-j",
            "8",
            "--verify-hash",
            "--retries",
            "5",
        ])
        .unwrap();

        let overrides = args.overrides();
        assert_eq!(overrides.files_list, Some(PathBuf::from("files.txt")));
        assert_eq!(overrides.source_dir, Some(PathBuf::from("/src")));
        assert_eq!(overrides.dest_dir, Some(PathBuf::from("/dst")));
        assert_eq!(overrides.thread_count, Some(8));
        assert_eq!(overrides.verify_hash, Some(true));
        assert_eq!(overrides.retries, Some(5));
    }

    #[test]
    fn test_verify_hash_is_tri_state() {
        let args = Args::try_parse_from(["listcopy", "files.txt"]).unwrap();
        assert_eq!(args.overrides().verify_hash, None);

        let args = Args::try_parse_from(["listcopy", "--verify-hash=false", "files.txt"]).unwrap();
        assert_eq!(args.overrides().verify_hash, Some(false));

        let args = Args::try_parse_from(["listcopy", "--verify-hash", "files.txt"]).unwrap();
        assert_eq!(args.overrides().verify_hash, Some(true));
        assert_eq!(args.files_list, Some(PathBuf::from("files.txt")));
    }

    #[test]
    fn test_negative_thread_count_rejected() {
        let result = Args::try_parse_from(["listcopy", "files.txt", "--threads", "-1"]);
        assert!(result.is_err());
    }
}
