//! Console plus log file output for the `log` facade.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::env;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use log::{LevelFilter, Log, Metadata, Record};

/// Sends every record to the pretty console logger and appends it to a file.
///
/// Each side filters on its own level, so the console can stay quiet while
/// the file keeps a full record of the run.
pub struct TeeLogger {
    console: Box<dyn Log>,
    console_level: LevelFilter,
    file: Mutex<File>,
    file_level: LevelFilter,
}

impl TeeLogger {
    /// Open (or create) `log_file` for appending and build the console logger.
    ///
    /// `RUST_LOG` overrides the console level when set.
    ///
    /// # Errors
    ///
    /// * If the log file cannot be opened
    pub fn new(log_file: &Path, verbose: bool) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)?;

        let mut builder = pretty_env_logger::formatted_builder();
        match env::var("RUST_LOG") {
            Ok(filters) => {
                builder.parse_filters(&filters);
            }
            Err(_) => {
                builder.filter_level(if verbose {
                    LevelFilter::Info
                } else {
                    LevelFilter::Warn
                });
            }
        }
        let console = builder.build();
        let console_level = console.filter();

        Ok(Self {
            console: Box::new(console),
            console_level,
            file: Mutex::new(file),
            file_level: if verbose {
                LevelFilter::Debug
            } else {
                LevelFilter::Info
            },
        })
    }

    /// Most verbose level either side wants.
    #[must_use]
    pub fn max_level(&self) -> LevelFilter {
        self.console_level.max(self.file_level)
    }
}

impl Log for TeeLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.file_level || self.console.enabled(metadata)
    }

    fn log(&self, record: &Record<'_>) {
        self.console.log(record);

        if record.level() <= self.file_level {
            let timestamp = chrono::Local::now().format("%Y/%m/%d %H:%M:%S").to_string();
            let line = format_line(&timestamp, record);
            let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
            // nowhere left to report a failed log write
            let _ = writeln!(file, "{line}");
        }
    }

    fn flush(&self) {
        self.console.flush();
        let _ = self
            .file
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .flush();
    }
}

/// Format one log file line.
fn format_line(timestamp: &str, record: &Record<'_>) -> String {
    format!("{timestamp} {:<5} {}", record.level(), record.args())
}

/// Install the tee logger as the global logger.
///
/// # Errors
///
/// * If the log file cannot be opened
/// * If a global logger is already installed
pub fn init(log_file: &Path, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let logger = TeeLogger::new(log_file, verbose)?;
    let max_level = logger.max_level();
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(max_level);
    Ok(())
}
