//! Copy workers and the per-file retry loop.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::Path;

use crossbeam_channel::{Receiver, Sender, TrySendError, select};
use listcopy_config::RunConfig;
use listcopy_copy::{CompareMode, CopyError, TransferOutcome, transfer_file};

use crate::cancel::CancellationToken;
use crate::error::RunError;
use crate::reporter::{Outcome, Reporter};

/// Copies one file. Implemented by [`FileTransfer`]; swappable for tests.
pub trait Transfer: Sync {
    /// Transfer `source` to `target`.
    ///
    /// # Errors
    ///
    /// * If the file could not be copied
    fn transfer(&self, source: &Path, target: &Path) -> Result<TransferOutcome, CopyError>;
}

/// Filesystem transfer using [`transfer_file`].
#[derive(Debug, Clone, Copy)]
pub struct FileTransfer {
    mode: CompareMode,
}

impl FileTransfer {
    /// Create a transfer that compares existing targets using `mode`.
    #[must_use]
    pub const fn new(mode: CompareMode) -> Self {
        Self { mode }
    }

    /// Create a transfer matching a run configuration.
    #[must_use]
    pub const fn for_config(config: &RunConfig) -> Self {
        Self::new(CompareMode::from_verify_hash(config.verify_hash))
    }
}

impl Transfer for FileTransfer {
    fn transfer(&self, source: &Path, target: &Path) -> Result<TransferOutcome, CopyError> {
        transfer_file(source, target, self.mode)
    }
}

/// One member of the worker pool.
pub(crate) struct Worker<'a, T: Transfer + ?Sized> {
    pub id: usize,
    pub config: &'a RunConfig,
    pub transfer: &'a T,
    pub reporter: &'a dyn Reporter,
    pub cancel: &'a CancellationToken,
    pub jobs: Receiver<String>,
    pub progress: Sender<TransferOutcome>,
    pub errors: Sender<RunError>,
}

impl<T: Transfer + ?Sized> Worker<'_, T> {
    /// Claim and process jobs until the queue is drained or the run is cancelled.
    pub fn run(self) {
        log::debug!("Worker {}: started", self.id);

        loop {
            if self.cancel.is_cancelled() {
                log::info!("Worker {}: stopped after interruption", self.id);
                return;
            }

            let job = select! {
                recv(self.jobs) -> job => match job {
                    Ok(job) => job,
                    Err(_) => break,
                },
                recv(self.cancel.signal()) -> _ => {
                    log::info!("Worker {}: stopped after interruption", self.id);
                    return;
                }
            };

            // lost a race with cancel; leave the job unclaimed
            if self.cancel.is_cancelled() {
                log::debug!("Worker {}: abandoning {job} after interruption", self.id);
                return;
            }

            if !self.process(&job) {
                return;
            }
        }

        log::debug!("Worker {}: queue drained", self.id);
    }

    /// Run the retry loop for one job.
    ///
    /// Returns `false` if cancellation cut the retry loop short.
    fn process(&self, job: &str) -> bool {
        let source = self.config.source_path(job);
        let target = self.config.dest_path(job);
        let max_attempts = self.config.retry.max_attempts.max(1);
        let mut attempts = 0;

        loop {
            attempts += 1;

            match self.transfer.transfer(&source, &target) {
                Ok(TransferOutcome::Copied) => {
                    log::info!("Worker {}: copied {job}", self.id);
                    self.reporter.on_outcome(self.id, job, &Outcome::Copied);
                    self.emit(&self.progress, TransferOutcome::Copied);
                    return true;
                }
                Ok(TransferOutcome::SkippedIdentical) => {
                    log::info!("Worker {}: skipped {job}, files are identical", self.id);
                    self.reporter
                        .on_outcome(self.id, job, &Outcome::SkippedIdentical);
                    self.emit(&self.progress, TransferOutcome::SkippedIdentical);
                    return true;
                }
                Err(CopyError::SourceNotFound { .. }) => {
                    log::error!("Worker {}: source file missing {job}", self.id);
                    self.reporter.on_outcome(self.id, job, &Outcome::SourceMissing);
                    self.emit(
                        &self.errors,
                        RunError::SourceMissing {
                            worker: self.id,
                            path: source,
                        },
                    );
                    return true;
                }
                Err(err) if !err.is_retryable() || attempts >= max_attempts => {
                    self.reporter.on_outcome(
                        self.id,
                        job,
                        &Outcome::Exhausted {
                            cause: &err,
                            attempts,
                        },
                    );
                    self.emit(
                        &self.errors,
                        RunError::RetryExhausted {
                            worker: self.id,
                            path: source,
                            attempts,
                            source: err,
                        },
                    );
                    return true;
                }
                Err(err) => {
                    log::warn!(
                        "Worker {}: error copying {job}, retrying ({attempts}/{max_attempts}): {err}",
                        self.id
                    );
                    self.reporter.on_outcome(
                        self.id,
                        job,
                        &Outcome::RetryableFailure {
                            cause: &err,
                            attempt: attempts,
                            max_attempts,
                        },
                    );

                    if self.cancel.sleep(self.config.retry.backoff) {
                        log::info!(
                            "Worker {}: giving up on {job} after interruption",
                            self.id
                        );
                        return false;
                    }
                }
            }
        }
    }

    /// Send a result to a collector without outliving a cancelled run.
    fn emit<M>(&self, sender: &Sender<M>, message: M) {
        let delivered = match sender.try_send(message) {
            Ok(()) => true,
            Err(TrySendError::Full(message)) => select! {
                send(sender, message) -> res => res.is_ok(),
                recv(self.cancel.signal()) -> _ => false,
            },
            Err(TrySendError::Disconnected(_)) => false,
        };

        if !delivered {
            log::debug!("Worker {}: result dropped, run is shutting down", self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use listcopy_config::RetryPolicy;
    use tempfile::TempDir;

    use crate::reporter::SilentReporter;

    struct AlwaysFails {
        calls: AtomicU32,
    }

    impl Transfer for AlwaysFails {
        fn transfer(&self, source: &Path, target: &Path) -> Result<TransferOutcome, CopyError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(CopyError::FileCopyError {
                source_path: source.to_path_buf(),
                target_path: target.to_path_buf(),
                io_error: std::io::Error::other("device busy"),
            })
        }
    }

    struct FailsThenCopies {
        calls: AtomicU32,
        failures: u32,
    }

    impl Transfer for FailsThenCopies {
        fn transfer(&self, source: &Path, target: &Path) -> Result<TransferOutcome, CopyError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call <= self.failures {
                return Err(CopyError::FileCopyError {
                    source_path: source.to_path_buf(),
                    target_path: target.to_path_buf(),
                    io_error: std::io::Error::other("transient"),
                });
            }
            Ok(TransferOutcome::Copied)
        }
    }

    struct Counting {
        inner: FileTransfer,
        calls: AtomicU32,
    }

    impl Transfer for Counting {
        fn transfer(&self, source: &Path, target: &Path) -> Result<TransferOutcome, CopyError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.transfer(source, target)
        }
    }

    static CAPTURED: Mutex<Vec<String>> = Mutex::new(Vec::new());

    struct CaptureLogger;

    impl log::Log for CaptureLogger {
        fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
            true
        }

        fn log(&self, record: &log::Record<'_>) {
            CAPTURED
                .lock()
                .unwrap()
                .push(format!("{} {}", record.level(), record.args()));
        }

        fn flush(&self) {}
    }

    fn fast_config(dir: &TempDir) -> RunConfig {
        RunConfig::new(dir.path().join("src"), dir.path().join("dst"), 1, true).with_retry(
            RetryPolicy {
                max_attempts: 3,
                backoff: Duration::from_millis(1),
            },
        )
    }

    fn run_single_job<T: Transfer>(
        config: &RunConfig,
        transfer: &T,
        job: &str,
    ) -> (Vec<TransferOutcome>, Vec<RunError>) {
        let cancel = CancellationToken::new();
        let (job_tx, job_rx) = crossbeam_channel::unbounded();
        let (progress_tx, progress_rx) = crossbeam_channel::unbounded();
        let (error_tx, error_rx) = crossbeam_channel::unbounded();

        job_tx.send(job.to_string()).unwrap();
        drop(job_tx);

        Worker {
            id: 0,
            config,
            transfer,
            reporter: &SilentReporter,
            cancel: &cancel,
            jobs: job_rx,
            progress: progress_tx,
            errors: error_tx,
        }
        .run();

        (progress_rx.iter().collect(), error_rx.iter().collect())
    }

    #[test]
    fn test_worker_gives_up_after_retry_ceiling() {
        let dir = TempDir::new().unwrap();
        let config = fast_config(&dir);
        let transfer = AlwaysFails {
            calls: AtomicU32::new(0),
        };

        let (progress, errors) = run_single_job(&config, &transfer, "a.txt");

        assert_eq!(transfer.calls.load(Ordering::SeqCst), 3);
        assert!(progress.is_empty());
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0],
            RunError::RetryExhausted { attempts: 3, .. }
        ));
    }

    #[test]
    fn test_worker_recovers_after_transient_failure() {
        let dir = TempDir::new().unwrap();
        let config = fast_config(&dir);
        let transfer = FailsThenCopies {
            calls: AtomicU32::new(0),
            failures: 2,
        };

        let (progress, errors) = run_single_job(&config, &transfer, "a.txt");

        assert_eq!(transfer.calls.load(Ordering::SeqCst), 3);
        assert_eq!(progress, vec![TransferOutcome::Copied]);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_worker_does_not_retry_missing_source() {
        let dir = TempDir::new().unwrap();
        let config = fast_config(&dir);
        let transfer = Counting {
            inner: FileTransfer::for_config(&config),
            calls: AtomicU32::new(0),
        };

        let (progress, errors) = run_single_job(&config, &transfer, "missing.txt");

        assert_eq!(transfer.calls.load(Ordering::SeqCst), 1);
        assert!(progress.is_empty());
        assert_eq!(errors.len(), 1);
        match &errors[0] {
            RunError::SourceMissing { worker, path } => {
                assert_eq!(*worker, 0);
                assert_eq!(path, &dir.path().join("src/missing.txt"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_worker_reports_skip_as_progress() {
        let dir = TempDir::new().unwrap();
        let config = fast_config(&dir);
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::create_dir_all(dir.path().join("dst")).unwrap();
        fs::write(dir.path().join("src/a.txt"), "same").unwrap();
        fs::write(dir.path().join("dst/a.txt"), "same").unwrap();

        let (progress, errors) =
            run_single_job(&config, &FileTransfer::for_config(&config), "a.txt");

        assert_eq!(progress, vec![TransferOutcome::SkippedIdentical]);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_worker_logs_missing_source() {
        let _ = log::set_logger(&CaptureLogger);
        log::set_max_level(log::LevelFilter::Trace);
        let dir = TempDir::new().unwrap();
        let config = fast_config(&dir);

        let (_, errors) = run_single_job(
            &config,
            &FileTransfer::for_config(&config),
            "logged-missing.txt",
        );

        assert_eq!(errors.len(), 1);
        assert!(
            CAPTURED
                .lock()
                .unwrap()
                .iter()
                .any(|line| line == "ERROR Worker 0: source file missing logged-missing.txt")
        );
    }
}
