//! Worker pool orchestration for a whole copy run.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::thread::{self, ScopedJoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, bounded, select};
use listcopy_config::RunConfig;
use listcopy_copy::{CopyProgress, ProgressTracker, TransferOutcome};

use crate::cancel::CancellationToken;
use crate::error::RunError;
use crate::reporter::Reporter;
use crate::worker::{FileTransfer, Transfer, Worker};

/// Aggregate result of a copy run.
#[derive(Debug)]
pub struct RunResult {
    /// Number of files in the list.
    pub total: u64,
    /// Files disposed of (copied plus skipped).
    pub processed: u64,
    /// Files copied.
    pub copied: u64,
    /// Files skipped because the target was current.
    pub skipped: u64,
    /// Files that could not be copied.
    pub failed: u64,
    /// Wall time of the run.
    pub elapsed: Duration,
    /// First error observed, or [`RunError::Interrupted`] for a cancelled run.
    pub error: Option<RunError>,
}

impl RunResult {
    /// Whether every file was disposed of and the run was not cancelled.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Convert into a `Result`, keeping the counts on success.
    ///
    /// # Errors
    ///
    /// * The first error recorded during the run
    pub fn into_result(self) -> Result<Self, RunError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self),
        }
    }
}

/// Copy every job from `config.source_root` to `config.dest_root`.
///
/// Blocks until all workers have finished or the run was cancelled.
/// Individual file failures never stop the run; the first one observed is
/// reported in [`RunResult::error`].
#[must_use]
pub fn run(
    config: &RunConfig,
    jobs: &[String],
    cancel: &CancellationToken,
    reporter: &dyn Reporter,
) -> RunResult {
    run_with_transfer(config, jobs, cancel, reporter, &FileTransfer::for_config(config))
}

/// Like [`run`], with a custom per-file transfer.
#[must_use]
pub fn run_with_transfer<T: Transfer + ?Sized>(
    config: &RunConfig,
    jobs: &[String],
    cancel: &CancellationToken,
    reporter: &dyn Reporter,
    transfer: &T,
) -> RunResult {
    let started = Instant::now();
    let total = jobs.len() as u64;
    let worker_count = config.worker_count.max(1);

    log::info!(
        "Copying {total} files from {} to {} with {worker_count} workers",
        config.source_root.display(),
        config.dest_root.display()
    );

    // every channel holds the whole run, so the producer never waits
    let capacity = jobs.len().max(1);
    let (job_tx, job_rx) = bounded::<String>(capacity);
    let (progress_tx, progress_rx) = bounded::<TransferOutcome>(capacity);
    let (error_tx, error_rx) = bounded::<RunError>(capacity);

    let (progress, (first_error, failed)) = thread::scope(|scope| {
        let workers: Vec<_> = (0..worker_count)
            .map(|id| {
                let worker = Worker {
                    id,
                    config,
                    transfer,
                    reporter,
                    cancel,
                    jobs: job_rx.clone(),
                    progress: progress_tx.clone(),
                    errors: error_tx.clone(),
                };
                scope.spawn(move || worker.run())
            })
            .collect();
        drop(job_rx);

        let tracker = scope.spawn(move || track_progress(total, &progress_rx, reporter));
        let collector = scope.spawn(move || collect_errors(&error_rx, cancel));

        feed_jobs(jobs, job_tx, cancel);

        for worker in workers {
            join(worker);
        }

        drop(progress_tx);
        drop(error_tx);

        (join(tracker), join(collector))
    });

    let error = first_error.or_else(|| cancel.is_cancelled().then_some(RunError::Interrupted));
    let elapsed = started.elapsed();

    log::info!(
        "Run finished in {elapsed:?}: {} copied, {} skipped, {failed} failed",
        progress.files_copied,
        progress.files_skipped
    );

    RunResult {
        total,
        processed: progress.files_done,
        copied: progress.files_copied,
        skipped: progress.files_skipped,
        failed,
        elapsed,
        error,
    }
}

/// Enqueue every job, stopping early on cancellation. Closes the queue on return.
fn feed_jobs(jobs: &[String], queue: Sender<String>, cancel: &CancellationToken) {
    for (queued, job) in jobs.iter().enumerate() {
        if cancel.is_cancelled() {
            log::info!("Interrupted after queueing {queued} of {} files", jobs.len());
            return;
        }

        select! {
            send(queue, job.clone()) -> res => {
                if res.is_err() {
                    log::debug!("All workers exited, {} files left unqueued", jobs.len() - queued);
                    return;
                }
            }
            recv(cancel.signal()) -> _ => {
                log::info!("Interrupted after queueing {queued} of {} files", jobs.len());
                return;
            }
        }
    }
}

/// Consume progress signals until every worker is gone.
fn track_progress(
    total: u64,
    signals: &Receiver<TransferOutcome>,
    reporter: &dyn Reporter,
) -> CopyProgress {
    let mut tracker = ProgressTracker::new(total);

    for outcome in signals {
        let progress = tracker.record(outcome);
        log::debug!(
            "Progress: {}/{} ({:.1}%), estimated time remaining: {:?}",
            progress.files_done,
            progress.files_total,
            progress.percentage(),
            progress.remaining
        );
        reporter.on_progress(&progress);
    }

    tracker.snapshot()
}

/// Keep the first error observed and log the rest.
///
/// Cancellation seen before any file error counts as the first error.
fn collect_errors(errors: &Receiver<RunError>, cancel: &CancellationToken) -> (Option<RunError>, u64) {
    let mut first: Option<RunError> = None;
    let mut failed = 0;
    let mut watching_cancel = true;

    loop {
        let err = if watching_cancel {
            select! {
                recv(errors) -> err => match err {
                    Ok(err) => err,
                    Err(_) => break,
                },
                recv(cancel.signal()) -> _ => {
                    watching_cancel = false;
                    // errors already queued were surfaced before the cancel
                    while let Ok(err) = errors.try_recv() {
                        failed += 1;
                        log::error!("{err}");
                        first.get_or_insert(err);
                    }
                    if first.is_none() {
                        first = Some(RunError::Interrupted);
                    }
                    continue;
                }
            }
        } else {
            match errors.recv() {
                Ok(err) => err,
                Err(_) => break,
            }
        };

        failed += 1;
        log::error!("{err}");

        if first.is_none() {
            first = Some(err);
        }
    }

    (first, failed)
}

fn join<T>(handle: ScopedJoinHandle<'_, T>) -> T {
    handle
        .join()
        .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
}
