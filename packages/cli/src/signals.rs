//! Turning SIGINT/SIGTERM into run cancellation.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::io;

use listcopy_operations::CancellationToken;

/// Exit status after a forced shutdown or an interrupted run.
pub const EXIT_INTERRUPTED: i32 = 130;

/// Cancel `cancel` on the first SIGINT/SIGTERM and exit on the second.
///
/// Must be called before any other thread is spawned: the signals are
/// blocked for the calling thread, every thread created afterwards inherits
/// that mask, and a dedicated thread collects them with `sigwait`.
///
/// # Errors
///
/// * If the signal mask cannot be changed or the thread cannot be spawned
#[cfg(unix)]
pub fn install(cancel: CancellationToken) -> io::Result<()> {
    // SAFETY: sigset_t is plain data and is fully initialised by sigemptyset.
    let mut set: libc::sigset_t = unsafe { std::mem::zeroed() };

    // SAFETY: `set` is a valid, exclusively borrowed sigset_t.
    unsafe {
        libc::sigemptyset(&mut set);
        libc::sigaddset(&mut set, libc::SIGINT);
        libc::sigaddset(&mut set, libc::SIGTERM);
    }

    // SAFETY: `set` is initialised; a null old-set pointer is allowed.
    let rc = unsafe { libc::pthread_sigmask(libc::SIG_BLOCK, &set, std::ptr::null_mut()) };
    if rc != 0 {
        return Err(io::Error::from_raw_os_error(rc));
    }

    std::thread::Builder::new()
        .name("signals".to_string())
        .spawn(move || wait_for_signals(&set, &cancel))?;

    Ok(())
}

/// Signal handling is not wired up on this platform.
///
/// # Errors
///
/// * Never
#[cfg(not(unix))]
pub fn install(_cancel: CancellationToken) -> io::Result<()> {
    Ok(())
}

#[cfg(unix)]
fn wait_for_signals(set: &libc::sigset_t, cancel: &CancellationToken) {
    loop {
        let mut signal: libc::c_int = 0;
        // SAFETY: `set` was initialised in `install` and `signal` is a valid out pointer.
        let rc = unsafe { libc::sigwait(set, &mut signal) };
        if rc != 0 {
            log::error!("sigwait failed: {}", io::Error::from_raw_os_error(rc));
            return;
        }

        if cancel.is_cancelled() {
            crate::output::print_error("Forced shutdown");
            log::logger().flush();
            std::process::exit(EXIT_INTERRUPTED);
        }

        log::warn!("Received signal {signal}, stopping workers");
        crate::output::print_warning(
            "Interrupt received, finishing files in progress (interrupt again to force quit)",
        );
        cancel.cancel();
    }
}
