//! Wall-clock deadlines around expensive computations.
//!
//! The computation runs on a worker thread. When the deadline passes first,
//! the caller gets its fallback immediately and the worker is left to finish
//! on its own; its result is discarded. This is only sound for work that
//! holds no locks or external resources, which is true for everything in
//! this crate.

use crate::error::{RecordDiffError, Result};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

/// Run `f`, returning `default` if it does not finish within `timeout`.
///
/// A zero `timeout` disables the deadline and runs `f` on the calling
/// thread. A panicking worker also yields `default`.
pub fn run_with_timeout<T, F>(timeout: Duration, default: T, f: F) -> T
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    match spawn_and_wait(timeout, f) {
        Ok(value) => value,
        Err(reason) => {
            tracing::warn!("computation abandoned: {reason}");
            default
        }
    }
}

/// Run a fallible `f` under a deadline, mapping expiry to
/// [`RecordDiffError::Timeout`].
pub fn try_with_timeout<T, F>(timeout: Duration, context: &str, f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    match spawn_and_wait(timeout, f) {
        Ok(result) => result,
        Err(WaitFailure::TimedOut) => Err(RecordDiffError::timeout(
            context,
            timeout.as_secs_f64(),
        )),
        Err(other) => Err(RecordDiffError::validation(format!("{context}: {other}"))),
    }
}

#[derive(Debug)]
enum WaitFailure {
    TimedOut,
    WorkerLost,
    Spawn(std::io::Error),
}

impl std::fmt::Display for WaitFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TimedOut => write!(f, "deadline exceeded"),
            Self::WorkerLost => write!(f, "worker thread terminated without a result"),
            Self::Spawn(e) => write!(f, "failed to spawn worker thread: {e}"),
        }
    }
}

fn spawn_and_wait<T, F>(timeout: Duration, f: F) -> std::result::Result<T, WaitFailure>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    if timeout.is_zero() {
        return Ok(f());
    }

    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("record-diff-deadline".to_string())
        .spawn(move || {
            // The receiver is gone once the deadline has passed.
            let _ = tx.send(f());
        })
        .map_err(WaitFailure::Spawn)?;

    match rx.recv_timeout(timeout) {
        Ok(value) => Ok(value),
        Err(RecvTimeoutError::Timeout) => Err(WaitFailure::TimedOut),
        Err(RecvTimeoutError::Disconnected) => Err(WaitFailure::WorkerLost),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fast_computation_returns_value() {
        let value = run_with_timeout(Duration::from_secs(5), 0, || 42);
        assert_eq!(value, 42);
    }

    #[test]
    fn test_slow_computation_returns_default() {
        let value = run_with_timeout(Duration::from_millis(20), -1, || {
            thread::sleep(Duration::from_millis(500));
            1
        });
        assert_eq!(value, -1);
    }

    #[test]
    fn test_zero_timeout_runs_inline() {
        let value = run_with_timeout(Duration::ZERO, 0, || 7);
        assert_eq!(value, 7);
    }

    #[test]
    fn test_panicking_worker_returns_default() {
        let value = run_with_timeout(Duration::from_secs(5), "fallback", || {
            panic!("boom");
        });
        assert_eq!(value, "fallback");
    }

    #[test]
    fn test_try_with_timeout_maps_expiry() {
        let result: Result<()> = try_with_timeout(Duration::from_millis(20), "slow diff", || {
            thread::sleep(Duration::from_millis(500));
            Ok(())
        });
        match result {
            Err(RecordDiffError::Timeout { context, .. }) => assert_eq!(context, "slow diff"),
            other => panic!("Expected Timeout error, got {other:?}"),
        }
    }

    #[test]
    fn test_try_with_timeout_propagates_inner_error() {
        let result: Result<()> = try_with_timeout(Duration::from_secs(5), "diff", || {
            Err(RecordDiffError::validation("bad input"))
        });
        assert!(matches!(result, Err(RecordDiffError::Validation(_))));
    }
}
