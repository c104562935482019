//! Scheduler client errors.

use thiserror::Error;

/// Errors from the scheduler control plane.
///
/// Reads and writes are not retried here; a failure is surfaced to the
/// caller and terminates the invocation it belongs to.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Transport-level failure reaching the scheduler.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The scheduler answered with a non-success status.
    #[error("scheduler returned {status}: {message}")]
    Api { status: u16, message: String },
}
