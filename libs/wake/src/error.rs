//! Invocation-level error taxonomy.
//!
//! Every failure terminates its invocation with a hard error: no rollback,
//! no partial response, and no retry beyond the fixed-interval re-poll
//! that is part of normal (non-error) operation. The caller treats a
//! failed wake as transient and may reissue the original request.

use std::time::Duration;

use coldfront_scheduler::SchedulerError;
use thiserror::Error;

/// Errors that terminate a wake invocation.
#[derive(Debug, Error)]
pub enum WakeError {
    /// A scheduler read or write failed.
    #[error("scheduler query failed: {0}")]
    UpstreamQuery(#[from] SchedulerError),

    /// No task reached RUNNING/RUNNING within the readiness budget.
    #[error("no running task within {budget:?}")]
    ReadinessTimeout { budget: Duration },

    /// The inbound request could not be reconstructed as an HTTP request.
    #[error("invalid inbound request: {0}")]
    Request(String),

    /// Network or protocol failure talking to the woken service.
    #[error("forward failed: {0}")]
    Forward(#[from] reqwest::Error),
}
