//! Orchestration driver: the linear per-invocation state machine.
//!
//! `START → CHECK_DESIRED → (SCALE_UP if needed) → WAIT_FOR_READY →
//! SETTLE_DELAY → FORWARD → RETURN`. The first failure in any state
//! terminates the invocation; there is no rollback, no partial-success
//! response, and no retry across states.

use coldfront_scheduler::{SchedulerApi, ServiceDescriptor};
use tracing::{debug, info};

use crate::error::WakeError;
use crate::forwarder;
use crate::poller;
use crate::prober;
use crate::types::{InboundRequest, OutboundResponse, WakePolicy};

/// Drives one wake-and-forward flow per inbound invocation.
///
/// The driver holds no per-invocation state and is safe to share across
/// concurrent invocations: the scheduler's service record is the single
/// source of truth and is re-read every time, and the scale-up write is
/// idempotent with respect to the fixed wake target. No mutual exclusion
/// serializes concurrent wake attempts; a scheduler without idempotent
/// "set desired count" semantics would need a single-flight guard here.
pub struct WakeDriver<S> {
    scheduler: S,
    service: ServiceDescriptor,
    origin: String,
    http: reqwest::Client,
    policy: WakePolicy,
}

impl<S: SchedulerApi> WakeDriver<S> {
    /// Create a driver for one fronted service.
    ///
    /// `origin` is the service's stable base URL (scheme and host).
    pub fn new(
        scheduler: S,
        service: ServiceDescriptor,
        origin: impl Into<String>,
        policy: WakePolicy,
    ) -> Self {
        Self {
            scheduler,
            service,
            origin: origin.into(),
            http: reqwest::Client::new(),
            policy,
        }
    }

    /// Replace the forwarding HTTP client (to share a connection pool).
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Run the full flow for one inbound request.
    pub async fn handle(&self, request: &InboundRequest) -> Result<OutboundResponse, WakeError> {
        info!(
            service_id = %self.service.service_id,
            method = %request.method,
            path = %request.path,
            "wake flow started"
        );

        let scaled = prober::ensure_awake(&self.scheduler, &self.service).await?;

        let task = poller::wait_for_running(
            &self.scheduler,
            &self.service,
            self.policy.poll_interval,
            self.policy.readiness_budget,
        )
        .await?;

        // Absorb the gap between "scheduler reports running" and "the
        // application accepts connections".
        tokio::time::sleep(self.policy.settle_delay).await;

        debug!(
            task_id = %task.task_id,
            scaled,
            "service ready, forwarding"
        );
        forwarder::forward(&self.http, &self.origin, request).await
    }
}
