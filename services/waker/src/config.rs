//! Waker configuration.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use coldfront_wake::WakePolicy;

/// Waker configuration (env-driven).
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the invocation API listens on.
    pub listen_addr: SocketAddr,

    /// Scheduler control plane base URL.
    pub scheduler_url: String,

    /// Cluster the fronted service runs in.
    pub cluster_id: String,

    /// Service to wake.
    pub service_id: String,

    /// Stable base URL of the fronted service (scheme and host).
    pub origin_url: String,

    /// Interval between task-status poll rounds.
    pub poll_interval: Duration,

    /// Grace period between observed readiness and forwarding.
    pub settle_delay: Duration,

    /// Wall-clock budget for the readiness wait.
    pub readiness_budget: Duration,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let listen_addr = std::env::var("COLDFRONT_LISTEN_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8088".to_string())
            .parse()
            .context("COLDFRONT_LISTEN_ADDR must be a socket address.")?;

        let scheduler_url = std::env::var("COLDFRONT_SCHEDULER_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());

        let cluster_id = std::env::var("COLDFRONT_CLUSTER_ID")
            .context("Missing cluster id. Set COLDFRONT_CLUSTER_ID.")?;

        let service_id = std::env::var("COLDFRONT_SERVICE_ID")
            .context("Missing service id. Set COLDFRONT_SERVICE_ID.")?;

        let origin_url = std::env::var("COLDFRONT_ORIGIN_URL").context(
            "Missing origin URL. Set COLDFRONT_ORIGIN_URL to the fronted service's base URL.",
        )?;

        let poll_interval_ms: u64 = std::env::var("COLDFRONT_POLL_INTERVAL_MS")
            .ok()
            .map(|v| v.parse())
            .transpose()
            .context("COLDFRONT_POLL_INTERVAL_MS must be an integer (milliseconds).")?
            .unwrap_or(100);
        let poll_interval = Duration::from_millis(poll_interval_ms.max(10));

        let settle_delay_ms: u64 = std::env::var("COLDFRONT_SETTLE_DELAY_MS")
            .ok()
            .map(|v| v.parse())
            .transpose()
            .context("COLDFRONT_SETTLE_DELAY_MS must be an integer (milliseconds).")?
            .unwrap_or(1000);
        let settle_delay = Duration::from_millis(settle_delay_ms);

        let readiness_budget_secs: u64 = std::env::var("COLDFRONT_READINESS_BUDGET_SECS")
            .ok()
            .map(|v| v.parse())
            .transpose()
            .context("COLDFRONT_READINESS_BUDGET_SECS must be an integer (seconds).")?
            .unwrap_or(180);
        let readiness_budget = Duration::from_secs(readiness_budget_secs.max(1));

        let log_level = std::env::var("COLDFRONT_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            listen_addr,
            scheduler_url,
            cluster_id,
            service_id,
            origin_url,
            poll_interval,
            settle_delay,
            readiness_budget,
            log_level,
        })
    }

    /// Timing knobs as a wake policy.
    pub fn wake_policy(&self) -> WakePolicy {
        WakePolicy {
            poll_interval: self.poll_interval,
            settle_delay: self.settle_delay,
            readiness_budget: self.readiness_budget,
        }
    }
}
