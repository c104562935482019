//! Invocation data model and timing policy.

use std::collections::BTreeMap;
use std::time::Duration;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// One inbound request, as handed over by the edge router.
///
/// Header and query maps hold a single value per key; a caller that
/// supplies duplicates flattens them with the last value winning. Header
/// name case is preserved as given.
#[derive(Debug, Clone, Default)]
pub struct InboundRequest {
    /// HTTP method of the original request.
    pub method: String,

    /// Request path, starting with `/`.
    pub path: String,

    /// Query parameters, one value per key.
    pub query: BTreeMap<String, String>,

    /// Request headers, one value per key.
    pub headers: BTreeMap<String, String>,

    /// Request body, forwarded byte-for-byte when present.
    pub body: Option<Bytes>,
}

/// How a body is encoded when crossing the invocation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyEncoding {
    /// The body is a literal UTF-8 string.
    Literal,

    /// The body is standard base64.
    Base64,
}

/// The captured response, ready to cross back out of the invocation.
///
/// The invocation boundary is text-safe-only, so the forwarder always
/// re-encodes the body as base64 regardless of the original content type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundResponse {
    /// Status code of the service's response.
    pub status_code: u16,

    /// Response headers, flattened to one value per key.
    pub headers: BTreeMap<String, String>,

    /// Response body, encoded per `body_encoding`.
    pub body: String,

    /// Encoding of `body`.
    pub body_encoding: BodyEncoding,
}

/// Default interval between task-status poll rounds.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Default grace period between observed readiness and forwarding.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(1);

/// Default wall-clock budget for the whole readiness wait.
pub const DEFAULT_READINESS_BUDGET: Duration = Duration::from_secs(180);

/// Timing knobs for one wake invocation.
#[derive(Debug, Clone)]
pub struct WakePolicy {
    /// Interval between poll rounds.
    pub poll_interval: Duration,

    /// Grace period after readiness, before the request is forwarded.
    ///
    /// This absorbs the gap between "scheduler reports running" and "the
    /// application accepts connections". It is a heuristic, not a
    /// readiness probe of the application itself.
    pub settle_delay: Duration,

    /// Maximum wall clock spent waiting for a running task.
    pub readiness_budget: Duration,
}

impl Default for WakePolicy {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            settle_delay: DEFAULT_SETTLE_DELAY,
            readiness_budget: DEFAULT_READINESS_BUDGET,
        }
    }
}
