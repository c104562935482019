//! Wake-and-forward orchestration core.
//!
//! When the fronted service has scaled to zero, each invocation runs one
//! linear flow: converge the scheduler's desired count on a single replica,
//! poll until a task is observably running, wait out a settle delay, then
//! forward the original request and capture the response.
//!
//! Invocations are independent and stateless; many may run concurrently
//! during a cold-start burst. Correctness under that burst rests on the
//! idempotency of the scale-up write and on the poller's pure reads; no
//! mutual exclusion, leader election, or distributed lock is used.

pub mod driver;
pub mod error;
pub mod forwarder;
pub mod poller;
pub mod prober;
pub mod types;

pub use driver::WakeDriver;
pub use error::WakeError;
pub use prober::WAKE_TARGET;
pub use types::{BodyEncoding, InboundRequest, OutboundResponse, WakePolicy};
