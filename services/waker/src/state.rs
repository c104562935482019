//! Shared application state.

use std::sync::Arc;

use coldfront_scheduler::HttpScheduler;
use coldfront_wake::WakeDriver;

/// State shared by all request handlers.
///
/// The driver is stateless across invocations; the only shared pieces are
/// its HTTP connection pools and the immutable service descriptor.
#[derive(Clone)]
pub struct AppState {
    pub driver: Arc<WakeDriver<HttpScheduler>>,
}

impl AppState {
    pub fn new(driver: WakeDriver<HttpScheduler>) -> Self {
        Self {
            driver: Arc::new(driver),
        }
    }
}
