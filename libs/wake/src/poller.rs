//! Task poller: fixed-interval wait for a running task.
//!
//! Each round lists the service's tasks. An empty list means the scheduler
//! has not placed a task yet, so the round sleeps and retries. Otherwise
//! every listed task is described and the wait ends as soon as any one of
//! them reports RUNNING for both last and desired status. First-ready-wins;
//! there is no requirement that all tasks are ready.
//!
//! Readiness here means "the scheduler reports the task running", not "the
//! application accepts connections": no TCP or HTTP probe is made against
//! the instance itself. The settle delay the driver applies afterwards
//! papers over that gap.

use std::time::Duration;

use coldfront_scheduler::{SchedulerApi, ServiceDescriptor, TaskDescription};
use tracing::{debug, trace};

use crate::error::WakeError;

/// Wait until the scheduler reports at least one RUNNING/RUNNING task.
///
/// Polls every `interval`, bounded by the explicit wall-clock `budget`;
/// exceeding it returns [`WakeError::ReadinessTimeout`]. A scheduler
/// failure inside a round aborts the wait immediately; rounds are not
/// retried on error.
pub async fn wait_for_running<S: SchedulerApi + ?Sized>(
    scheduler: &S,
    service: &ServiceDescriptor,
    interval: Duration,
    budget: Duration,
) -> Result<TaskDescription, WakeError> {
    tokio::time::timeout(budget, poll_until_running(scheduler, service, interval))
        .await
        .map_err(|_| WakeError::ReadinessTimeout { budget })?
}

async fn poll_until_running<S: SchedulerApi + ?Sized>(
    scheduler: &S,
    service: &ServiceDescriptor,
    interval: Duration,
) -> Result<TaskDescription, WakeError> {
    loop {
        let task_ids = scheduler.list_tasks(service).await?;
        if task_ids.is_empty() {
            trace!(service_id = %service.service_id, "no tasks placed yet");
            tokio::time::sleep(interval).await;
            continue;
        }

        let tasks = scheduler
            .describe_tasks(&service.cluster_id, &task_ids)
            .await?;
        if let Some(task) = tasks.into_iter().find(|task| task.is_serving()) {
            debug!(task_id = %task.task_id, "observed running task");
            return Ok(task);
        }

        trace!(
            service_id = %service.service_id,
            task_count = task_ids.len(),
            "no task running yet"
        );
        tokio::time::sleep(interval).await;
    }
}
