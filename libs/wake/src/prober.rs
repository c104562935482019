//! Readiness prober: converges the service's desired count on the wake
//! target.

use coldfront_scheduler::{SchedulerApi, SchedulerError, ServiceDescriptor};
use tracing::{debug, info};

/// The fixed wake target.
///
/// This component only ever scales up to one replica. It never writes
/// zero; scale-down is driven by an external idle-detection loop.
pub const WAKE_TARGET: u32 = 1;

/// Ensure the service's desired count equals [`WAKE_TARGET`].
///
/// Reads the current desired count and issues a single update when it
/// differs; when the target is already satisfied no write is performed.
/// Safe to call redundantly from many concurrent invocations during a
/// cold-start burst: every caller converges on the same target.
///
/// Returns `true` when an update was issued.
pub async fn ensure_awake<S: SchedulerApi + ?Sized>(
    scheduler: &S,
    service: &ServiceDescriptor,
) -> Result<bool, SchedulerError> {
    let state = scheduler.describe_service(service).await?;
    if state.desired_count == WAKE_TARGET {
        debug!(service_id = %service.service_id, "service already at wake target");
        return Ok(false);
    }

    info!(
        service_id = %service.service_id,
        desired_count = state.desired_count,
        target = WAKE_TARGET,
        "scaling service up"
    );
    scheduler.update_desired_count(service, WAKE_TARGET).await?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use coldfront_scheduler::{ServiceState, TaskDescription};
    use rstest::rstest;

    struct FakeScheduler {
        desired_count: u32,
        fail_describe: bool,
        fail_update: bool,
        updates: Mutex<Vec<u32>>,
    }

    impl FakeScheduler {
        fn with_desired_count(desired_count: u32) -> Self {
            Self {
                desired_count,
                fail_describe: false,
                fail_update: false,
                updates: Mutex::new(Vec::new()),
            }
        }

        fn upstream_error() -> SchedulerError {
            SchedulerError::Api {
                status: 500,
                message: "boom".to_string(),
            }
        }
    }

    #[async_trait]
    impl SchedulerApi for FakeScheduler {
        async fn describe_service(
            &self,
            service: &ServiceDescriptor,
        ) -> Result<ServiceState, SchedulerError> {
            if self.fail_describe {
                return Err(Self::upstream_error());
            }
            Ok(ServiceState {
                service_id: service.service_id.clone(),
                desired_count: self.desired_count,
            })
        }

        async fn update_desired_count(
            &self,
            _service: &ServiceDescriptor,
            desired_count: u32,
        ) -> Result<(), SchedulerError> {
            if self.fail_update {
                return Err(Self::upstream_error());
            }
            self.updates.lock().unwrap().push(desired_count);
            Ok(())
        }

        async fn list_tasks(
            &self,
            _service: &ServiceDescriptor,
        ) -> Result<Vec<String>, SchedulerError> {
            unimplemented!("not used by the prober")
        }

        async fn describe_tasks(
            &self,
            _cluster_id: &str,
            _task_ids: &[String],
        ) -> Result<Vec<TaskDescription>, SchedulerError> {
            unimplemented!("not used by the prober")
        }
    }

    fn descriptor() -> ServiceDescriptor {
        ServiceDescriptor::new("cl-main", "svc-api")
    }

    #[tokio::test]
    async fn at_target_issues_no_write() {
        let scheduler = FakeScheduler::with_desired_count(1);

        let scaled = ensure_awake(&scheduler, &descriptor()).await.unwrap();

        assert!(!scaled);
        assert!(scheduler.updates.lock().unwrap().is_empty());
    }

    #[rstest]
    #[case(0)]
    #[case(3)]
    #[tokio::test]
    async fn off_target_issues_exactly_one_write_to_one(#[case] desired_count: u32) {
        let scheduler = FakeScheduler::with_desired_count(desired_count);

        let scaled = ensure_awake(&scheduler, &descriptor()).await.unwrap();

        assert!(scaled);
        assert_eq!(*scheduler.updates.lock().unwrap(), vec![WAKE_TARGET]);
    }

    #[tokio::test]
    async fn describe_failure_propagates_without_write() {
        let mut scheduler = FakeScheduler::with_desired_count(0);
        scheduler.fail_describe = true;

        let err = ensure_awake(&scheduler, &descriptor()).await.unwrap_err();

        assert!(matches!(err, SchedulerError::Api { status: 500, .. }));
        assert!(scheduler.updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_failure_propagates() {
        let mut scheduler = FakeScheduler::with_desired_count(0);
        scheduler.fail_update = true;

        let err = ensure_awake(&scheduler, &descriptor()).await.unwrap_err();
        assert!(matches!(err, SchedulerError::Api { status: 500, .. }));
    }
}
