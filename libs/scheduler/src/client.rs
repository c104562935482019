//! HTTP client for the scheduler control plane.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SchedulerError;
use crate::types::{ServiceDescriptor, ServiceState, TaskDescription};

/// Control-plane operations the wake flow depends on.
///
/// Everything here is a read except [`update_desired_count`], which is
/// idempotent with respect to a fixed target: concurrent callers writing
/// the same count converge on the same scheduler state.
///
/// [`update_desired_count`]: SchedulerApi::update_desired_count
#[async_trait]
pub trait SchedulerApi: Send + Sync {
    /// Fetch the service's current state, including its desired count.
    async fn describe_service(
        &self,
        service: &ServiceDescriptor,
    ) -> Result<ServiceState, SchedulerError>;

    /// Set the service's desired replica count.
    async fn update_desired_count(
        &self,
        service: &ServiceDescriptor,
        desired_count: u32,
    ) -> Result<(), SchedulerError>;

    /// List task ids for the service. Empty while placement is pending.
    async fn list_tasks(&self, service: &ServiceDescriptor)
        -> Result<Vec<String>, SchedulerError>;

    /// Fetch per-task status for the given task ids.
    async fn describe_tasks(
        &self,
        cluster_id: &str,
        task_ids: &[String],
    ) -> Result<Vec<TaskDescription>, SchedulerError>;
}

/// Scheduler control-plane client over HTTP.
#[derive(Debug, Clone)]
pub struct HttpScheduler {
    client: reqwest::Client,
    base_url: String,
}

impl HttpScheduler {
    /// Create a new client for the scheduler at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing connection pool.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map a non-success response to an API error.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, SchedulerError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        Err(SchedulerError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[derive(Debug, Serialize)]
struct ScaleRequest {
    desired_count: u32,
}

#[derive(Debug, Deserialize)]
struct ScaleResponse {
    accepted: bool,
}

#[derive(Debug, Deserialize)]
struct ListTasksResponse {
    task_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
struct DescribeTasksRequest<'a> {
    task_ids: &'a [String],
}

#[derive(Debug, Deserialize)]
struct DescribeTasksResponse {
    tasks: Vec<TaskDescription>,
}

#[async_trait]
impl SchedulerApi for HttpScheduler {
    async fn describe_service(
        &self,
        service: &ServiceDescriptor,
    ) -> Result<ServiceState, SchedulerError> {
        let url = self.url(&format!(
            "/v1/clusters/{}/services/{}",
            service.cluster_id, service.service_id
        ));
        debug!(url = %url, "describing service");

        let response = self.client.get(&url).send().await?;
        let state = Self::check(response).await?.json::<ServiceState>().await?;

        debug!(
            service_id = %state.service_id,
            desired_count = state.desired_count,
            "service described"
        );
        Ok(state)
    }

    async fn update_desired_count(
        &self,
        service: &ServiceDescriptor,
        desired_count: u32,
    ) -> Result<(), SchedulerError> {
        let url = self.url(&format!(
            "/v1/clusters/{}/services/{}/scale",
            service.cluster_id, service.service_id
        ));
        debug!(url = %url, desired_count, "updating desired count");

        let response = self
            .client
            .post(&url)
            .json(&ScaleRequest { desired_count })
            .send()
            .await?;
        let ack = Self::check(response).await?.json::<ScaleResponse>().await?;

        debug!(accepted = ack.accepted, desired_count, "scale acknowledged");
        Ok(())
    }

    async fn list_tasks(
        &self,
        service: &ServiceDescriptor,
    ) -> Result<Vec<String>, SchedulerError> {
        let url = self.url(&format!(
            "/v1/clusters/{}/services/{}/tasks",
            service.cluster_id, service.service_id
        ));

        let response = self.client.get(&url).send().await?;
        let body = Self::check(response)
            .await?
            .json::<ListTasksResponse>()
            .await?;

        Ok(body.task_ids)
    }

    async fn describe_tasks(
        &self,
        cluster_id: &str,
        task_ids: &[String],
    ) -> Result<Vec<TaskDescription>, SchedulerError> {
        let url = self.url(&format!("/v1/clusters/{cluster_id}/tasks/describe"));

        let response = self
            .client
            .post(&url)
            .json(&DescribeTasksRequest { task_ids })
            .send()
            .await?;
        let body = Self::check(response)
            .await?
            .json::<DescribeTasksResponse>()
            .await?;

        Ok(body.tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TaskStatus;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn descriptor() -> ServiceDescriptor {
        ServiceDescriptor::new("cl-main", "svc-api")
    }

    #[tokio::test]
    async fn describe_service_returns_desired_count() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/clusters/cl-main/services/svc-api"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "service_id": "svc-api",
                "desired_count": 0
            })))
            .mount(&server)
            .await;

        let client = HttpScheduler::new(server.uri());
        let state = client.describe_service(&descriptor()).await.unwrap();

        assert_eq!(state.service_id, "svc-api");
        assert_eq!(state.desired_count, 0);
    }

    #[tokio::test]
    async fn update_desired_count_posts_the_target() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/clusters/cl-main/services/svc-api/scale"))
            .and(body_json(json!({ "desired_count": 1 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "accepted": true })))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpScheduler::new(server.uri());
        client
            .update_desired_count(&descriptor(), 1)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn list_tasks_handles_empty_placement() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/clusters/cl-main/services/svc-api/tasks"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "task_ids": [] })),
            )
            .mount(&server)
            .await;

        let client = HttpScheduler::new(server.uri());
        let tasks = client.list_tasks(&descriptor()).await.unwrap();
        assert!(tasks.is_empty());
    }

    #[tokio::test]
    async fn describe_tasks_parses_statuses() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/clusters/cl-main/tasks/describe"))
            .and(body_json(json!({ "task_ids": ["task-1", "task-2"] })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "tasks": [
                    {
                        "task_id": "task-1",
                        "last_status": "PENDING",
                        "desired_status": "RUNNING"
                    },
                    {
                        "task_id": "task-2",
                        "last_status": "RUNNING",
                        "desired_status": "RUNNING"
                    }
                ]
            })))
            .mount(&server)
            .await;

        let client = HttpScheduler::new(server.uri());
        let ids = vec!["task-1".to_string(), "task-2".to_string()];
        let tasks = client.describe_tasks("cl-main", &ids).await.unwrap();

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].last_status, TaskStatus::Pending);
        assert!(tasks[1].is_serving());
    }

    #[tokio::test]
    async fn non_success_status_maps_to_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/clusters/cl-main/services/svc-api"))
            .respond_with(ResponseTemplate::new(503).set_body_string("scheduler unavailable"))
            .mount(&server)
            .await;

        let client = HttpScheduler::new(server.uri());
        let err = client.describe_service(&descriptor()).await.unwrap_err();

        match err {
            SchedulerError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "scheduler unavailable");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn connection_failure_maps_to_transport_error() {
        // Nothing listens here.
        let client = HttpScheduler::new("http://127.0.0.1:1");
        let err = client.describe_service(&descriptor()).await.unwrap_err();
        assert!(matches!(err, SchedulerError::Transport(_)));
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = HttpScheduler::new("http://scheduler.local/");
        assert_eq!(
            client.url("/v1/clusters/a/services/b"),
            "http://scheduler.local/v1/clusters/a/services/b"
        );
    }
}
