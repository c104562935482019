//! Scheduler control-plane types.

use serde::{Deserialize, Serialize};

/// Identifies a scheduler-managed service.
///
/// Immutable for the lifetime of the process; supplied from configuration
/// at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescriptor {
    /// Cluster the service runs in.
    pub cluster_id: String,

    /// Service within the cluster.
    pub service_id: String,
}

impl ServiceDescriptor {
    pub fn new(cluster_id: impl Into<String>, service_id: impl Into<String>) -> Self {
        Self {
            cluster_id: cluster_id.into(),
            service_id: service_id.into(),
        }
    }
}

/// Service-level state as reported by the scheduler.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceState {
    /// Service this state belongs to.
    pub service_id: String,

    /// Current desired replica count.
    pub desired_count: u32,
}

/// Task lifecycle states tracked by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Provisioning,
    Pending,
    Activating,
    Running,
    Deactivating,
    Stopping,
    Deprovisioning,
    Stopped,
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TaskStatus::Provisioning => "PROVISIONING",
            TaskStatus::Pending => "PENDING",
            TaskStatus::Activating => "ACTIVATING",
            TaskStatus::Running => "RUNNING",
            TaskStatus::Deactivating => "DEACTIVATING",
            TaskStatus::Stopping => "STOPPING",
            TaskStatus::Deprovisioning => "DEPROVISIONING",
            TaskStatus::Stopped => "STOPPED",
        };
        write!(f, "{label}")
    }
}

/// Per-task status snapshot.
///
/// Fetched fresh on every poll round; never cached across invocations.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskDescription {
    /// Task id.
    pub task_id: String,

    /// Status the scheduler last observed.
    pub last_status: TaskStatus,

    /// Status the scheduler is driving the task toward.
    pub desired_status: TaskStatus,
}

impl TaskDescription {
    /// True when the task is both observed and desired RUNNING.
    pub fn is_serving(&self) -> bool {
        self.last_status == TaskStatus::Running && self.desired_status == TaskStatus::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_status_wire_format() {
        let status: TaskStatus = serde_json::from_str("\"RUNNING\"").unwrap();
        assert_eq!(status, TaskStatus::Running);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"RUNNING\"");
    }

    #[test]
    fn test_task_description_deserialization() {
        let json = r#"{
            "task_id": "task_123",
            "last_status": "PENDING",
            "desired_status": "RUNNING"
        }"#;

        let task: TaskDescription = serde_json::from_str(json).unwrap();
        assert_eq!(task.task_id, "task_123");
        assert_eq!(task.last_status, TaskStatus::Pending);
        assert_eq!(task.desired_status, TaskStatus::Running);
        assert!(!task.is_serving());
    }

    #[test]
    fn test_is_serving_requires_both_statuses_running() {
        let mut task = TaskDescription {
            task_id: "task_123".to_string(),
            last_status: TaskStatus::Running,
            desired_status: TaskStatus::Stopped,
        };
        assert!(!task.is_serving());

        task.desired_status = TaskStatus::Running;
        assert!(task.is_serving());
    }
}
