//! Scheduler control-plane client.
//!
//! The waker treats the scheduler as the single source of truth for the
//! fronted service: the desired replica count and the task set are always
//! read remotely, never cached locally. This crate provides the typed
//! operations the wake flow depends on:
//!
//! - **DescribeService**: current desired replica count
//! - **UpdateService**: set the desired replica count
//! - **ListTasks**: task ids for a service (possibly empty)
//! - **DescribeTasks**: per-task last/desired status
//!
//! Operations are exposed through the [`SchedulerApi`] trait so the wake
//! flow can be exercised against in-memory fakes; [`HttpScheduler`] is the
//! production implementation.

mod client;
mod error;
mod types;

pub use client::{HttpScheduler, SchedulerApi};
pub use error::SchedulerError;
pub use types::{ServiceDescriptor, ServiceState, TaskDescription, TaskStatus};
