//! Health check endpoints.
//!
//! Used by load balancers to determine whether the waker itself is up;
//! says nothing about the fronted service or the scheduler.

use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct HealthResponse {
    /// Service status.
    pub status: String,

    /// Service name.
    pub service: String,

    /// Service version.
    pub version: String,
}

/// Create health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/healthz", get(healthz))
}

async fn healthz() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            service: "coldfront-waker".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}
