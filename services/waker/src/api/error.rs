//! Problem+json error responses for the invocation API.

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use coldfront_wake::WakeError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub r#type: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub retryable: bool,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub problem: ProblemDetails,
}

impl ApiError {
    fn new(
        status: StatusCode,
        code: impl Into<String>,
        detail: impl Into<String>,
        retryable: bool,
    ) -> Self {
        let code = code.into();
        let title = status
            .canonical_reason()
            .unwrap_or("Unknown Error")
            .to_string();
        Self {
            status,
            problem: ProblemDetails {
                r#type: format!("https://coldfront.dev/problems/{code}"),
                title,
                status: status.as_u16(),
                detail: detail.into(),
                code,
                retryable,
            },
        }
    }

    pub fn bad_request(code: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code, detail, false)
    }
}

impl From<WakeError> for ApiError {
    fn from(err: WakeError) -> Self {
        // Wake failures are transient from the edge router's point of
        // view: it may reissue the original request, which re-enters the
        // same flow.
        match &err {
            WakeError::UpstreamQuery(_) => Self::new(
                StatusCode::BAD_GATEWAY,
                "upstream_query_failed",
                err.to_string(),
                true,
            ),
            WakeError::ReadinessTimeout { .. } => Self::new(
                StatusCode::GATEWAY_TIMEOUT,
                "readiness_timeout",
                err.to_string(),
                true,
            ),
            WakeError::Forward(_) => Self::new(
                StatusCode::BAD_GATEWAY,
                "forward_failed",
                err.to_string(),
                true,
            ),
            WakeError::Request(_) => Self::bad_request("invalid_request", err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = (self.status, Json(self.problem)).into_response();
        response.headers_mut().insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/problem+json"),
        );
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_readiness_timeout_maps_to_gateway_timeout() {
        let err = ApiError::from(WakeError::ReadinessTimeout {
            budget: Duration::from_secs(180),
        });
        assert_eq!(err.status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(err.problem.code, "readiness_timeout");
        assert!(err.problem.retryable);
    }

    #[test]
    fn test_invalid_request_is_not_retryable() {
        let err = ApiError::from(WakeError::Request("invalid method".to_string()));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(!err.problem.retryable);
    }
}
