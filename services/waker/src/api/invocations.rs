//! Invocation entrypoint.
//!
//! The edge router reissues a request here only when the primary path
//! answered with its designated unavailable status. One invocation wakes
//! the fronted service and forwards exactly one request; the response
//! crosses back in a text-safe envelope.

use std::collections::BTreeMap;

use axum::{extract::State, routing::post, Json, Router};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use coldfront_wake::{BodyEncoding, InboundRequest, OutboundResponse};
use serde::Deserialize;
use tracing::info;

use crate::api::error::ApiError;
use crate::state::AppState;

/// Create invocation routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/invocations", post(invoke))
}

/// Invocation input: the edge router's view of the original request.
///
/// The boundary is text-safe only; a binary body arrives base64 encoded
/// with the matching marker.
#[derive(Debug, Deserialize)]
pub struct InvocationRequest {
    /// HTTP method of the original request.
    pub method: String,

    /// Request path, starting with `/`.
    pub path: String,

    /// Query parameters, one value per key.
    #[serde(default)]
    pub query: BTreeMap<String, String>,

    /// Request headers, one value per key.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    /// Optional request body, encoded per `body_encoding`.
    #[serde(default)]
    pub body: Option<String>,

    /// Encoding of `body`.
    #[serde(default = "default_body_encoding")]
    pub body_encoding: BodyEncoding,
}

fn default_body_encoding() -> BodyEncoding {
    BodyEncoding::Literal
}

impl InvocationRequest {
    fn into_inbound(self) -> Result<InboundRequest, ApiError> {
        let body = match (self.body, self.body_encoding) {
            (None, _) => None,
            (Some(text), BodyEncoding::Literal) => Some(Bytes::from(text.into_bytes())),
            (Some(text), BodyEncoding::Base64) => {
                let decoded = STANDARD.decode(text.as_bytes()).map_err(|e| {
                    ApiError::bad_request("invalid_body", format!("body is not valid base64: {e}"))
                })?;
                Some(Bytes::from(decoded))
            }
        };

        Ok(InboundRequest {
            method: self.method,
            path: self.path,
            query: self.query,
            headers: self.headers,
            body,
        })
    }
}

async fn invoke(
    State(state): State<AppState>,
    Json(request): Json<InvocationRequest>,
) -> Result<Json<OutboundResponse>, ApiError> {
    info!(
        method = %request.method,
        path = %request.path,
        "wake invocation received"
    );

    let inbound = request.into_inbound()?;
    let response = state.driver.handle(&inbound).await?;

    Ok(Json(response))
}
