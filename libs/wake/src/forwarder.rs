//! Request forwarder: replays the inbound request against the woken
//! service.
//!
//! The forward is a single, fully buffered exchange: the response body is
//! read into memory before returning, so response size is bounded by the
//! hosting invocation's memory. The body is always re-encoded as base64
//! for the text-safe invocation boundary. No retries, no streaming, no
//! connection reuse guarantees across invocations.

use std::collections::BTreeMap;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use tracing::debug;

use crate::error::WakeError;
use crate::types::{BodyEncoding, InboundRequest, OutboundResponse};

/// Forward `request` to the service at `origin` and capture the response.
///
/// `origin` is the service's stable base URL (scheme and host); the
/// inbound path is appended verbatim and the query map is re-encoded with
/// one value per key. Headers are carried over one value per key with
/// case as given; the body, when present, is sent byte-for-byte.
pub async fn forward(
    client: &reqwest::Client,
    origin: &str,
    request: &InboundRequest,
) -> Result<OutboundResponse, WakeError> {
    let method = Method::from_bytes(request.method.as_bytes())
        .map_err(|_| WakeError::Request(format!("invalid method: {:?}", request.method)))?;

    let mut headers = HeaderMap::new();
    for (name, value) in &request.headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| WakeError::Request(format!("invalid header name: {name:?}")))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|_| WakeError::Request(format!("invalid value for header {name:?}")))?;
        headers.insert(header_name, header_value);
    }

    let url = format!("{}{}", origin.trim_end_matches('/'), request.path);
    debug!(method = %method, url = %url, "forwarding request");

    let mut outbound = client.request(method, &url).headers(headers);
    if !request.query.is_empty() {
        outbound = outbound.query(&request.query);
    }
    if let Some(body) = &request.body {
        outbound = outbound.body(body.clone());
    }

    let response = outbound.send().await?;
    let status_code = response.status().as_u16();

    // Flatten repeated response headers: a later value for the same name
    // overwrites an earlier one.
    let mut response_headers = BTreeMap::new();
    for (name, value) in response.headers() {
        response_headers.insert(
            name.to_string(),
            String::from_utf8_lossy(value.as_bytes()).into_owned(),
        );
    }

    let body = response.bytes().await?;
    debug!(status_code, body_len = body.len(), "captured response");

    Ok(OutboundResponse {
        status_code,
        headers: response_headers,
        body: STANDARD.encode(&body),
        body_encoding: BodyEncoding::Base64,
    })
}
