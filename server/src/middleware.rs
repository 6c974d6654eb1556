//! Cross-cutting request wrapping: logging, correlation ids, API keys.

use axum::{
    extract::{Request, State},
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

use crate::error::ApiError;
use crate::AppState;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");
pub const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-api-key");

/// Correlation id assigned to the current request. It reaches log events
/// through the `request` span and the client through `X-Request-ID`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    pub fn generate() -> Self {
        RequestId(Uuid::new_v4().to_string())
    }
}

/// Log method and path, then hand the request on unchanged.
pub async fn log_request(req: Request, next: Next) -> Response {
    tracing::info!(method = %req.method(), path = %req.uri().path(), "request received");
    next.run(req).await
}

/// Tag the request with a fresh id, run the rest of the stack inside a span
/// carrying it, and echo it back in `X-Request-ID`.
pub async fn tag_request_id(req: Request, next: Next) -> Response {
    let id = RequestId::generate();
    let span = tracing::info_span!("request", request_id = %id.0);

    let mut response = next.run(req).instrument(span).await;
    if let Ok(value) = HeaderValue::from_str(&id.0) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// Reject the request with 401 unless `X-API-KEY` equals the configured key.
pub async fn require_api_key(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let presented = req
        .headers()
        .get(&API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());
    if presented != Some(state.api_key()) {
        tracing::warn!(path = %req.uri().path(), "rejected request with missing or wrong api key");
        return Err(ApiError::Unauthorized);
    }
    Ok(next.run(req).await)
}
