//! Request ID middleware.
//!
//! Every cart action is traced under one ID so a failed save can be matched
//! to its Sentry event and log lines. An ID from an upstream proxy is kept
//! when it is short printable ASCII, otherwise a UUID v4 is generated.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest upstream ID that is reused as-is.
const MAX_FORWARDED_LEN: usize = 128;

/// Pick the ID for a request: the forwarded one if usable, else a new UUID.
#[must_use]
pub fn request_id_for(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|id| {
            !id.is_empty()
                && id.len() <= MAX_FORWARDED_LEN
                && id.bytes().all(|b| b.is_ascii_graphic())
        })
        .map_or_else(|| Uuid::new_v4().to_string(), String::from)
}

/// Tag the request span and Sentry scope with the request ID and echo it back.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = request_id_for(request.headers());

    Span::current().record("request_id", &request_id);
    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}
