//! Request/response logging middleware.

use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{Span, info, info_span, warn};

/// Span for `TraceLayer`. Records the path only, so query strings such as
/// `?token=` stay out of span context.
pub fn request_span(request: &Request) -> Span {
    info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
    )
}

/// Logs request method, path, status, and duration.
///
/// The query string is left out so invitation tokens never reach the logs.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let duration_ms = start.elapsed().as_millis() as u64;

    if status.is_server_error() {
        warn!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms,
            "HTTP request"
        );
    } else {
        info!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms,
            "HTTP request"
        );
    }

    response
}
