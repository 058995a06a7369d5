//! Request logging middleware.

use std::time::Instant;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, info};

/// Logs one line per completed request.
///
/// A socket upgrade reports `101 Switching Protocols` before the
/// connection's real work begins, so upgrades are logged at debug and
/// without a duration; the socket loop logs the connection itself.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    if status == StatusCode::SWITCHING_PROTOCOLS {
        debug!(method = %method, path = %path, "WebSocket upgrade accepted");
    } else {
        info!(
            method = %method,
            path = %path,
            status = %status.as_u16(),
            elapsed_ms = %start.elapsed().as_millis(),
            "Request completed"
        );
    }

    response
}
