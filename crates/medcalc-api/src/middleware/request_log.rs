use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Request logging middleware.
///
/// One event per request with method, matched path, status and latency.
/// Bodies carry patient values and are never logged.
pub async fn request_log(req: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    let status = response.status();
    let latency_ms = started.elapsed().as_secs_f64() * 1000.0;
    if status.is_server_error() {
        tracing::error!(method = %method, path = %path, status = status.as_u16(), latency_ms, "api_request");
    } else if status.is_client_error() {
        tracing::warn!(method = %method, path = %path, status = status.as_u16(), latency_ms, "api_request");
    } else {
        tracing::info!(method = %method, path = %path, status = status.as_u16(), latency_ms, "api_request");
    }

    response
}
