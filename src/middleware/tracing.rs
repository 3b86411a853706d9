//! Request tracing middleware

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// Log method, path, status and timing for every request
pub async fn request_tracing(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let start = Instant::now();
    let response = next.run(request).await;

    let status = response.status();
    let duration_ms = start.elapsed().as_millis();

    if status.is_server_error() {
        tracing::error!(%method, %path, status = %status.as_u16(), %duration_ms, "Request failed");
    } else if status.is_client_error() {
        tracing::warn!(%method, %path, status = %status.as_u16(), %duration_ms, "Request rejected");
    } else {
        tracing::info!(%method, %path, status = %status.as_u16(), %duration_ms, "Request completed");
    }

    response
}
