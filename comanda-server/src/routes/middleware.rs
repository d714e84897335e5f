//! Access log middleware
//!
//! One line per request under the `http_access` target: method, matched
//! path, status and latency.

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, warn};

pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();

    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    let response = next.run(req).await;

    let latency_ms = start.elapsed().as_millis();
    let status = response.status();

    if status.is_server_error() || status.is_client_error() {
        warn!(
            target: "http_access",
            request_id = %request_id,
            path = %path,
            latency_ms = %latency_ms,
            "{} {} {}",
            method,
            uri,
            status.as_u16()
        );
    } else {
        info!(
            target: "http_access",
            request_id = %request_id,
            path = %path,
            latency_ms = %latency_ms,
            "{} {} {}",
            method,
            uri,
            status.as_u16()
        );
    }

    response
}
