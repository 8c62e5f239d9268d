//! Axum Middleware for HTTP Request Tracing
//!
//! Wraps every request in an `http_request` span and logs its completion
//! with status and latency.

use axum::{extract::Request, middleware::Next, response::Response};
use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Instant;
use tracing::{info_span, Instrument};

static UUID_PATTERN: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}")
        .ok()
});

static NUMERIC_ID_PATTERN: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"/\d+(/|$)").ok());

/// `/api/notes/<uuid>` becomes `/api/notes/{id}`; numeric segments too.
fn normalize_path(path: &str) -> String {
    let mut result = path.to_string();
    if let Some(re) = UUID_PATTERN.as_ref() {
        result = re.replace_all(&result, "{id}").into_owned();
    }
    if let Some(re) = NUMERIC_ID_PATTERN.as_ref() {
        result = re.replace_all(&result, "/{id}$1").into_owned();
    }
    result
}

/// Runs the request inside an `http_request` span and logs one line when
/// it finishes: warn for 5xx, info otherwise.
pub async fn observability_middleware(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().clone();
    let target = request.uri().path().to_string();
    let route = normalize_path(&target);

    let span = info_span!(
        "http_request",
        http.method = %method,
        http.target = %target,
        http.route = %route,
    );
    let response = next.run(request).instrument(span.clone()).await;

    let status = response.status().as_u16();
    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    span.in_scope(|| {
        if response.status().is_server_error() {
            tracing::warn!(status, elapsed_ms, "Request failed");
        } else {
            tracing::info!(status, elapsed_ms, "Request completed");
        }
    });

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_ids_collapse() {
        assert_eq!(
            normalize_path("/api/notes/550e8400-e29b-41d4-a716-446655440000"),
            "/api/notes/{id}"
        );
        assert_eq!(
            normalize_path("/api/note-order/0192d4e0-0000-7000-8000-000000000000"),
            "/api/note-order/{id}"
        );
        assert_eq!(normalize_path("/api/notes/42"), "/api/notes/{id}");
    }

    #[test]
    fn test_static_routes_untouched() {
        assert_eq!(normalize_path("/api/notes/stats/overview"), "/api/notes/stats/overview");
        assert_eq!(normalize_path("/health/ready"), "/health/ready");
    }
}
