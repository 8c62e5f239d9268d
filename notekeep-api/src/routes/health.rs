//! Health Check Endpoints
//!
//! - /health/ping - plain "pong"
//! - /health/live - the process is serving requests
//! - /health/ready - the note store answers a ping; 503 otherwise

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use notekeep_core::NotekeepResult;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};

use notekeep_storage::Storage;

// ============================================================================
// TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Up,
    Down,
}

/// Body of the liveness and readiness probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    /// Present on readiness only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<StoreHealth>,
}

/// Outcome of pinging the note store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct StoreHealth {
    /// "postgres" or "memory"
    pub backend: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StoreHealth {
    /// Ping `store` and time the round trip.
    pub async fn probe(store: &dyn Storage) -> Self {
        let started = Instant::now();
        let outcome = store.ping().await;
        Self::from_ping(store.backend_name(), outcome, started.elapsed())
    }

    fn from_ping(backend: &str, outcome: NotekeepResult<()>, elapsed: Duration) -> Self {
        match outcome {
            Ok(()) => Self {
                backend: backend.to_string(),
                status: HealthStatus::Up,
                latency_ms: Some(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)),
                error: None,
            },
            Err(e) => {
                tracing::warn!(backend, error = %e, "Store ping failed");
                Self {
                    backend: backend.to_string(),
                    status: HealthStatus::Down,
                    latency_ms: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

// ============================================================================
// STATE
// ============================================================================

#[derive(Clone)]
pub struct HealthState {
    pub store: Arc<dyn Storage>,
    pub started: Instant,
}

impl HealthState {
    pub fn new(store: Arc<dyn Storage>) -> Self {
        Self {
            store,
            started: Instant::now(),
        }
    }

    fn report(&self, status: HealthStatus, store: Option<StoreHealth>) -> HealthReport {
        HealthReport {
            status,
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: self.started.elapsed().as_secs(),
            store,
        }
    }
}

// ============================================================================
// HANDLERS
// ============================================================================

/// GET /health/ping
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/health/ping",
    tag = "Health",
    responses((status = 200, description = "pong", body = String)),
))]
pub async fn ping() -> &'static str {
    "pong"
}

/// GET /health/live
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/health/live",
    tag = "Health",
    responses((status = 200, description = "Process is serving requests", body = HealthReport)),
))]
pub async fn liveness(State(state): State<Arc<HealthState>>) -> Json<HealthReport> {
    Json(state.report(HealthStatus::Up, None))
}

/// GET /health/ready
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/health/ready",
    tag = "Health",
    responses(
        (status = 200, description = "Store reachable", body = HealthReport),
        (status = 503, description = "Store unreachable", body = HealthReport),
    ),
))]
pub async fn readiness(State(state): State<Arc<HealthState>>) -> (StatusCode, Json<HealthReport>) {
    let store = StoreHealth::probe(state.store.as_ref()).await;
    let status = store.status;
    let code = match status {
        HealthStatus::Up => StatusCode::OK,
        HealthStatus::Down => StatusCode::SERVICE_UNAVAILABLE,
    };
    (code, Json(state.report(status, Some(store))))
}

// ============================================================================
// ROUTER
// ============================================================================

/// Create the health router (mounted at `/health`).
pub fn create_router(store: Arc<dyn Storage>) -> Router {
    let state = Arc::new(HealthState::new(store));

    Router::new()
        .route("/ping", get(ping))
        .route("/live", get(liveness))
        .route("/ready", get(readiness))
        .with_state(state)
}
