//! HTTP routes
//!
//! `/api/notes` for note CRUD, listing and statistics, `/api/note-order` for
//! the revision ordering (with `/api/notes/order/*` aliases), `/health` for
//! probes. All of it sits behind CORS, request logging and a timeout.

pub mod health;
pub mod note;
pub mod note_order;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, Method},
    middleware::from_fn,
    Router,
};
use notekeep_storage::Storage;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;

use crate::config::ApiConfig;
use crate::services::OrderService;
use crate::telemetry::observability_middleware;

// ============================================================================
// OPENAPI ENDPOINT
// ============================================================================

/// GET /openapi.json
#[cfg(feature = "openapi")]
async fn openapi_json() -> impl axum::response::IntoResponse {
    use utoipa::OpenApi;
    axum::Json(crate::openapi::ApiDoc::openapi())
}

// ============================================================================
// CORS LAYER
// ============================================================================

/// Without an origin allow-list every origin is accepted; otherwise the
/// list decides per request.
fn build_cors_layer(config: &ApiConfig) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(config.cors_max_age_secs));

    if !config.restricts_origins() {
        tracing::info!("CORS open to all origins");
        return base.allow_origin(Any);
    }

    tracing::info!(origins = ?config.cors_origins, "CORS restricted");
    let rules = config.clone();
    let base = base.allow_origin(AllowOrigin::predicate(move |origin, _| {
        origin
            .to_str()
            .is_ok_and(|o| rules.is_origin_allowed(o))
    }));
    base.allow_credentials(config.cors_allow_credentials)
}

// ============================================================================
// ROUTER
// ============================================================================

/// The full application router over `store`.
///
/// Layers, outermost first: CORS (answers preflights), request span and
/// completion log, timeout.
pub fn create_api_router(store: Arc<dyn Storage>, config: &ApiConfig) -> Router {
    let orders = Arc::new(OrderService::new(store.clone()));

    let api_routes = Router::new()
        .nest(
            "/notes",
            note::create_router(store.clone(), orders.clone(), config.clone()),
        )
        .nest("/note-order", note_order::create_router(orders));

    #[allow(unused_mut)]
    let mut router = Router::new()
        .nest("/api", api_routes)
        .nest("/health", health::create_router(store));

    #[cfg(feature = "openapi")]
    {
        router = router.route("/openapi.json", axum::routing::get(openapi_json));
    }

    let cors = build_cors_layer(config);

    router
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(from_fn(observability_middleware))
        .layer(cors)
}
