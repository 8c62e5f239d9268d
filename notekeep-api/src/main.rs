//! notekeep API Server Entry Point
//!
//! Bootstraps configuration, connects the selected store and starts the
//! Axum HTTP server. On SIGINT/SIGTERM the server drains in-flight requests
//! and then closes the store.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use notekeep_api::{
    create_api_router, error::set_expose_internal_errors, ApiConfig, ApiError, ApiResult,
    DbClient, DbConfig, StoreBackend,
};
use notekeep_storage::{InMemoryStorage, Storage};

use notekeep_api::telemetry::{init_tracer, TelemetryConfig};

#[tokio::main]
async fn main() -> ApiResult<()> {
    let telemetry_config = TelemetryConfig::default();
    init_tracer(&telemetry_config)?;
    set_expose_internal_errors(telemetry_config.is_development());

    let store = connect_store(StoreBackend::from_env()).await?;
    tracing::info!(backend = store.backend_name(), "Store ready");

    let api_config = ApiConfig::from_env();
    let app: Router = create_api_router(store.clone(), &api_config);

    let addr = resolve_bind_addr()?;
    tracing::info!(%addr, "Starting notekeep API server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;

    store.close().await;
    tracing::info!("Server stopped");
    Ok(())
}

async fn connect_store(backend: StoreBackend) -> ApiResult<Arc<dyn Storage>> {
    match backend {
        StoreBackend::Postgres => {
            let db_config = DbConfig::from_env()?;
            let db = DbClient::connect(&db_config).await?;
            Ok(Arc::new(db))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; data is lost on exit");
            Ok(Arc::new(InMemoryStorage::new()))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}

fn resolve_bind_addr() -> ApiResult<SocketAddr> {
    let host = std::env::var("NOTEKEEP_API_BIND").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port_str = std::env::var("PORT")
        .ok()
        .or_else(|| std::env::var("NOTEKEEP_API_PORT").ok())
        .unwrap_or_else(|| "5000".to_string());
    let port = port_str.parse::<u16>().map_err(|_| {
        ApiError::invalid_input(format!("Invalid port value: {}", port_str))
    })?;

    let addr = format!("{}:{}", host, port);
    addr.parse::<SocketAddr>().map_err(|e| {
        ApiError::invalid_input(format!("Invalid bind address {}: {}", addr, e))
    })
}
