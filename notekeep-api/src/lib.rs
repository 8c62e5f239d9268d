//! notekeep API - REST API Layer
//!
//! Axum HTTP server for the notekeep notes service: note CRUD, filtered
//! listing, statistics and the user-defined revision order. Storage is
//! pluggable through the `notekeep-storage` traits; `DbClient` provides the
//! PostgreSQL backend.

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
#[cfg(feature = "openapi")]
pub mod openapi;
pub mod routes;
pub mod services;
pub mod telemetry;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use config::{ApiConfig, StoreBackend};
pub use db::{DbClient, DbConfig};
pub use error::{ApiError, ApiResult, ErrorCode};
#[cfg(feature = "openapi")]
pub use openapi::ApiDoc;
pub use routes::create_api_router;
pub use services::OrderService;
pub use types::*;
