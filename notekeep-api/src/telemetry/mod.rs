//! notekeep Telemetry - Observability Infrastructure
//!
//! Structured logging setup and per-request tracing spans for the API layer.

pub mod middleware;
pub mod tracer;

pub use middleware::observability_middleware;
pub use tracer::{init_tracer, LogFormat, TelemetryConfig};
