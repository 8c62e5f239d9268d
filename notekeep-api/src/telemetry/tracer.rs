//! Tracing Subscriber Initialization
//!
//! Sets up `tracing-subscriber` with an `EnvFilter` and either a JSON or a
//! human-readable formatter.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{ApiError, ApiResult};

const DEFAULT_FILTER: &str = "notekeep_api=debug,tower_http=debug,info";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// Multi-line, colored output for local development.
    Pretty,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "pretty" | "text" => LogFormat::Pretty,
            _ => LogFormat::Json,
        }
    }
}

/// Telemetry configuration from environment variables.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name attached to startup logs
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Environment (production, staging, development)
    pub environment: String,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

impl TelemetryConfig {
    /// Build from `NOTEKEEP_SERVICE_NAME`, `NOTEKEEP_ENVIRONMENT` and
    /// `NOTEKEEP_LOG_FORMAT` as answered by `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            service_name: lookup("NOTEKEEP_SERVICE_NAME")
                .unwrap_or_else(|| "notekeep-api".to_string()),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            environment: lookup("NOTEKEEP_ENVIRONMENT")
                .unwrap_or_else(|| "production".to_string()),
            log_format: lookup("NOTEKEEP_LOG_FORMAT")
                .map(|s| LogFormat::parse(&s))
                .unwrap_or_default(),
        }
    }

    /// Whether internal error messages may be shown to clients.
    pub fn is_development(&self) -> bool {
        self.environment.eq_ignore_ascii_case("development")
    }
}

/// Initialize the tracing subscriber.
///
/// Call once at startup, before any tracing occurs. `RUST_LOG` overrides the
/// default filter.
pub fn init_tracer(config: &TelemetryConfig) -> ApiResult<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = match config.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).try_init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init(),
    };
    result.map_err(|e| ApiError::internal_error(format!("Failed to init subscriber: {}", e)))?;

    tracing::info!(
        service_name = config.service_name,
        service_version = config.service_version,
        environment = config.environment,
        "Telemetry initialized"
    );

    Ok(())
}
