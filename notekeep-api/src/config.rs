//! API Configuration
//!
//! Everything the router needs besides the store: allowed browser origins,
//! listing page sizes and the per-request deadline. Read once at startup
//! from `NOTEKEEP_*` variables; unset or malformed values fall back to the
//! defaults below.

use std::time::Duration;

// ============================================================================
// API CONFIGURATION
// ============================================================================

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Origins browsers may call from. Exact origins or `*.domain` (https
    /// only). Empty lets every origin through.
    pub cors_origins: Vec<String>,
    pub cors_allow_credentials: bool,
    /// Preflight cache lifetime
    pub cors_max_age_secs: u64,

    /// `limit` applied when a listing gives none.
    pub default_page_limit: usize,
    /// Larger `limit` values are clamped to this.
    pub max_page_limit: usize,

    /// Requests still running after this answer 408.
    pub request_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            cors_origins: Vec::new(),
            cors_allow_credentials: false,
            cors_max_age_secs: 24 * 60 * 60,
            default_page_limit: 50,
            max_page_limit: 500,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ApiConfig {
    /// Load from `NOTEKEEP_CORS_ORIGINS` (comma-separated),
    /// `NOTEKEEP_CORS_ALLOW_CREDENTIALS`, `NOTEKEEP_CORS_MAX_AGE_SECS`,
    /// `NOTEKEEP_DEFAULT_PAGE_LIMIT`, `NOTEKEEP_MAX_PAGE_LIMIT` and
    /// `NOTEKEEP_REQUEST_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let cors_origins = std::env::var("NOTEKEEP_CORS_ORIGINS")
            .map(|raw| split_origins(&raw))
            .unwrap_or_default();

        let max_page_limit = env_parse::<usize>("NOTEKEEP_MAX_PAGE_LIMIT")
            .filter(|n| *n > 0)
            .unwrap_or(defaults.max_page_limit);
        let default_page_limit = env_parse::<usize>("NOTEKEEP_DEFAULT_PAGE_LIMIT")
            .filter(|n| *n > 0)
            .unwrap_or(defaults.default_page_limit)
            .min(max_page_limit);

        Self {
            cors_origins,
            cors_allow_credentials: env_parse::<bool>("NOTEKEEP_CORS_ALLOW_CREDENTIALS")
                .unwrap_or(defaults.cors_allow_credentials),
            cors_max_age_secs: env_parse("NOTEKEEP_CORS_MAX_AGE_SECS")
                .unwrap_or(defaults.cors_max_age_secs),
            default_page_limit,
            max_page_limit,
            request_timeout: env_parse("NOTEKEEP_REQUEST_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
        }
    }

    /// True once an origin allow-list is configured.
    pub fn restricts_origins(&self) -> bool {
        !self.cors_origins.is_empty()
    }

    pub fn is_origin_allowed(&self, origin: &str) -> bool {
        !self.restricts_origins()
            || self
                .cors_origins
                .iter()
                .any(|rule| origin_matches(rule, origin))
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

fn origin_matches(rule: &str, origin: &str) -> bool {
    match rule.strip_prefix("*.") {
        None => rule == origin,
        Some(domain) => origin.strip_prefix("https://").is_some_and(|host| {
            host == domain
                || host
                    .strip_suffix(domain)
                    .is_some_and(|sub| sub.ends_with('.'))
        }),
    }
}

/// Parse an environment variable, treating unset and malformed alike.
pub(crate) fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

// ============================================================================
// STORE SELECTION
// ============================================================================

/// Which storage backend the server runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// PostgreSQL through `DbClient`.
    #[default]
    Postgres,
    /// Process-local `InMemoryStorage`; data is lost on exit.
    Memory,
}

impl StoreBackend {
    /// Read `NOTEKEEP_STORE` (`postgres` or `memory`).
    pub fn from_env() -> Self {
        std::env::var("NOTEKEEP_STORE")
            .ok()
            .map(|s| Self::parse(&s))
            .unwrap_or_default()
    }

    fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "memory" | "in-memory" | "inmemory" => StoreBackend::Memory,
            _ => StoreBackend::Postgres,
        }
    }
}
