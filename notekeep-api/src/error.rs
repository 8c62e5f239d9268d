//! API Errors
//!
//! Every failed request answers with a JSON `ApiError { code, message,
//! details }`. The `ErrorCode` picks the HTTP status. Core errors convert
//! into `ApiError` so handlers can use `?` throughout.
//!
//! 5xx messages are swapped for the code's default message before they
//! leave the process, unless internal errors are exposed (development).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use notekeep_core::{ConfigError, EntityKind, NotekeepError, StorageError, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

static EXPOSE_INTERNAL_ERRORS: AtomicBool = AtomicBool::new(false);

/// Send the real message of 5xx errors to clients.
pub fn set_expose_internal_errors(expose: bool) {
    EXPOSE_INTERNAL_ERRORS.store(expose, Ordering::Relaxed);
}

// ============================================================================
// ERROR CODES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // 400
    ValidationFailed,
    /// Body or query could not be decoded
    InvalidInput,
    InvalidRange,
    /// Path identifier is not a UUID
    InvalidFormat,

    // 404
    NoteNotFound,
    /// Rank entry or any other record
    RecordNotFound,

    // 409
    AlreadyExists,

    // 5xx
    InternalError,
    DatabaseError,
    StoreUnavailable,
    PoolExhausted,
}

impl ErrorCode {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::ValidationFailed
            | ErrorCode::InvalidInput
            | ErrorCode::InvalidRange
            | ErrorCode::InvalidFormat => StatusCode::BAD_REQUEST,
            ErrorCode::NoteNotFound | ErrorCode::RecordNotFound => StatusCode::NOT_FOUND,
            ErrorCode::AlreadyExists => StatusCode::CONFLICT,
            ErrorCode::InternalError | ErrorCode::DatabaseError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ErrorCode::StoreUnavailable | ErrorCode::PoolExhausted => {
                StatusCode::SERVICE_UNAVAILABLE
            }
        }
    }

    /// Message used when the caller supplies none, and for redacted 5xx.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::InvalidInput => "Malformed request",
            ErrorCode::InvalidRange => "Value out of range",
            ErrorCode::InvalidFormat => "Invalid ID format",
            ErrorCode::NoteNotFound => "Note not found",
            ErrorCode::RecordNotFound => "Record not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InternalError => "Something went wrong",
            ErrorCode::DatabaseError => "Something went wrong while accessing notes",
            ErrorCode::StoreUnavailable => "Note store unavailable",
            ErrorCode::PoolExhausted => "Too many concurrent requests, retry shortly",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

// ============================================================================
// API ERROR
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
    /// Offending field, batch index, rejected value
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn from_code(code: ErrorCode) -> Self {
        Self::new(code, code.default_message())
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn status_code(&self) -> StatusCode {
        self.code.status_code()
    }

    pub fn validation_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// `field` must lie in `min..=max`.
    pub fn invalid_range(field: &str, min: impl fmt::Display, max: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::InvalidRange,
            format!("{} must be between {} and {}", field, min, max),
        )
        .with_details(serde_json::json!({ "field": field }))
    }

    pub fn invalid_id(value: &str) -> Self {
        Self::from_code(ErrorCode::InvalidFormat).with_details(serde_json::json!({ "value": value }))
    }

    pub fn note_not_found(note_id: impl fmt::Display) -> Self {
        Self::from_code(ErrorCode::NoteNotFound).with_details(serde_json::json!({
            "id": note_id.to_string(),
        }))
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// The error as clients see it.
    pub fn redacted(self) -> Self {
        if !self.status_code().is_server_error() || EXPOSE_INTERNAL_ERRORS.load(Ordering::Relaxed)
        {
            return self;
        }
        Self::from_code(self.code)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = %self.code, message = %self.message, "Request failed");
        }
        (status, Json(self.redacted())).into_response()
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound {
                entity: EntityKind::Note,
                id,
            } => ApiError::note_not_found(id),
            StorageError::NotFound { entity, id } => ApiError::new(
                ErrorCode::RecordNotFound,
                format!("{} {} not found", entity, id),
            ),
            StorageError::Conflict { reason, .. } => ApiError::from_code(ErrorCode::AlreadyExists)
                .with_details(serde_json::json!({ "reason": reason })),
            StorageError::InvalidData { reason } => ApiError::validation_failed(reason),
            StorageError::PoolExhausted => ApiError::from_code(ErrorCode::PoolExhausted),
            StorageError::Unavailable { reason } => {
                ApiError::new(ErrorCode::StoreUnavailable, reason)
            }
            StorageError::TransactionFailed { reason } | StorageError::Backend { reason } => {
                ApiError::new(ErrorCode::DatabaseError, reason)
            }
            StorageError::LockPoisoned => ApiError::internal_error("Storage lock poisoned"),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation_failed("Validation failed").with_details(serde_json::json!({
            "field": err.field(),
            "errors": [err.to_string()],
        }))
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::internal_error(err.to_string())
    }
}

impl From<NotekeepError> for ApiError {
    fn from(err: NotekeepError) -> Self {
        match err {
            NotekeepError::Storage(e) => e.into(),
            NotekeepError::Validation(e) => e.into(),
            NotekeepError::Config(e) => e.into(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::invalid_input(format!("Invalid JSON: {}", err))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
