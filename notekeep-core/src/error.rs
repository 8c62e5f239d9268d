//! Error types for notekeep operations

use crate::EntityKind;
use thiserror::Error;
use uuid::Uuid;

/// Storage layer errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: EntityKind, id: Uuid },

    #[error("Conflict on {entity}: {reason}")]
    Conflict { entity: EntityKind, reason: String },

    #[error("Invalid data: {reason}")]
    InvalidData { reason: String },

    #[error("Transaction failed: {reason}")]
    TransactionFailed { reason: String },

    #[error("Connection pool exhausted")]
    PoolExhausted,

    #[error("Storage unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("Storage backend error: {reason}")]
    Backend { reason: String },

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

/// Validation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredFieldMissing { field: String },

    #[error("{field} cannot be more than {max} characters")]
    TooLong { field: String, max: usize },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::RequiredFieldMissing { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::InvalidValue { field, .. } => field,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration field: {field}")]
    MissingRequired { field: String },

    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Master error type for all notekeep errors.
#[derive(Debug, Clone, Error)]
pub enum NotekeepError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for notekeep operations.
pub type NotekeepResult<T> = Result<T, NotekeepError>;

// =============================================================================
// TESTS
// =============================================================================
