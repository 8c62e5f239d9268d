//! API Request and Response Types
//!
//! Request bodies are parsed into these types and checked before any store
//! call; responses use the camelCase wire names clients expect.

use serde::{Deserialize, Serialize};

// Note types
mod note;
pub use note::*;

// Rank types
mod order;
pub use order::*;

/// Body carrying only a confirmation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
