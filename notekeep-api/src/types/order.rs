//! Rank-related API types

use notekeep_core::{OrderAssignment, Rank};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::{ApiError, ApiResult};
use crate::validation::{parse_note_id, parse_rank};

/// Body of the bulk rank update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BulkOrderRequest {
    /// Applied in order; a later entry for the same note wins
    pub orders: Vec<OrderAssignment>,
}

impl BulkOrderRequest {
    /// Parse and check a raw body. Every entry is checked before the
    /// request is accepted, so a bad entry means nothing is written.
    pub fn from_json(body: &JsonValue) -> ApiResult<Self> {
        let Some(items) = body.get("orders").and_then(JsonValue::as_array) else {
            return Err(ApiError::validation_failed("Orders must be an array"));
        };

        let orders = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let note_id = item
                    .get("noteId")
                    .and_then(JsonValue::as_str)
                    .ok_or_else(|| {
                        ApiError::validation_failed("Each order needs a noteId string")
                            .with_details(serde_json::json!({ "index": index }))
                    })
                    .and_then(parse_note_id)?;
                let order = parse_rank(item.get("order"))
                    .map_err(|e| e.with_details(serde_json::json!({ "index": index })))?;
                Ok(OrderAssignment { note_id, order })
            })
            .collect::<ApiResult<Vec<_>>>()?;

        Ok(Self { orders })
    }
}

/// Body of the single rank update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SetOrderRequest {
    pub order: Rank,
}

impl SetOrderRequest {
    pub fn from_json(body: &JsonValue) -> ApiResult<Self> {
        Ok(Self {
            order: parse_rank(body.get("order"))?,
        })
    }
}

/// Result of a bulk rank update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BulkOrderResponse {
    pub message: String,
    /// Number of submitted entries
    pub count: usize,
}

/// Result of an initialization pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct InitializeOrdersResponse {
    pub message: String,
    pub new_orders_created: usize,
    pub total_revision_notes: usize,
}
