//! Note Order REST API Routes
//!
//! Handlers for the revision ordering: read the resolved order, assign
//! ranks in bulk or one at a time, remove a rank, and seed ranks for every
//! unranked revision note. Mounted at `/api/note-order`, with the read,
//! bulk and initialize handlers also reachable under `/api/notes/order`.

use axum::{
    extract::State,
    routing::{get, post, put},
    Json, Router,
};
use notekeep_core::NoteOrder;
use serde_json::Value as JsonValue;
use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    extractors::{ApiJson, NoteIdPath},
    services::OrderService,
    types::{
        BulkOrderRequest, BulkOrderResponse, InitializeOrdersResponse, MessageResponse,
        RevisionNotesResponse, SetOrderRequest,
    },
};

// ============================================================================
// SHARED STATE
// ============================================================================

/// Shared application state for rank routes.
#[derive(Clone)]
pub struct NoteOrderState {
    pub orders: Arc<OrderService>,
}

impl NoteOrderState {
    pub fn new(orders: Arc<OrderService>) -> Self {
        Self { orders }
    }
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// GET /api/note-order - List every rank entry
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/note-order",
    tag = "Note Order",
    responses((status = 200, description = "Rank entries, lowest rank first", body = Vec<NoteOrder>)),
))]
pub async fn list_orders(State(state): State<Arc<NoteOrderState>>) -> ApiResult<Json<Vec<NoteOrder>>> {
    Ok(Json(state.orders.list_orders().await?))
}

/// GET /api/note-order/revision-notes - Revision notes in display order
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/note-order/revision-notes",
    tag = "Note Order",
    responses(
        (status = 200, description = "Ranked notes by rank, then unranked notes by creation", body = RevisionNotesResponse),
    ),
))]
pub async fn revision_notes(
    State(state): State<Arc<NoteOrderState>>,
) -> ApiResult<Json<RevisionNotesResponse>> {
    let resolved = state.orders.revision_notes().await?;
    let notes = resolved.into_iter().map(|r| r.note).collect();
    Ok(Json(RevisionNotesResponse::new(notes)))
}

/// POST /api/note-order/bulk-update - Assign many ranks at once
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/api/note-order/bulk-update",
    tag = "Note Order",
    request_body = BulkOrderRequest,
    responses(
        (status = 200, description = "Orders updated successfully", body = BulkOrderResponse),
        (status = 400, description = "Orders missing, not an array, or an entry is invalid", body = ApiError),
    ),
))]
pub async fn bulk_update(
    State(state): State<Arc<NoteOrderState>>,
    ApiJson(body): ApiJson<JsonValue>,
) -> ApiResult<Json<BulkOrderResponse>> {
    let request = BulkOrderRequest::from_json(&body)?;
    let count = state.orders.bulk_update(&request.orders).await?;
    Ok(Json(BulkOrderResponse {
        message: "Orders updated successfully".to_string(),
        count,
    }))
}

/// PUT /api/note-order/{noteId} - Assign one rank
#[cfg_attr(feature = "openapi", utoipa::path(
    put,
    path = "/api/note-order/{noteId}",
    tag = "Note Order",
    params(("noteId" = String, Path, description = "Note ID")),
    request_body = SetOrderRequest,
    responses(
        (status = 200, description = "Stored rank entry", body = NoteOrder),
        (status = 400, description = "Order is not a number or malformed ID", body = ApiError),
    ),
))]
pub async fn set_order(
    State(state): State<Arc<NoteOrderState>>,
    NoteIdPath(note_id): NoteIdPath,
    ApiJson(body): ApiJson<JsonValue>,
) -> ApiResult<Json<NoteOrder>> {
    let request = SetOrderRequest::from_json(&body)?;
    let entry = state.orders.set_order(note_id, request.order).await?;
    Ok(Json(entry))
}

/// DELETE /api/note-order/{noteId} - Remove one rank
#[cfg_attr(feature = "openapi", utoipa::path(
    delete,
    path = "/api/note-order/{noteId}",
    tag = "Note Order",
    params(("noteId" = String, Path, description = "Note ID")),
    responses(
        (status = 200, description = "Removed, or there was nothing to remove", body = MessageResponse),
        (status = 400, description = "Malformed ID", body = ApiError),
    ),
))]
pub async fn remove_order(
    State(state): State<Arc<NoteOrderState>>,
    NoteIdPath(note_id): NoteIdPath,
) -> ApiResult<Json<MessageResponse>> {
    state.orders.remove_order(note_id).await?;
    Ok(Json(MessageResponse::new("Note order removed successfully")))
}

/// POST /api/note-order/initialize - Rank every unranked revision note
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/api/note-order/initialize",
    tag = "Note Order",
    responses(
        (status = 200, description = "Orders initialized successfully", body = InitializeOrdersResponse),
    ),
))]
pub async fn initialize(
    State(state): State<Arc<NoteOrderState>>,
) -> ApiResult<Json<InitializeOrdersResponse>> {
    let outcome = state.orders.initialize().await?;
    Ok(Json(InitializeOrdersResponse {
        message: "Orders initialized successfully".to_string(),
        new_orders_created: outcome.new_orders_created,
        total_revision_notes: outcome.total_revision_notes,
    }))
}

// ============================================================================
// ROUTER
// ============================================================================

/// Create the rank router (mounted at `/api/note-order`).
pub fn create_router(orders: Arc<OrderService>) -> Router {
    let state = Arc::new(NoteOrderState::new(orders));

    Router::new()
        .route("/", get(list_orders))
        .route("/revision-notes", get(revision_notes))
        .route("/bulk-update", post(bulk_update))
        .route("/initialize", post(initialize))
        .route("/:noteId", put(set_order).delete(remove_order))
        .with_state(state)
}

/// The `/order/*` routes merged into the note router.
pub fn create_alias_router(orders: Arc<OrderService>) -> Router {
    let state = Arc::new(NoteOrderState::new(orders));

    Router::new()
        .route("/order/revision", get(revision_notes))
        .route("/order/bulk-update", post(bulk_update))
        .route("/order/initialize", post(initialize))
        .with_state(state)
}
