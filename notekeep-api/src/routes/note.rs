//! Note REST API Routes
//!
//! Axum route handlers for note CRUD, listing, categories, tags and
//! statistics. The `/notes/order/*` aliases of the rank routes are merged in
//! from `note_order`.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use notekeep_core::{new_note_id, now, Note};
use notekeep_storage::{NoteFilter, NoteQuery, Storage};
use std::sync::Arc;

use crate::{
    config::ApiConfig,
    error::{ApiError, ApiResult},
    extractors::{ApiJson, ApiQuery, NoteIdPath},
    services::OrderService,
    types::{DeleteNoteResponse, ListNotesQuery, ListNotesResponse, NotePayload, StatsResponse},
    validation::{parse_priority, Pagination},
};

use super::note_order;

// ============================================================================
// SHARED STATE
// ============================================================================

/// Shared application state for note routes.
#[derive(Clone)]
pub struct NoteState {
    pub store: Arc<dyn Storage>,
    pub orders: Arc<OrderService>,
    pub config: ApiConfig,
}

impl NoteState {
    pub fn new(store: Arc<dyn Storage>, orders: Arc<OrderService>, config: ApiConfig) -> Self {
        Self {
            store,
            orders,
            config,
        }
    }
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// GET /api/notes - List notes with filters and pagination
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/notes",
    tag = "Notes",
    params(ListNotesQuery),
    responses(
        (status = 200, description = "Page of notes, newest update first", body = ListNotesResponse),
        (status = 400, description = "Invalid query", body = ApiError),
    ),
))]
pub async fn list_notes(
    State(state): State<Arc<NoteState>>,
    ApiQuery(params): ApiQuery<ListNotesQuery>,
) -> ApiResult<Json<ListNotesResponse>> {
    let page = Pagination::parse(params.limit.as_deref(), params.skip.as_deref(), &state.config)?;

    let filter = NoteFilter {
        category: params.category.filter(|c| !c.is_empty()),
        is_revision: params.is_revision.map(|v| v == "true"),
        priority: parse_priority(params.priority.as_deref())?,
        search: params.search.filter(|s| !s.trim().is_empty()),
    };

    let result = state
        .store
        .note_list(&NoteQuery {
            filter,
            limit: page.limit,
            skip: page.skip,
        })
        .await?;

    let notes = state.orders.with_ranks(result.notes).await?;
    Ok(Json(ListNotesResponse::new(
        notes,
        result.total,
        page.limit,
        page.skip,
    )))
}

/// GET /api/notes/{id} - Get a note by ID
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/notes/{id}",
    tag = "Notes",
    params(("id" = String, Path, description = "Note ID")),
    responses(
        (status = 200, description = "Note details", body = Note),
        (status = 400, description = "Malformed ID", body = ApiError),
        (status = 404, description = "Note not found", body = ApiError),
    ),
))]
pub async fn get_note(
    State(state): State<Arc<NoteState>>,
    NoteIdPath(id): NoteIdPath,
) -> ApiResult<Json<Note>> {
    let note = state
        .store
        .note_get(id)
        .await?
        .ok_or_else(|| ApiError::note_not_found(id))?;
    Ok(Json(note))
}

/// POST /api/notes - Create a new note
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/api/notes",
    tag = "Notes",
    request_body = NotePayload,
    responses(
        (status = 201, description = "Note created successfully", body = Note),
        (status = 400, description = "Validation failed", body = ApiError),
    ),
))]
pub async fn create_note(
    State(state): State<Arc<NoteState>>,
    ApiJson(payload): ApiJson<NotePayload>,
) -> ApiResult<impl IntoResponse> {
    let draft = payload.into_draft()?;
    let note = Note::create(new_note_id(), draft, now());

    state.store.note_insert(&note).await?;
    tracing::info!(note_id = %note.id, category = %note.category, "Note created");

    Ok((StatusCode::CREATED, Json(note)))
}

/// PUT /api/notes/{id} - Update an existing note
///
/// The body is validated like a create; optional fields it leaves out keep
/// their stored values.
#[cfg_attr(feature = "openapi", utoipa::path(
    put,
    path = "/api/notes/{id}",
    tag = "Notes",
    params(("id" = String, Path, description = "Note ID")),
    request_body = NotePayload,
    responses(
        (status = 200, description = "Note updated successfully", body = Note),
        (status = 400, description = "Validation failed or malformed ID", body = ApiError),
        (status = 404, description = "Note not found", body = ApiError),
    ),
))]
pub async fn update_note(
    State(state): State<Arc<NoteState>>,
    NoteIdPath(id): NoteIdPath,
    ApiJson(payload): ApiJson<NotePayload>,
) -> ApiResult<Json<Note>> {
    let draft = payload.into_draft()?;

    let mut note = state
        .store
        .note_get(id)
        .await?
        .ok_or_else(|| ApiError::note_not_found(id))?;
    note.apply(draft, now());

    state.store.note_update(&note).await?;
    tracing::info!(note_id = %id, "Note updated");

    Ok(Json(note))
}

/// DELETE /api/notes/{id} - Delete a note
#[cfg_attr(feature = "openapi", utoipa::path(
    delete,
    path = "/api/notes/{id}",
    tag = "Notes",
    params(("id" = String, Path, description = "Note ID")),
    responses(
        (status = 200, description = "Note deleted successfully", body = DeleteNoteResponse),
        (status = 400, description = "Malformed ID", body = ApiError),
        (status = 404, description = "Note not found", body = ApiError),
    ),
))]
pub async fn delete_note(
    State(state): State<Arc<NoteState>>,
    NoteIdPath(id): NoteIdPath,
) -> ApiResult<Json<DeleteNoteResponse>> {
    if !state.store.note_delete(id).await? {
        return Err(ApiError::note_not_found(id));
    }
    // The note's rank entry, if any, is left in place.
    tracing::info!(note_id = %id, "Note deleted");

    Ok(Json(DeleteNoteResponse {
        message: "Note deleted successfully".to_string(),
        id,
    }))
}

/// GET /api/notes/categories/list - Distinct categories
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/notes/categories/list",
    tag = "Notes",
    responses((status = 200, description = "Sorted distinct categories", body = Vec<String>)),
))]
pub async fn list_categories(State(state): State<Arc<NoteState>>) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(state.store.note_categories().await?))
}

/// GET /api/notes/tags/list - Distinct tags
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/notes/tags/list",
    tag = "Notes",
    responses((status = 200, description = "Sorted distinct tags", body = Vec<String>)),
))]
pub async fn list_tags(State(state): State<Arc<NoteState>>) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(state.store.note_tags().await?))
}

/// GET /api/notes/stats/overview - Aggregate counts
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/api/notes/stats/overview",
    tag = "Notes",
    responses((status = 200, description = "Note statistics", body = StatsResponse)),
))]
pub async fn stats_overview(State(state): State<Arc<NoteState>>) -> ApiResult<Json<StatsResponse>> {
    let stats = state.store.note_statistics().await?;
    Ok(Json(stats.into()))
}

// ============================================================================
// ROUTER
// ============================================================================

/// Create the note router (mounted at `/api/notes`).
pub fn create_router(
    store: Arc<dyn Storage>,
    orders: Arc<OrderService>,
    config: ApiConfig,
) -> Router {
    let state = Arc::new(NoteState::new(store, orders.clone(), config));

    Router::new()
        .route("/", get(list_notes).post(create_note))
        .route("/categories/list", get(list_categories))
        .route("/tags/list", get(list_tags))
        .route("/stats/overview", get(stats_overview))
        .route("/:id", get(get_note).put(update_note).delete(delete_note))
        .with_state(state)
        .merge(note_order::create_alias_router(orders))
}
