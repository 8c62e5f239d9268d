//! OpenAPI Specification for the notekeep API
//!
//! Generated with utoipa from the route annotations and the request and
//! response types.

use utoipa::OpenApi;

use crate::error::{ApiError, ErrorCode};
use crate::routes::health::{HealthReport, HealthStatus, StoreHealth};
use crate::routes::{health, note, note_order};
use crate::types::*;

use notekeep_core::{Note, NoteKind, NoteOrder, OrderAssignment, Priority, ResolvedNote};

/// OpenAPI document for the notekeep API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "notekeep API",
        version = "0.1.0",
        description = "Study notes with a user-defined revision order",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:5000", description = "Local Development")
    ),
    tags(
        (name = "Notes", description = "Note CRUD, listing and statistics"),
        (name = "Note Order", description = "Revision ordering of notes"),
        (name = "Health", description = "Liveness and readiness probes")
    ),
    paths(
        // Notes
        note::list_notes,
        note::get_note,
        note::create_note,
        note::update_note,
        note::delete_note,
        note::list_categories,
        note::list_tags,
        note::stats_overview,
        // Note order
        note_order::list_orders,
        note_order::revision_notes,
        note_order::bulk_update,
        note_order::set_order,
        note_order::remove_order,
        note_order::initialize,
        // Health
        health::ping,
        health::liveness,
        health::readiness,
    ),
    components(schemas(
        // Errors
        ApiError,
        ErrorCode,
        // Domain
        Note,
        NoteKind,
        NoteOrder,
        OrderAssignment,
        Priority,
        ResolvedNote,
        // Requests and responses
        NotePayload,
        ListNotesResponse,
        DeleteNoteResponse,
        StatsResponse,
        PriorityStat,
        CategoryStat,
        RevisionNotesResponse,
        BulkOrderRequest,
        BulkOrderResponse,
        SetOrderRequest,
        InitializeOrdersResponse,
        MessageResponse,
        // Health
        HealthReport,
        HealthStatus,
        StoreHealth,
    ))
)]
pub struct ApiDoc;
