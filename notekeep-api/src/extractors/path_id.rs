//! Path extractor for note identifiers.
//!
//! Unlike `Path<Uuid>`, `NoteIdPath` answers a malformed id with the API's
//! structured 400 ("Invalid ID format") instead of axum's plain-text
//! rejection.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use notekeep_core::NoteId;

use crate::error::ApiError;
use crate::validation::parse_note_id;

/// Extractor for the single `:id` / `:noteId` segment of a route.
///
/// # Example
///
/// ```rust,ignore
/// async fn get_note(NoteIdPath(id): NoteIdPath) -> ApiResult<Json<Note>> {
///     // id is a parsed NoteId
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteIdPath(pub NoteId);

#[async_trait]
impl<S> FromRequestParts<S> for NoteIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_input(format!("Invalid path parameter: {}", e)))?;

        parse_note_id(&raw).map(NoteIdPath)
    }
}
