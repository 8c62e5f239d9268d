//! Note-related API types

use notekeep_core::{Note, NoteDraft, NoteId, Priority, ResolvedNote, ValidationError};
use notekeep_storage::NoteStatistics;
use serde::{Deserialize, Serialize};

/// Body of `POST /notes` and `PUT /notes/:id`.
///
/// Every field is optional at the wire level so that a missing required
/// field is reported by name instead of as a JSON error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NotePayload {
    /// Required, at most 200 characters
    pub title: Option<String>,
    /// Required, at most 10000 characters
    pub content: Option<String>,
    /// Required, at most 100 characters
    pub category: Option<String>,
    /// Each tag at most 50 characters
    pub tags: Option<Vec<String>>,
    /// Defaults to "javascript"
    #[serde(alias = "language")]
    pub programming_language: Option<String>,
    /// At most 500 characters
    pub description: Option<String>,
    /// Defaults to true
    pub is_revision: Option<bool>,
    /// Defaults to "medium"
    pub priority: Option<Priority>,
    /// At most 20000 characters
    pub code_content: Option<String>,
    /// At most 15000 characters
    pub topic_content: Option<String>,
}

impl NotePayload {
    /// Check every field rule and return the normalized draft.
    pub fn into_draft(self) -> Result<NoteDraft, ValidationError> {
        NoteDraft {
            title: self.title.unwrap_or_default(),
            content: self.content.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            tags: self.tags,
            programming_language: self.programming_language,
            description: self.description,
            is_revision: self.is_revision,
            priority: self.priority,
            code_content: self.code_content,
            topic_content: self.topic_content,
        }
        .normalize()
    }
}

/// Query string of `GET /notes`.
///
/// Values stay raw strings here and are parsed by the handler so malformed
/// input gets a field-specific 400.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct ListNotesQuery {
    /// Exact category
    pub category: Option<String>,
    /// "true" selects revision notes, any other value non-revision notes
    pub is_revision: Option<String>,
    /// low, medium or high
    pub priority: Option<String>,
    /// Whitespace-separated terms; a note matches if any term occurs
    pub search: Option<String>,
    /// Page size
    pub limit: Option<String>,
    /// Number of notes to skip
    pub skip: Option<String>,
}

/// Page of notes with their explicit ranks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ListNotesResponse {
    pub notes: Vec<ResolvedNote>,
    /// Matching notes before pagination
    pub total: u64,
    /// 1-based page number derived from skip and limit
    pub page: u64,
    pub total_pages: u64,
}

impl ListNotesResponse {
    pub fn new(notes: Vec<ResolvedNote>, total: u64, limit: usize, skip: usize) -> Self {
        let limit = (limit.max(1)) as u64;
        Self {
            notes,
            total,
            page: skip as u64 / limit + 1,
            total_pages: total.div_ceil(limit),
        }
    }
}

/// Confirmation of a note deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DeleteNoteResponse {
    pub message: String,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub id: NoteId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PriorityStat {
    pub priority: Priority,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CategoryStat {
    pub category: String,
    pub count: u64,
}

/// Aggregate note counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StatsResponse {
    pub total: u64,
    pub revision_count: u64,
    pub priority_stats: Vec<PriorityStat>,
    pub category_stats: Vec<CategoryStat>,
}

impl From<NoteStatistics> for StatsResponse {
    fn from(stats: NoteStatistics) -> Self {
        Self {
            total: stats.total,
            revision_count: stats.revision_count,
            priority_stats: stats
                .priority_counts
                .into_iter()
                .map(|(priority, count)| PriorityStat { priority, count })
                .collect(),
            category_stats: stats
                .category_counts
                .into_iter()
                .map(|(category, count)| CategoryStat { category, count })
                .collect(),
        }
    }
}

/// Revision notes in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RevisionNotesResponse {
    pub notes: Vec<Note>,
    pub total: usize,
}

impl RevisionNotesResponse {
    pub fn new(notes: Vec<Note>) -> Self {
        let total = notes.len();
        Self { notes, total }
    }
}
