//! Core entity structures

use crate::{NoteDraft, NoteId, NoteKind, Priority, Rank, Timestamp};
use serde::{Deserialize, Serialize};

/// Language recorded when a note does not name one.
pub const DEFAULT_PROGRAMMING_LANGUAGE: &str = "javascript";

/// Note - a single study/revision document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Note {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub category: String,
    pub programming_language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_revision: bool,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_content: Option<String>,
    #[serde(rename = "type")]
    pub kind: NoteKind,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub created_at: Timestamp,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub updated_at: Timestamp,
}

impl Note {
    /// Build a new note from an already normalized draft, filling defaults
    /// for every optional field the draft leaves out.
    pub fn create(id: NoteId, draft: NoteDraft, now: Timestamp) -> Self {
        Self {
            id,
            title: draft.title,
            content: draft.content,
            tags: draft.tags.unwrap_or_default(),
            category: draft.category,
            programming_language: draft
                .programming_language
                .unwrap_or_else(|| DEFAULT_PROGRAMMING_LANGUAGE.to_string()),
            description: draft.description,
            is_revision: draft.is_revision.unwrap_or(true),
            priority: draft.priority.unwrap_or_default(),
            code_content: draft.code_content,
            topic_content: draft.topic_content,
            kind: NoteKind::Note,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge a normalized draft into this note. Required fields are always
    /// replaced; optional fields are replaced only when the draft carries
    /// them. `id`, `kind` and `created_at` never change.
    pub fn apply(&mut self, draft: NoteDraft, now: Timestamp) {
        self.title = draft.title;
        self.content = draft.content;
        self.category = draft.category;
        if let Some(tags) = draft.tags {
            self.tags = tags;
        }
        if let Some(language) = draft.programming_language {
            self.programming_language = language;
        }
        if draft.description.is_some() {
            self.description = draft.description;
        }
        if let Some(is_revision) = draft.is_revision {
            self.is_revision = is_revision;
        }
        if let Some(priority) = draft.priority {
            self.priority = priority;
        }
        if draft.code_content.is_some() {
            self.code_content = draft.code_content;
        }
        if draft.topic_content.is_some() {
            self.topic_content = draft.topic_content;
        }
        self.updated_at = now;
    }
}

/// Rank entry - the explicit position of one note in the revision ordering.
/// At most one entry exists per note; several notes may share a rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NoteOrder {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub note_id: NoteId,
    pub order: Rank,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub created_at: Timestamp,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub updated_at: Timestamp,
}

impl NoteOrder {
    pub fn new(note_id: NoteId, order: Rank, now: Timestamp) -> Self {
        Self {
            note_id,
            order,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A requested `(note, rank)` pair for the order mutators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct OrderAssignment {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub note_id: NoteId,
    pub order: Rank,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::new_note_id;
    use chrono::{TimeZone, Utc};

    fn draft() -> NoteDraft {
        NoteDraft {
            title: "Borrow checker".to_string(),
            content: "Shared xor mutable".to_string(),
            category: "rust".to_string(),
            ..NoteDraft::default()
        }
    }

    #[test]
    fn test_create_applies_defaults() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let note = Note::create(new_note_id(), draft(), now);
        assert_eq!(note.programming_language, DEFAULT_PROGRAMMING_LANGUAGE);
        assert!(note.is_revision);
        assert_eq!(note.priority, Priority::Medium);
        assert!(note.tags.is_empty());
        assert_eq!(note.kind, NoteKind::Note);
        assert_eq!(note.created_at, note.updated_at);
    }

    #[test]
    fn test_apply_keeps_absent_optionals() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let mut note = Note::create(
            new_note_id(),
            NoteDraft {
                tags: Some(vec!["ownership".to_string()]),
                priority: Some(Priority::High),
                is_revision: Some(false),
                ..draft()
            },
            t0,
        );
        note.apply(
            NoteDraft {
                title: "Lifetimes".to_string(),
                ..draft()
            },
            t1,
        );
        assert_eq!(note.title, "Lifetimes");
        assert_eq!(note.tags, vec!["ownership".to_string()]);
        assert_eq!(note.priority, Priority::High);
        assert!(!note.is_revision);
        assert_eq!(note.created_at, t0);
        assert_eq!(note.updated_at, t1);
    }

    #[test]
    fn test_apply_blank_description_overwrites() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut note = Note::create(
            new_note_id(),
            NoteDraft {
                description: Some("moves and copies".to_string()),
                ..draft()
            },
            now,
        );
        let blank = NoteDraft {
            description: Some("   ".to_string()),
            ..draft()
        }
        .normalize()
        .unwrap();
        note.apply(blank, now);
        assert_eq!(note.description.as_deref(), Some(""));
    }

    #[test]
    fn test_note_serializes_camel_case_with_type() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let note = Note::create(new_note_id(), draft(), now);
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["type"], "note");
        assert_eq!(json["isRevision"], true);
        assert_eq!(json["programmingLanguage"], "javascript");
        assert!(json.get("description").is_none());
        assert!(json.get("createdAt").is_some());
    }
}
