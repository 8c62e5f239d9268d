//! notekeep Test Utilities
//!
//! Shared test infrastructure for the notekeep workspace:
//! - Proptest generators for notes, drafts and rank entries
//! - Fixtures for common ordering scenarios
//! - Assertions over `NotekeepResult`

// Re-export the in-memory store from its source crate
pub use notekeep_storage::InMemoryStorage;

// Re-export core types for convenience
pub use notekeep_core::{
    EntityKind, Note, NoteDraft, NoteId, NoteKind, NoteOrder, NotekeepError, NotekeepResult,
    OrderAssignment, Priority, Rank, StorageError, Timestamp, ValidationError,
};

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Fixed reference instant for deterministic timestamps (2023-11-14T22:13:20Z).
pub const EPOCH_SECS: i64 = 1_700_000_000;

/// Timestamp `secs` seconds after [`EPOCH_SECS`].
pub fn at(secs: i64) -> Timestamp {
    DateTime::from_timestamp(EPOCH_SECS + secs, 0).unwrap_or_else(Utc::now)
}

// ============================================================================
// GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for notekeep types.

    use super::*;
    use proptest::prelude::*;

    /// Generate a random note id.
    pub fn arb_note_id() -> impl Strategy<Value = NoteId> {
        any::<[u8; 16]>().prop_map(Uuid::from_bytes)
    }

    /// Generate a Timestamp within 2020-2030.
    pub fn arb_timestamp() -> impl Strategy<Value = Timestamp> {
        (1577836800i64..1893456000i64)
            .prop_map(|secs| DateTime::from_timestamp(secs, 0).unwrap_or_else(Utc::now))
    }

    pub fn arb_priority() -> impl Strategy<Value = Priority> {
        prop::sample::select(Priority::ALL.to_vec())
    }

    pub fn arb_tag() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9-]{0,19}"
    }

    /// Generate a draft that passes `NoteDraft::normalize` unchanged.
    pub fn arb_note_draft() -> impl Strategy<Value = NoteDraft> {
        (
            "[A-Za-z0-9][A-Za-z0-9 ]{0,40}[A-Za-z0-9]",
            "[A-Za-z0-9 .,!?]{1,300}",
            "[a-z]{1,12}",
            prop::option::of(prop::collection::vec(arb_tag(), 0..5)),
            prop::option::of(arb_priority()),
            prop::option::of(any::<bool>()),
        )
            .prop_filter("content must not be blank", |(_, content, ..)| {
                !content.trim().is_empty()
            })
            .prop_map(|(title, content, category, tags, priority, is_revision)| NoteDraft {
                title,
                content,
                category,
                tags,
                priority,
                is_revision,
                ..NoteDraft::default()
            })
    }

    /// Generate a stored note.
    pub fn arb_note() -> impl Strategy<Value = Note> {
        (arb_note_id(), arb_note_draft(), arb_timestamp())
            .prop_map(|(id, draft, created_at)| Note::create(id, draft, created_at))
    }

    /// Generate a rank entry for the given note.
    pub fn arb_note_order(note_id: NoteId) -> impl Strategy<Value = NoteOrder> {
        (-1_000i64..1_000, arb_timestamp())
            .prop_map(move |(order, now)| NoteOrder::new(note_id, order, now))
    }

    /// Generate a batch of assignments over `ids`, duplicates allowed.
    pub fn arb_assignments(ids: Vec<NoteId>) -> impl Strategy<Value = Vec<OrderAssignment>> {
        let len = ids.len().max(1);
        prop::collection::vec((0..len, -1_000i64..1_000), 0..30).prop_map(move |picks| {
            picks
                .into_iter()
                .filter_map(|(i, order)| {
                    ids.get(i).map(|note_id| OrderAssignment {
                        note_id: *note_id,
                        order,
                    })
                })
                .collect()
        })
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built notes for common ordering scenarios.

    use super::*;

    /// A valid draft with the given title.
    pub fn draft(title: &str) -> NoteDraft {
        NoteDraft {
            title: title.to_string(),
            content: format!("{title} content"),
            category: "general".to_string(),
            ..NoteDraft::default()
        }
    }

    /// A revision note created `secs` after the reference instant.
    pub fn revision_note(title: &str, secs: i64) -> Note {
        Note::create(Uuid::now_v7(), draft(title), at(secs))
    }

    /// A non-revision note created `secs` after the reference instant.
    pub fn plain_note(title: &str, secs: i64) -> Note {
        let mut note = revision_note(title, secs);
        note.is_revision = false;
        note
    }

    /// Notes A (t=1), B (t=2), C (t=0) with ranks A=5 and C=2.
    /// Resolves to `[C, A, B]`.
    pub fn ranked_scenario() -> (Vec<Note>, Vec<NoteOrder>) {
        let a = revision_note("A", 1);
        let b = revision_note("B", 2);
        let c = revision_note("C", 0);
        let orders = vec![NoteOrder::new(a.id, 5, at(10)), NoteOrder::new(c.id, 2, at(10))];
        (vec![a, b, c], orders)
    }
}

// ============================================================================
// ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Assertions over notekeep results.

    use super::*;

    /// Assert that a NotekeepResult is Ok.
    #[track_caller]
    pub fn assert_ok<T: std::fmt::Debug>(result: &NotekeepResult<T>) {
        assert!(result.is_ok(), "Expected Ok, got Err: {:?}", result);
    }

    /// Assert that a NotekeepResult is a NotFound storage error.
    #[track_caller]
    pub fn assert_not_found<T: std::fmt::Debug>(result: &NotekeepResult<T>, entity: EntityKind) {
        match result {
            Err(NotekeepError::Storage(StorageError::NotFound { entity: e, .. })) => {
                assert_eq!(*e, entity, "Wrong entity in NotFound error");
            }
            other => panic!("Expected NotFound error for {:?}, got: {:?}", entity, other),
        }
    }

    /// Assert that a NotekeepResult is a Conflict storage error.
    #[track_caller]
    pub fn assert_conflict<T: std::fmt::Debug>(result: &NotekeepResult<T>) {
        match result {
            Err(NotekeepError::Storage(StorageError::Conflict { .. })) => {}
            other => panic!("Expected Conflict error, got: {:?}", other),
        }
    }

    /// Assert that a NotekeepResult is a validation error on `field`.
    #[track_caller]
    pub fn assert_validation_error<T: std::fmt::Debug>(result: &NotekeepResult<T>, field: &str) {
        match result {
            Err(NotekeepError::Validation(err)) => {
                assert_eq!(err.field(), field, "Wrong field in validation error");
            }
            other => panic!("Expected Validation error on {}, got: {:?}", field, other),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
