//! Async storage traits.
//!
//! Notes and rank entries live in separate stores; the ordering layer merges
//! them on read. Implementations must make each single-entry write atomic and
//! should apply a bulk batch all-or-nothing where the backend allows it.

use ::async_trait::async_trait;
use notekeep_core::{
    Note, NoteId, NoteOrder, NotekeepResult, OrderAssignment, Rank, Timestamp,
};

use crate::{NotePage, NoteQuery, NoteStatistics};

/// Canonical note storage.
#[async_trait]
pub trait NoteStore: Send + Sync {
    // ========================================================================
    // NOTE OPERATIONS
    // ========================================================================

    /// Insert a new note.
    async fn note_insert(&self, note: &Note) -> NotekeepResult<()>;

    /// Get a note by ID.
    async fn note_get(&self, id: NoteId) -> NotekeepResult<Option<Note>>;

    /// Replace a stored note. Fails with `NotFound` if it does not exist.
    async fn note_update(&self, note: &Note) -> NotekeepResult<()>;

    /// Delete a note. Returns whether a note was removed.
    async fn note_delete(&self, id: NoteId) -> NotekeepResult<bool>;

    /// Filtered page of notes, newest `updated_at` first.
    async fn note_list(&self, query: &NoteQuery) -> NotekeepResult<NotePage>;

    /// All revision notes, oldest `created_at` first.
    async fn note_list_revision(&self) -> NotekeepResult<Vec<Note>>;

    /// Distinct categories, sorted.
    async fn note_categories(&self) -> NotekeepResult<Vec<String>>;

    /// Distinct tags across all notes, sorted.
    async fn note_tags(&self) -> NotekeepResult<Vec<String>>;

    /// Aggregate counts.
    async fn note_statistics(&self) -> NotekeepResult<NoteStatistics>;
}

/// Side table of explicit ranks, at most one per note.
#[async_trait]
pub trait OrderStore: Send + Sync {
    // ========================================================================
    // RANK OPERATIONS
    // ========================================================================

    /// All rank entries, lowest rank first.
    async fn order_list(&self) -> NotekeepResult<Vec<NoteOrder>>;

    /// Get the entry for one note.
    async fn order_get(&self, note_id: NoteId) -> NotekeepResult<Option<NoteOrder>>;

    /// Create or overwrite the entry for one note and return it.
    async fn order_upsert(
        &self,
        note_id: NoteId,
        order: Rank,
        now: Timestamp,
    ) -> NotekeepResult<NoteOrder>;

    /// Upsert every assignment in submission order; a later assignment for the
    /// same note overwrites an earlier one. Returns the number submitted.
    async fn order_upsert_many(
        &self,
        assignments: &[OrderAssignment],
        now: Timestamp,
    ) -> NotekeepResult<usize>;

    /// Insert fresh entries. Fails with `Conflict` if any note already has one.
    async fn order_insert_many(&self, orders: &[NoteOrder]) -> NotekeepResult<usize>;

    /// Delete the entry for one note. Returns whether an entry was removed.
    async fn order_delete(&self, note_id: NoteId) -> NotekeepResult<bool>;
}

/// A complete backend: both stores plus lifecycle hooks.
#[async_trait]
pub trait Storage: NoteStore + OrderStore {
    /// Short name used in logs and health output.
    fn backend_name(&self) -> &'static str;

    /// Check the backend is reachable.
    async fn ping(&self) -> NotekeepResult<()>;

    /// Release backend resources. Further calls may fail.
    async fn close(&self);
}
