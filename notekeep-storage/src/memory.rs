//! In-memory storage backend.
//!
//! Used by tests and by `NOTEKEEP_STORE=memory` for local development.
//! Each bulk rank write happens under a single write lock, so readers never
//! observe half a batch.

use ::async_trait::async_trait;
use notekeep_core::{
    EntityKind, Note, NoteId, NoteOrder, NotekeepError, NotekeepResult, OrderAssignment, Rank,
    StorageError, Timestamp,
};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{NotePage, NoteQuery, NoteStatistics, NoteStore, OrderStore, Storage};

type NoteMap = HashMap<NoteId, Note>;
type OrderMap = HashMap<NoteId, NoteOrder>;

/// In-memory storage for notes and rank entries.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStorage {
    notes: Arc<RwLock<NoteMap>>,
    orders: Arc<RwLock<OrderMap>>,
}

fn poisoned<T>(_: T) -> NotekeepError {
    StorageError::LockPoisoned.into()
}

impl InMemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get count of stored notes.
    pub fn note_count(&self) -> usize {
        self.notes.read().map(|n| n.len()).unwrap_or(0)
    }

    /// Get count of stored rank entries.
    pub fn order_count(&self) -> usize {
        self.orders.read().map(|o| o.len()).unwrap_or(0)
    }

    fn read_notes(&self) -> NotekeepResult<RwLockReadGuard<'_, NoteMap>> {
        self.notes.read().map_err(poisoned)
    }

    fn write_notes(&self) -> NotekeepResult<RwLockWriteGuard<'_, NoteMap>> {
        self.notes.write().map_err(poisoned)
    }

    fn read_orders(&self) -> NotekeepResult<RwLockReadGuard<'_, OrderMap>> {
        self.orders.read().map_err(poisoned)
    }

    fn write_orders(&self) -> NotekeepResult<RwLockWriteGuard<'_, OrderMap>> {
        self.orders.write().map_err(poisoned)
    }
}

fn upsert_entry(orders: &mut OrderMap, note_id: NoteId, order: Rank, now: Timestamp) -> NoteOrder {
    let entry = orders
        .entry(note_id)
        .and_modify(|existing| {
            existing.order = order;
            existing.updated_at = now;
        })
        .or_insert_with(|| NoteOrder::new(note_id, order, now));
    entry.clone()
}

#[async_trait]
impl NoteStore for InMemoryStorage {
    async fn note_insert(&self, note: &Note) -> NotekeepResult<()> {
        let mut notes = self.write_notes()?;
        if notes.contains_key(&note.id) {
            return Err(StorageError::Conflict {
                entity: EntityKind::Note,
                reason: format!("note {} already exists", note.id),
            }
            .into());
        }
        notes.insert(note.id, note.clone());
        Ok(())
    }

    async fn note_get(&self, id: NoteId) -> NotekeepResult<Option<Note>> {
        Ok(self.read_notes()?.get(&id).cloned())
    }

    async fn note_update(&self, note: &Note) -> NotekeepResult<()> {
        let mut notes = self.write_notes()?;
        match notes.get_mut(&note.id) {
            Some(stored) => {
                *stored = note.clone();
                Ok(())
            }
            None => Err(StorageError::NotFound {
                entity: EntityKind::Note,
                id: note.id,
            }
            .into()),
        }
    }

    async fn note_delete(&self, id: NoteId) -> NotekeepResult<bool> {
        Ok(self.write_notes()?.remove(&id).is_some())
    }

    async fn note_list(&self, query: &NoteQuery) -> NotekeepResult<NotePage> {
        let notes = self.read_notes()?;
        let mut matched: Vec<&Note> = notes.values().filter(|n| query.filter.matches(n)).collect();
        matched.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then_with(|| b.id.cmp(&a.id)));
        let total = matched.len() as u64;
        let notes = matched
            .into_iter()
            .skip(query.skip)
            .take(query.limit)
            .cloned()
            .collect();
        Ok(NotePage { notes, total })
    }

    async fn note_list_revision(&self) -> NotekeepResult<Vec<Note>> {
        let notes = self.read_notes()?;
        let mut revision: Vec<Note> = notes.values().filter(|n| n.is_revision).cloned().collect();
        revision.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(revision)
    }

    async fn note_categories(&self) -> NotekeepResult<Vec<String>> {
        let notes = self.read_notes()?;
        let categories: BTreeSet<&String> = notes.values().map(|n| &n.category).collect();
        Ok(categories.into_iter().cloned().collect())
    }

    async fn note_tags(&self) -> NotekeepResult<Vec<String>> {
        let notes = self.read_notes()?;
        let tags: BTreeSet<&String> = notes.values().flat_map(|n| n.tags.iter()).collect();
        Ok(tags.into_iter().cloned().collect())
    }

    async fn note_statistics(&self) -> NotekeepResult<NoteStatistics> {
        let notes = self.read_notes()?;
        Ok(NoteStatistics::from_notes(notes.values()))
    }
}

#[async_trait]
impl OrderStore for InMemoryStorage {
    async fn order_list(&self) -> NotekeepResult<Vec<NoteOrder>> {
        let orders = self.read_orders()?;
        let mut list: Vec<NoteOrder> = orders.values().cloned().collect();
        list.sort_by(|a, b| {
            a.order
                .cmp(&b.order)
                .then_with(|| a.created_at.cmp(&b.created_at))
                .then_with(|| a.note_id.cmp(&b.note_id))
        });
        Ok(list)
    }

    async fn order_get(&self, note_id: NoteId) -> NotekeepResult<Option<NoteOrder>> {
        Ok(self.read_orders()?.get(&note_id).cloned())
    }

    async fn order_upsert(
        &self,
        note_id: NoteId,
        order: Rank,
        now: Timestamp,
    ) -> NotekeepResult<NoteOrder> {
        let mut orders = self.write_orders()?;
        Ok(upsert_entry(&mut orders, note_id, order, now))
    }

    async fn order_upsert_many(
        &self,
        assignments: &[OrderAssignment],
        now: Timestamp,
    ) -> NotekeepResult<usize> {
        let mut orders = self.write_orders()?;
        for assignment in assignments {
            upsert_entry(&mut orders, assignment.note_id, assignment.order, now);
        }
        tracing::debug!(count = assignments.len(), "Applied rank batch");
        Ok(assignments.len())
    }

    async fn order_insert_many(&self, new_orders: &[NoteOrder]) -> NotekeepResult<usize> {
        let mut orders = self.write_orders()?;
        if let Some(existing) = new_orders.iter().find(|o| orders.contains_key(&o.note_id)) {
            return Err(StorageError::Conflict {
                entity: EntityKind::NoteOrder,
                reason: format!("note {} already has a rank", existing.note_id),
            }
            .into());
        }
        for order in new_orders {
            orders.insert(order.note_id, order.clone());
        }
        Ok(new_orders.len())
    }

    async fn order_delete(&self, note_id: NoteId) -> NotekeepResult<bool> {
        Ok(self.write_orders()?.remove(&note_id).is_some())
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> NotekeepResult<()> {
        drop(self.read_notes()?);
        drop(self.read_orders()?);
        Ok(())
    }

    async fn close(&self) {
        tracing::debug!(
            notes = self.note_count(),
            orders = self.order_count(),
            "Closing in-memory store"
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================


// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================
