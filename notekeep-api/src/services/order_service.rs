//! Order Service
//!
//! Revision ordering on top of the storage traits: merges notes with their
//! rank entries on read and applies the rank mutators on write.

use notekeep_core::{
    attach_ranks, now, plan_initialization, resolve_order, Note, NoteId, NoteOrder,
    OrderAssignment, Rank, ResolvedNote,
};
use notekeep_storage::Storage;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::ApiResult;

/// Outcome of an initialization pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitializeOutcome {
    pub new_orders_created: usize,
    pub total_revision_notes: usize,
}

/// Ordering operations over a shared store.
pub struct OrderService {
    store: Arc<dyn Storage>,
    /// Serializes initialization passes so two concurrent passes cannot both
    /// plan ranks from the same snapshot.
    init_lock: Mutex<()>,
}

impl OrderService {
    pub fn new(store: Arc<dyn Storage>) -> Self {
        Self {
            store,
            init_lock: Mutex::new(()),
        }
    }

    /// All revision notes: ranked first by rank, then unranked by creation.
    pub async fn revision_notes(&self) -> ApiResult<Vec<ResolvedNote>> {
        let notes = self.store.note_list_revision().await?;
        let orders = self.store.order_list().await?;
        Ok(resolve_order(notes, &orders))
    }

    /// Attach ranks to notes without reordering them.
    pub async fn with_ranks(&self, notes: Vec<Note>) -> ApiResult<Vec<ResolvedNote>> {
        if notes.is_empty() {
            return Ok(Vec::new());
        }
        let orders = self.store.order_list().await?;
        Ok(attach_ranks(notes, &orders))
    }

    /// Every rank entry, lowest rank first.
    pub async fn list_orders(&self) -> ApiResult<Vec<NoteOrder>> {
        Ok(self.store.order_list().await?)
    }

    /// Upsert a batch of ranks. Returns the number submitted.
    pub async fn bulk_update(&self, assignments: &[OrderAssignment]) -> ApiResult<usize> {
        let count = self.store.order_upsert_many(assignments, now()).await?;
        tracing::info!(count, "Updated note orders");
        Ok(count)
    }

    /// Create or overwrite one note's rank.
    pub async fn set_order(&self, note_id: NoteId, order: Rank) -> ApiResult<NoteOrder> {
        let entry = self.store.order_upsert(note_id, order, now()).await?;
        tracing::debug!(%note_id, order, "Set note order");
        Ok(entry)
    }

    /// Remove one note's rank. Absence is not an error.
    pub async fn remove_order(&self, note_id: NoteId) -> ApiResult<()> {
        let removed = self.store.order_delete(note_id).await?;
        tracing::debug!(%note_id, removed, "Removed note order");
        Ok(())
    }

    /// Give every unranked revision note a rank above the current maximum,
    /// in creation order. Running it twice creates nothing the second time.
    pub async fn initialize(&self) -> ApiResult<InitializeOutcome> {
        let _guard = self.init_lock.lock().await;

        let notes = self.store.note_list_revision().await?;
        let orders = self.store.order_list().await?;
        let plan = plan_initialization(&notes, &orders, now())?;

        if !plan.new_orders.is_empty() {
            self.store.order_insert_many(&plan.new_orders).await?;
        }

        tracing::info!(
            created = plan.new_orders.len(),
            total = plan.total_revision_notes,
            "Initialized note orders"
        );

        Ok(InitializeOutcome {
            new_orders_created: plan.new_orders.len(),
            total_revision_notes: plan.total_revision_notes,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
