//! Revision ordering.
//!
//! Ranks live apart from notes, so every read merges the two. The merge is a
//! three-tier comparison:
//!
//! 1. ranked notes before unranked notes
//! 2. ranked notes by rank ascending (equal ranks by `created_at`)
//! 3. unranked notes by `created_at` ascending
//!
//! The sort is stable, so remaining ties keep their input order.

use crate::{Note, NoteId, NoteOrder, Rank, Timestamp, ValidationError};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// A note paired with its explicit rank, if it has one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ResolvedNote {
    #[serde(flatten)]
    pub note: Note,
    #[serde(rename = "customOrder", skip_serializing_if = "Option::is_none")]
    pub rank: Option<Rank>,
}

/// Index rank entries by note id.
pub fn rank_index(orders: &[NoteOrder]) -> HashMap<NoteId, Rank> {
    orders.iter().map(|o| (o.note_id, o.order)).collect()
}

/// Compare two `(rank, created_at)` keys under the revision ordering.
pub fn compare_ranked(
    a_rank: Option<Rank>,
    a_created: Timestamp,
    b_rank: Option<Rank>,
    b_created: Timestamp,
) -> Ordering {
    match (a_rank, b_rank) {
        (Some(a), Some(b)) => a.cmp(&b).then_with(|| a_created.cmp(&b_created)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a_created.cmp(&b_created),
    }
}

/// Pair every note with its rank without reordering.
pub fn attach_ranks(notes: Vec<Note>, orders: &[NoteOrder]) -> Vec<ResolvedNote> {
    let ranks = rank_index(orders);
    notes
        .into_iter()
        .map(|note| {
            let rank = ranks.get(&note.id).copied();
            ResolvedNote { note, rank }
        })
        .collect()
}

/// Merge notes with their rank entries and sort them into revision order.
/// Rank entries for notes not in `notes` are ignored.
pub fn resolve_order(notes: Vec<Note>, orders: &[NoteOrder]) -> Vec<ResolvedNote> {
    let mut resolved = attach_ranks(notes, orders);
    resolved.sort_by(|a, b| {
        compare_ranked(a.rank, a.note.created_at, b.rank, b.note.created_at)
    });
    resolved
}

/// Outcome of planning an initialization pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitializationPlan {
    /// Entries to insert, in creation order of their notes.
    pub new_orders: Vec<NoteOrder>,
    /// Number of revision notes considered.
    pub total_revision_notes: usize,
}

/// Give every revision note that lacks a rank a fresh one.
///
/// New ranks start just above the current maximum (or at 0 when no entry
/// exists) and increase by one in `created_at` order. Existing entries are
/// never touched.
pub fn plan_initialization(
    notes: &[Note],
    orders: &[NoteOrder],
    now: Timestamp,
) -> Result<InitializationPlan, ValidationError> {
    let mut revision: Vec<&Note> = notes.iter().filter(|n| n.is_revision).collect();
    revision.sort_by_key(|n| n.created_at);

    let ranked: HashSet<NoteId> = orders.iter().map(|o| o.note_id).collect();
    let mut next = orders.iter().map(|o| o.order).max().unwrap_or(-1);

    let mut new_orders = Vec::new();
    for note in &revision {
        if ranked.contains(&note.id) {
            continue;
        }
        next = next.checked_add(1).ok_or_else(|| ValidationError::InvalidValue {
            field: "order".to_string(),
            reason: "no rank left above the current maximum".to_string(),
        })?;
        new_orders.push(NoteOrder::new(note.id, next, now));
    }

    Ok(InitializationPlan {
        new_orders,
        total_revision_notes: revision.len(),
    })
}

// ============================================================================
// TESTS
// ============================================================================


// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================

#[cfg(test)]
mod prop_tests {
    use super::*;
    use crate::{new_note_id, NoteDraft};
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    fn at(secs: i64) -> Timestamp {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    /// Notes with random creation times, each with an optional rank.
    fn arb_corpus() -> impl Strategy<Value = (Vec<Note>, Vec<NoteOrder>)> {
        prop::collection::vec((0i64..1_000, prop::option::of(-50i64..50)), 0..40).prop_map(
            |specs| {
                let mut notes = Vec::new();
                let mut orders = Vec::new();
                for (created, rank) in specs {
                    let note = Note::create(
                        new_note_id(),
                        NoteDraft {
                            title: "t".to_string(),
                            content: "c".to_string(),
                            category: "k".to_string(),
                            ..NoteDraft::default()
                        },
                        at(created),
                    );
                    if let Some(rank) = rank {
                        orders.push(NoteOrder::new(note.id, rank, at(0)));
                    }
                    notes.push(note);
                }
                (notes, orders)
            },
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Ranked notes precede unranked ones, ranked ascend by rank, unranked
        /// ascend by creation time.
        #[test]
        fn prop_resolver_three_tiers((notes, orders) in arb_corpus()) {
            let count = notes.len();
            let resolved = resolve_order(notes, &orders);
            prop_assert_eq!(resolved.len(), count);

            let first_unranked = resolved.iter().position(|r| r.rank.is_none()).unwrap_or(count);
            prop_assert!(resolved[first_unranked..].iter().all(|r| r.rank.is_none()));

            for pair in resolved[..first_unranked].windows(2) {
                prop_assert!(pair[0].rank <= pair[1].rank);
            }
            for pair in resolved[first_unranked..].windows(2) {
                prop_assert!(pair[0].note.created_at <= pair[1].note.created_at);
            }
        }

        /// After applying a plan every revision note has exactly one entry and a
        /// second plan has nothing to do.
        #[test]
        fn prop_initialization_is_complete_and_idempotent((notes, orders) in arb_corpus()) {
            let plan = plan_initialization(&notes, &orders, at(2_000)).unwrap();
            prop_assert_eq!(plan.total_revision_notes, notes.len());

            let mut all = orders.clone();
            all.extend(plan.new_orders.iter().cloned());
            let ids: HashSet<NoteId> = all.iter().map(|o| o.note_id).collect();
            prop_assert_eq!(ids.len(), all.len());
            prop_assert!(notes.iter().all(|n| ids.contains(&n.id)));

            let again = plan_initialization(&notes, &all, at(3_000)).unwrap();
            prop_assert!(again.new_orders.is_empty());
        }

        /// New ranks are strictly increasing and above every pre-existing rank.
        #[test]
        fn prop_initialization_is_monotonic((notes, orders) in arb_corpus()) {
            let plan = plan_initialization(&notes, &orders, at(2_000)).unwrap();
            let max = orders.iter().map(|o| o.order).max().unwrap_or(-1);
            for pair in plan.new_orders.windows(2) {
                prop_assert!(pair[0].order < pair[1].order);
            }
            prop_assert!(plan.new_orders.iter().all(|o| o.order > max));
        }
    }
}
