//! notekeep Storage - Storage Traits and In-Memory Implementation
//!
//! Defines the storage abstraction for notes and rank entries.
//! The Postgres implementation lives in notekeep-api.

pub mod async_trait;
pub mod memory;

pub use async_trait::{NoteStore, OrderStore, Storage};
pub use memory::InMemoryStorage;

use notekeep_core::{Note, Priority};

// ============================================================================
// QUERY TYPES
// ============================================================================

/// Filters for note listing. Every set field must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    /// Exact category
    pub category: Option<String>,
    /// Revision flag
    pub is_revision: Option<bool>,
    /// Exact priority
    pub priority: Option<Priority>,
    /// Free text; a note matches when any term occurs in its title, content,
    /// topic content or tags (case-insensitive)
    pub search: Option<String>,
}

impl NoteFilter {
    /// Lowercased, whitespace-separated search terms.
    pub fn search_terms(&self) -> Vec<String> {
        self.search
            .as_deref()
            .map(|s| s.split_whitespace().map(str::to_lowercase).collect())
            .unwrap_or_default()
    }

    /// Evaluate the filter against one note.
    pub fn matches(&self, note: &Note) -> bool {
        if let Some(category) = &self.category {
            if &note.category != category {
                return false;
            }
        }
        if let Some(is_revision) = self.is_revision {
            if note.is_revision != is_revision {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if note.priority != priority {
                return false;
            }
        }
        let terms = self.search_terms();
        if terms.is_empty() {
            return true;
        }
        let mut haystack = vec![note.title.to_lowercase(), note.content.to_lowercase()];
        if let Some(topic) = &note.topic_content {
            haystack.push(topic.to_lowercase());
        }
        haystack.extend(note.tags.iter().map(|t| t.to_lowercase()));
        terms
            .iter()
            .any(|term| haystack.iter().any(|field| field.contains(term.as_str())))
    }
}

/// Filter plus offset pagination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteQuery {
    pub filter: NoteFilter,
    pub limit: usize,
    pub skip: usize,
}

/// One page of notes plus the unpaginated match count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotePage {
    pub notes: Vec<Note>,
    pub total: u64,
}

// ============================================================================
// STATISTICS
// ============================================================================

/// Aggregate counts over all notes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteStatistics {
    pub total: u64,
    pub revision_count: u64,
    /// Present priorities, low to high
    pub priority_counts: Vec<(Priority, u64)>,
    /// Categories by count descending, then name
    pub category_counts: Vec<(String, u64)>,
}

impl NoteStatistics {
    /// Fold statistics over a set of notes.
    pub fn from_notes<'a>(notes: impl IntoIterator<Item = &'a Note>) -> Self {
        let mut stats = NoteStatistics::default();
        let mut by_priority = std::collections::BTreeMap::<Priority, u64>::new();
        let mut by_category = std::collections::HashMap::<String, u64>::new();
        for note in notes {
            stats.total += 1;
            if note.is_revision {
                stats.revision_count += 1;
            }
            *by_priority.entry(note.priority).or_default() += 1;
            *by_category.entry(note.category.clone()).or_default() += 1;
        }
        stats.priority_counts = by_priority.into_iter().collect();
        let mut categories: Vec<(String, u64)> = by_category.into_iter().collect();
        sort_category_counts(&mut categories);
        stats.category_counts = categories;
        stats
    }
}

/// Order category counts by count descending, then name ascending.
pub fn sort_category_counts(counts: &mut [(String, u64)]) {
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
}

// ============================================================================
// TESTS
// ============================================================================
