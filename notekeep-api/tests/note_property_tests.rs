//! Property-Based Tests for the Notes API
//!
//! **Property 1: A valid draft is stored as sent**
//!
//! Any draft that passes the field rules is created with 201 and reads
//! back with the same title, content, category, tags and priority.
//!
//! **Property 2: Unknown ids are not found**
//!
//! GET of an id that was never created answers 404.

use axum::http::{Method, StatusCode};
use notekeep_api::NotePayload;
use notekeep_test_utils::generators::{arb_note_draft, arb_note_id};
use proptest::prelude::*;
use tokio::runtime::Runtime;

#[path = "support/http.rs"]
mod http_support;
use http_support::{create_note, send, test_app};

fn test_runtime() -> Result<Runtime, TestCaseError> {
    Runtime::new().map_err(|e| TestCaseError::fail(format!("Failed to create runtime: {}", e)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(30))]

    #[test]
    fn prop_created_note_matches_draft(draft in arb_note_draft()) {
        let rt = test_runtime()?;
        rt.block_on(async {
            let payload = NotePayload {
                title: Some(draft.title.clone()),
                content: Some(draft.content.clone()),
                category: Some(draft.category.clone()),
                tags: draft.tags.clone(),
                is_revision: draft.is_revision,
                priority: draft.priority,
                ..NotePayload::default()
            };
            let body = serde_json::to_value(&payload).map_err(|e| TestCaseError::fail(e.to_string()))?;

            let app = test_app();
            let id = create_note(&app, body).await.map_err(TestCaseError::fail)?;
            let (status, note) = send(&app, Method::GET, &format!("/api/notes/{}", id), None)
                .await
                .map_err(TestCaseError::fail)?;

            prop_assert_eq!(status, StatusCode::OK);
            prop_assert_eq!(note["title"].as_str(), Some(draft.title.as_str()));
            prop_assert_eq!(note["content"].as_str(), Some(draft.content.as_str()));
            prop_assert_eq!(note["category"].as_str(), Some(draft.category.as_str()));
            prop_assert_eq!(&note["tags"], &serde_json::json!(draft.tags.unwrap_or_default()));
            prop_assert_eq!(
                &note["priority"],
                &serde_json::json!(draft.priority.unwrap_or_default())
            );
            prop_assert_eq!(note["isRevision"].as_bool(), Some(draft.is_revision.unwrap_or(true)));
            Ok::<(), TestCaseError>(())
        })?;
    }

    #[test]
    fn prop_unknown_id_is_not_found(id in arb_note_id()) {
        let rt = test_runtime()?;
        rt.block_on(async {
            let app = test_app();
            let (status, error) = send(&app, Method::GET, &format!("/api/notes/{}", id), None)
                .await
                .map_err(TestCaseError::fail)?;
            prop_assert_eq!(status, StatusCode::NOT_FOUND);
            prop_assert_eq!(error["code"].as_str(), Some("NOTE_NOT_FOUND"));
            Ok::<(), TestCaseError>(())
        })?;
    }
}
