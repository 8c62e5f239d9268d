//! HTTP tests for the revision ordering routes under /api/note-order and
//! their /api/notes/order aliases.

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use notekeep_storage::{InMemoryStorage, NoteStore, OrderStore};
use notekeep_test_utils::fixtures;
use serde_json::json;

#[path = "support/http.rs"]
mod http_support;
use http_support::{create_note, send, test_app, test_app_with, titles};

/// Store seeded with notes A (t=1, rank 5), B (t=2), C (t=0, rank 2) and
/// one non-revision note.
async fn seeded_store() -> Result<Arc<InMemoryStorage>, String> {
    let store = Arc::new(InMemoryStorage::new());
    let (notes, orders) = fixtures::ranked_scenario();
    for note in &notes {
        store
            .note_insert(note)
            .await
            .map_err(|e| format!("Failed to seed note: {}", e))?;
    }
    store
        .note_insert(&fixtures::plain_note("Plain", 3))
        .await
        .map_err(|e| format!("Failed to seed note: {}", e))?;
    store
        .order_insert_many(&orders)
        .await
        .map_err(|e| format!("Failed to seed orders: {}", e))?;
    Ok(store)
}

// ============================================================================
// RESOLVED ORDER
// ============================================================================

#[tokio::test]
async fn test_revision_notes_ranked_then_unranked() -> Result<(), String> {
    let app = test_app_with(seeded_store().await?);

    let (status, body) = send(&app, Method::GET, "/api/note-order/revision-notes", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body["notes"]), vec!["C", "A", "B"]);
    assert_eq!(body["total"], 3);

    // The alias serves the same sequence.
    let (status, alias) = send(&app, Method::GET, "/api/notes/order/revision", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(alias, body);
    Ok(())
}

#[tokio::test]
async fn test_revision_notes_empty_store() -> Result<(), String> {
    let app = test_app();

    let (status, body) = send(&app, Method::GET, "/api/note-order/revision-notes", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notes"], json!([]));
    assert_eq!(body["total"], 0);
    Ok(())
}

#[tokio::test]
async fn test_list_orders_sorted_by_rank() -> Result<(), String> {
    let app = test_app_with(seeded_store().await?);

    let (status, body) = send(&app, Method::GET, "/api/note-order", None).await?;
    assert_eq!(status, StatusCode::OK);
    let ranks: Vec<i64> = body
        .as_array()
        .ok_or_else(|| "orders is not an array".to_string())?
        .iter()
        .filter_map(|o| o["order"].as_i64())
        .collect();
    assert_eq!(ranks, vec![2, 5]);
    Ok(())
}

// ============================================================================
// ASSIGNMENT
// ============================================================================

#[tokio::test]
async fn test_bulk_update_last_write_wins() -> Result<(), String> {
    let app = test_app();
    let id = create_note(&app, json!({ "title": "X", "content": "c", "category": "k" })).await?;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/note-order/bulk-update",
        Some(json!({ "orders": [
            { "noteId": id, "order": 3 },
            { "noteId": id, "order": 7 }
        ] })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Orders updated successfully");
    assert_eq!(body["count"], 2);

    let (_, orders) = send(&app, Method::GET, "/api/note-order", None).await?;
    assert_eq!(orders.as_array().map(Vec::len), Some(1));
    assert_eq!(orders[0]["order"], 7);
    Ok(())
}

#[tokio::test]
async fn test_bulk_update_empty_batch() -> Result<(), String> {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/notes/order/bulk-update",
        Some(json!({ "orders": [] })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
    Ok(())
}

#[tokio::test]
async fn test_bulk_update_rejects_non_array() -> Result<(), String> {
    let app = test_app();

    for payload in [json!({ "orders": "nope" }), json!({})] {
        let (status, error) = send(
            &app,
            Method::POST,
            "/api/note-order/bulk-update",
            Some(payload),
        )
        .await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["message"], "Orders must be an array");
    }
    Ok(())
}

#[tokio::test]
async fn test_bulk_update_invalid_entry_writes_nothing() -> Result<(), String> {
    let app = test_app();
    let id = create_note(&app, json!({ "title": "X", "content": "c", "category": "k" })).await?;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/note-order/bulk-update",
        Some(json!({ "orders": [
            { "noteId": id, "order": 1 },
            { "noteId": "not-an-id", "order": 2 }
        ] })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, orders) = send(&app, Method::GET, "/api/note-order", None).await?;
    assert_eq!(orders, json!([]));
    Ok(())
}

#[tokio::test]
async fn test_set_order_creates_then_overwrites() -> Result<(), String> {
    let app = test_app();
    let id = create_note(&app, json!({ "title": "X", "content": "c", "category": "k" })).await?;
    let uri = format!("/api/note-order/{}", id);

    let (status, entry) = send(&app, Method::PUT, &uri, Some(json!({ "order": 10 }))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(entry["noteId"], id.as_str());
    assert_eq!(entry["order"], 10);

    let (_, entry) = send(&app, Method::PUT, &uri, Some(json!({ "order": -1 }))).await?;
    assert_eq!(entry["order"], -1);

    let (_, orders) = send(&app, Method::GET, "/api/note-order", None).await?;
    assert_eq!(orders.as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn test_set_order_rejects_non_number() -> Result<(), String> {
    let app = test_app();
    let id = create_note(&app, json!({ "title": "X", "content": "c", "category": "k" })).await?;
    let uri = format!("/api/note-order/{}", id);

    let (status, error) = send(&app, Method::PUT, &uri, Some(json!({ "order": "abc" }))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["message"], "Order must be a number");

    let (status, _) = send(&app, Method::PUT, &uri, Some(json!({ "order": 1.5 }))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, orders) = send(&app, Method::GET, "/api/note-order", None).await?;
    assert_eq!(orders, json!([]));
    Ok(())
}

#[tokio::test]
async fn test_set_order_malformed_id() -> Result<(), String> {
    let app = test_app();

    let (status, error) = send(
        &app,
        Method::PUT,
        "/api/note-order/not-an-id",
        Some(json!({ "order": 1 })),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["message"], "Invalid ID format");
    Ok(())
}

#[tokio::test]
async fn test_remove_order_is_idempotent() -> Result<(), String> {
    let app = test_app_with(seeded_store().await?);
    let (_, body) = send(&app, Method::GET, "/api/note-order/revision-notes", None).await?;
    let c_id = body["notes"][0]["id"]
        .as_str()
        .ok_or_else(|| "missing id".to_string())?
        .to_string();
    let uri = format!("/api/note-order/{}", c_id);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Note order removed successfully");

    // C falls back among the unranked notes, oldest first.
    let (_, body) = send(&app, Method::GET, "/api/note-order/revision-notes", None).await?;
    assert_eq!(titles(&body["notes"]), vec!["A", "C", "B"]);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

// ============================================================================
// INITIALIZATION
// ============================================================================

#[tokio::test]
async fn test_initialize_ranks_unranked_once() -> Result<(), String> {
    let app = test_app_with(seeded_store().await?);

    let (status, body) = send(&app, Method::POST, "/api/note-order/initialize", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Orders initialized successfully");
    assert_eq!(body["newOrdersCreated"], 1);
    assert_eq!(body["totalRevisionNotes"], 3);

    let (_, orders) = send(&app, Method::GET, "/api/note-order", None).await?;
    let ranks: Vec<i64> = orders
        .as_array()
        .ok_or_else(|| "orders is not an array".to_string())?
        .iter()
        .filter_map(|o| o["order"].as_i64())
        .collect();
    assert_eq!(ranks, vec![2, 5, 6]);

    let (status, body) = send(&app, Method::POST, "/api/notes/order/initialize", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["newOrdersCreated"], 0);
    assert_eq!(body["totalRevisionNotes"], 3);

    let (_, body) = send(&app, Method::GET, "/api/note-order/revision-notes", None).await?;
    assert_eq!(titles(&body["notes"]), vec!["C", "A", "B"]);
    Ok(())
}

#[tokio::test]
async fn test_initialize_empty_store() -> Result<(), String> {
    let app = test_app();

    let (status, body) = send(&app, Method::POST, "/api/note-order/initialize", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["newOrdersCreated"], 0);
    assert_eq!(body["totalRevisionNotes"], 0);
    Ok(())
}
