#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use notekeep_api::{create_api_router, ApiConfig};
use notekeep_storage::{InMemoryStorage, Storage};
use serde_json::Value;
use tower::ServiceExt;

/// Router over a fresh in-memory store.
pub fn test_app() -> Router {
    test_app_with(Arc::new(InMemoryStorage::new()))
}

/// Router over the given store, so tests can seed it directly.
pub fn test_app_with(store: Arc<InMemoryStorage>) -> Router {
    let store: Arc<dyn Storage> = store;
    create_api_router(store, &ApiConfig::default())
}

/// Send one request and decode the JSON body (`Value::Null` when empty).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> Result<(StatusCode, Value), String> {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let request = builder
        .body(body)
        .map_err(|e| format!("Failed to build request: {}", e))?;

    let response = app
        .clone()
        .oneshot(request)
        .await
        .map_err(|e| format!("Request failed: {}", e))?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .map_err(|e| format!("Failed to read body: {}", e))?;

    if bytes.is_empty() {
        return Ok((status, Value::Null));
    }
    let json = serde_json::from_slice(&bytes)
        .map_err(|e| format!("Body is not JSON ({}): {:?}", e, bytes))?;
    Ok((status, json))
}

/// Create a note through the API and return its id.
pub async fn create_note(app: &Router, body: Value) -> Result<String, String> {
    let (status, json) = send(app, Method::POST, "/api/notes", Some(body)).await?;
    if status != StatusCode::CREATED {
        return Err(format!("Create returned {}: {}", status, json));
    }
    json["id"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| format!("Created note has no id: {}", json))
}

/// Titles of a JSON array of notes, in order.
pub fn titles(notes: &Value) -> Vec<String> {
    notes
        .as_array()
        .map(|list| {
            list.iter()
                .filter_map(|n| n["title"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
