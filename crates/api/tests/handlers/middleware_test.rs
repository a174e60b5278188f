use std::sync::Arc;

use axum::http::StatusCode;
use college_db::mock::{unavailable_store, MockDocumentStore};
use eyre::eyre;
use pretty_assertions::assert_eq;
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::test_utils::server_for;

#[test_log::test(tokio::test)]
async fn test_store_failure_is_opaque_internal_error() {
    let server = server_for(Arc::new(unavailable_store()));

    let response = server.get("/api/v1/groups").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": "Internal server error", "kind": "store" })
    );
}

#[test_log::test(tokio::test)]
async fn test_failed_dependent_count_refuses_delete() {
    let id = Uuid::new_v4();
    let mut store = MockDocumentStore::new();
    store.expect_find_one().returning(move |_, _| {
        let mut group = Map::new();
        group.insert("id".to_string(), json!(id));
        group.insert("name".to_string(), json!("IS-21"));
        group.insert("created_at".to_string(), json!("2024-01-15T08:30:00Z"));
        group.insert("updated_at".to_string(), json!("2024-01-15T08:30:00Z"));
        Ok(Some(group))
    });
    store
        .expect_count()
        .returning(|_, _| Err(eyre!("connection reset")));
    store.expect_delete_one().never();

    let server = server_for(Arc::new(store));
    let response = server.delete(&format!("/api/v1/groups/{id}")).await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[test_log::test(tokio::test)]
async fn test_hydration_survives_lookup_failures() {
    let schedule_id = Uuid::new_v4();
    let mut store = MockDocumentStore::new();
    store.expect_find_one().returning(move |collection, _| {
        if collection != college_db::Collection::Schedules {
            return Err(eyre!("lookup timed out"));
        }
        let value = json!({
            "id": schedule_id,
            "group_id": Uuid::new_v4(),
            "teacher_id": Uuid::new_v4(),
            "room": "204",
            "day_of_week": 1,
            "start_time": "08:00",
            "end_time": "09:20",
            "shift": 1,
            "created_at": "2024-01-15T08:30:00Z",
            "updated_at": "2024-01-15T08:30:00Z",
        });
        match value {
            Value::Object(document) => Ok(Some(document)),
            _ => Ok(None),
        }
    });

    let server = server_for(Arc::new(store));
    let response = server.get(&format!("/api/v1/schedules/{schedule_id}")).await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert!(body.get("group").is_none());
    assert!(body.get("teacher").is_none());
    assert_eq!(body["subject"]["name"], json!("Subject not specified"));
}
