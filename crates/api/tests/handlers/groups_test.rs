use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::{id_of, TestContext};

#[test_log::test(tokio::test)]
async fn test_create_and_get_group() {
    let ctx = TestContext::new();

    let created = ctx
        .create("/api/v1/groups", json!({ "name": "IS-21", "description": "Information systems" }))
        .await;
    assert_eq!(created["name"], json!("IS-21"));

    let fetched = ctx
        .server
        .get(&format!("/api/v1/groups/{}", id_of(&created)))
        .await
        .json::<Value>();
    assert_eq!(fetched, created);
}

#[test_log::test(tokio::test)]
async fn test_list_is_an_empty_array_not_null() {
    let ctx = TestContext::new();
    let body = ctx.server.get("/api/v1/groups").await.json::<Value>();
    assert_eq!(body, json!([]));
}

#[test_log::test(tokio::test)]
async fn test_missing_name_is_rejected() {
    let ctx = TestContext::new();
    let response = ctx.server.post("/api/v1/groups").json(&json!({ "name": "" })).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], json!("validation"));
}

#[test_log::test(tokio::test)]
async fn test_body_without_required_field_is_validation_error() {
    let ctx = TestContext::new();

    for body in [json!({}), json!({ "description": "x" }), json!({ "name": 42 })] {
        let response = ctx.server.post("/api/v1/groups").json(&body).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let error = response.json::<Value>();
        assert_eq!(error["kind"], json!("validation"));
        assert!(error["error"].as_str().unwrap().starts_with("Validation error: Invalid request body"));
    }
}

#[test_log::test(tokio::test)]
async fn test_unparseable_update_body_is_validation_error() {
    let ctx = TestContext::new();
    let group_id = ctx.group("IS-21").await;

    let response = ctx
        .server
        .put(&format!("/api/v1/groups/{group_id}"))
        .text("{not json")
        .content_type("application/json")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], json!("validation"));
}

#[test_log::test(tokio::test)]
async fn test_malformed_id_is_validation_not_not_found() {
    let ctx = TestContext::new();
    let response = ctx.server.get("/api/v1/groups/not-a-uuid").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        json!("Validation error: Invalid group ID: not-a-uuid")
    );
}

#[test_log::test(tokio::test)]
async fn test_unknown_group_is_not_found() {
    let ctx = TestContext::new();
    let id = Uuid::new_v4();

    ctx.server
        .get(&format!("/api/v1/groups/{id}"))
        .await
        .assert_status_not_found();
    ctx.server
        .put(&format!("/api/v1/groups/{id}"))
        .json(&json!({ "name": "renamed" }))
        .await
        .assert_status_not_found();
    ctx.server
        .delete(&format!("/api/v1/groups/{id}"))
        .await
        .assert_status_not_found();
}

#[test_log::test(tokio::test)]
async fn test_partial_update_keeps_other_fields() {
    let ctx = TestContext::new();
    let created = ctx
        .create("/api/v1/groups", json!({ "name": "IS-21", "description": "evening" }))
        .await;

    let updated = ctx
        .server
        .put(&format!("/api/v1/groups/{}", id_of(&created)))
        .json(&json!({ "name": "IS-22" }))
        .await
        .json::<Value>();
    assert_eq!(updated["name"], json!("IS-22"));
    assert_eq!(updated["description"], json!("evening"));
}

#[test_log::test(tokio::test)]
async fn test_group_with_student_cannot_be_deleted() {
    let ctx = TestContext::new();
    let group_id = ctx.group("IS-21").await;
    ctx.create(
        "/api/v1/students",
        json!({
            "iin": "040101500123",
            "first_name": "Dana",
            "last_name": "Omarova",
            "group_id": group_id,
        }),
    )
    .await;

    let response = ctx.server.delete(&format!("/api/v1/groups/{group_id}")).await;
    response.assert_status(StatusCode::CONFLICT);
    let body = response.json::<Value>();
    assert_eq!(body["kind"], json!("referential_conflict"));
    assert_eq!(body["dependents"], json!(["students"]));

    ctx.server
        .get(&format!("/api/v1/groups/{group_id}"))
        .await
        .assert_status_ok();
}

#[test_log::test(tokio::test)]
async fn test_group_without_dependents_is_deleted() {
    let ctx = TestContext::new();
    let group_id = ctx.group("IS-21").await;

    let response = ctx.server.delete(&format!("/api/v1/groups/{group_id}")).await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({ "message": "Group deleted successfully" })
    );

    ctx.server
        .get(&format!("/api/v1/groups/{group_id}"))
        .await
        .assert_status_not_found();
}
