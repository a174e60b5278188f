use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::test_utils::{id_of, TestContext};

fn slot(start: &str, end: &str, shift: u8, is_active: bool) -> Value {
    json!({
        "start_time": start,
        "end_time": end,
        "shift": shift,
        "is_active": is_active,
    })
}

#[test_log::test(tokio::test)]
async fn test_label_defaults_to_time_range() {
    let ctx = TestContext::new();
    let created = ctx
        .create("/api/v1/time-slots", slot("08:00", "09:20", 1, true))
        .await;
    assert_eq!(created["label"], json!("08:00-09:20"));

    let renamed = ctx
        .server
        .put(&format!("/api/v1/time-slots/{}", id_of(&created)))
        .json(&json!({ "end_time": "09:30", "label": "ignored" }))
        .await
        .json::<Value>();
    assert_eq!(renamed["label"], json!("08:00-09:30"));
}

#[test_log::test(tokio::test)]
async fn test_invalid_shift_is_rejected() {
    let ctx = TestContext::new();
    ctx.server
        .post("/api/v1/time-slots")
        .json(&slot("08:00", "09:20", 3, true))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn test_listing_filters() {
    let ctx = TestContext::new();
    ctx.create("/api/v1/time-slots", slot("08:00", "09:20", 1, true)).await;
    ctx.create("/api/v1/time-slots", slot("12:40", "14:00", 2, true)).await;
    ctx.create("/api/v1/time-slots", slot("14:10", "15:30", 2, false)).await;

    let second = ctx.server.get("/api/v1/time-slots?shift=2").await.json::<Value>();
    assert_eq!(second.as_array().map(Vec::len), Some(2));

    let active_second = ctx
        .server
        .get("/api/v1/time-slots?shift=2&is_active=true")
        .await
        .json::<Value>();
    assert_eq!(active_second.as_array().map(Vec::len), Some(1));
    assert_eq!(active_second[0]["start_time"], json!("12:40"));

    let everything = ctx
        .server
        .get("/api/v1/time-slots?is_active=perhaps")
        .await
        .json::<Value>();
    assert_eq!(everything.as_array().map(Vec::len), Some(3));
}

#[test_log::test(tokio::test)]
async fn test_slot_in_use_cannot_be_deleted() {
    let ctx = TestContext::new();
    let created = ctx
        .create("/api/v1/time-slots", slot("12:40", "14:00", 2, true))
        .await;
    let lesson = ctx
        .create(
            "/api/v1/lessons",
            json!({
                "group_id": ctx.group("IS-21").await,
                "teacher_id": ctx.teacher("800101400111").await,
                "subject_id": ctx.subject("DB-101").await,
                "room": "101",
                "start_time": "12:40",
                "end_time": "14:00",
            }),
        )
        .await;
    let path = format!("/api/v1/time-slots/{}", id_of(&created));

    let response = ctx.server.delete(&path).await;
    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["dependents"], json!(["lessons"]));

    ctx.server
        .delete(&format!("/api/v1/lessons/{}", id_of(&lesson)))
        .await
        .assert_status_ok();
    ctx.server.delete(&path).await.assert_status_ok();
    ctx.server.get(&path).await.assert_status_not_found();
}
