use axum::http::StatusCode;
use college_db::Collection;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::{id_of, TestContext};

fn schedule(group_id: &str, teacher_id: &str, subject_id: &str, day: u8) -> Value {
    json!({
        "group_id": group_id,
        "teacher_id": teacher_id,
        "subject_id": subject_id,
        "room": "204",
        "day_of_week": day,
        "start_time": "12:40",
        "end_time": "14:00",
        "shift": 2,
    })
}

#[test_log::test(tokio::test)]
async fn test_unknown_teacher_fails_before_any_write() {
    let ctx = TestContext::new();
    let group_id = ctx.group("IS-21").await;
    let subject_id = ctx.subject("DB-101").await;

    let response = ctx
        .server
        .post("/api/v1/schedules")
        .json(&schedule(&group_id, &Uuid::new_v4().to_string(), &subject_id, 3))
        .await;
    response.assert_status_not_found();
    assert_eq!(ctx.store.len(Collection::Schedules).await, 0);
}

#[test_log::test(tokio::test)]
async fn test_incomplete_body_is_validation_error() {
    let ctx = TestContext::new();

    let response = ctx.server.post("/api/v1/schedules").json(&json!({ "room": "1" })).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], json!("validation"));
    assert_eq!(ctx.store.len(Collection::Schedules).await, 0);
}

#[test_log::test(tokio::test)]
async fn test_schedules_by_day_are_hydrated() {
    let ctx = TestContext::new();
    let group_id = ctx.group("IS-21").await;
    let teacher_id = ctx.teacher("800101400111").await;
    let subject_id = ctx.subject("DB-101").await;
    ctx.create("/api/v1/schedules", schedule(&group_id, &teacher_id, &subject_id, 3))
        .await;
    ctx.create("/api/v1/schedules", schedule(&group_id, &teacher_id, &subject_id, 4))
        .await;

    let wednesday = ctx.server.get("/api/v1/schedules/day/3").await.json::<Value>();
    assert_eq!(wednesday.as_array().map(Vec::len), Some(1));
    assert_eq!(wednesday[0]["group"]["name"], json!("IS-21"));
    assert_eq!(wednesday[0]["subject"]["name"], json!("Databases"));

    let sunday = ctx.server.get("/api/v1/schedules/day/7").await.json::<Value>();
    assert_eq!(sunday, json!([]));
}

#[rstest]
#[case("0")]
#[case("8")]
#[case("monday")]
#[tokio::test]
async fn test_day_outside_week_is_rejected(#[case] day: &str) {
    let ctx = TestContext::new();
    ctx.server
        .get(&format!("/api/v1/schedules/day/{day}"))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn test_teacher_with_schedule_cannot_be_deleted() {
    let ctx = TestContext::new();
    let group_id = ctx.group("IS-21").await;
    let teacher_id = ctx.teacher("800101400111").await;
    let subject_id = ctx.subject("DB-101").await;
    let created = ctx
        .create("/api/v1/schedules", schedule(&group_id, &teacher_id, &subject_id, 1))
        .await;

    let response = ctx.server.delete(&format!("/api/v1/teachers/{teacher_id}")).await;
    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["dependents"], json!(["schedules"]));

    ctx.server
        .delete(&format!("/api/v1/schedules/{}", id_of(&created)))
        .await
        .assert_status_ok();
    ctx.server
        .delete(&format!("/api/v1/teachers/{teacher_id}"))
        .await
        .assert_status_ok();
}

#[test_log::test(tokio::test)]
async fn test_teacher_schedule_by_national_id() {
    let ctx = TestContext::new();
    let group_id = ctx.group("IS-21").await;
    let teacher_id = ctx.teacher("800101400111").await;
    let subject_id = ctx.subject("DB-101").await;
    ctx.create("/api/v1/schedules", schedule(&group_id, &teacher_id, &subject_id, 2))
        .await;

    let body = ctx
        .server
        .get("/api/v1/teachers/800101400111/schedule")
        .await
        .json::<Value>();
    assert_eq!(body["teacher"]["id"], json!(teacher_id));
    assert_eq!(body["schedules"].as_array().map(Vec::len), Some(1));
}

#[test_log::test(tokio::test)]
async fn test_update_rejects_invalid_shift() {
    let ctx = TestContext::new();
    let group_id = ctx.group("IS-21").await;
    let teacher_id = ctx.teacher("800101400111").await;
    let subject_id = ctx.subject("DB-101").await;
    let created = ctx
        .create("/api/v1/schedules", schedule(&group_id, &teacher_id, &subject_id, 2))
        .await;

    ctx.server
        .put(&format!("/api/v1/schedules/{}", id_of(&created)))
        .json(&json!({ "shift": 3 }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
