use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::{id_of, TestContext};

fn student(iin: &str, group_id: &str) -> Value {
    json!({
        "iin": iin,
        "first_name": "Dana",
        "last_name": "Omarova",
        "group_id": group_id,
    })
}

#[test_log::test(tokio::test)]
async fn test_student_requires_existing_group() {
    let ctx = TestContext::new();
    let response = ctx
        .server
        .post("/api/v1/students")
        .json(&student("040101500123", &Uuid::new_v4().to_string()))
        .await;
    response.assert_status_not_found();
    assert_eq!(ctx.store.len(college_db::Collection::Students).await, 0);
}

#[test_log::test(tokio::test)]
async fn test_duplicate_iin_is_rejected() {
    let ctx = TestContext::new();
    let group_id = ctx.group("IS-21").await;
    ctx.create("/api/v1/students", student("040101500123", &group_id)).await;

    let response = ctx
        .server
        .post("/api/v1/students")
        .json(&student("040101500123", &group_id))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn test_students_are_listed_with_their_group() {
    let ctx = TestContext::new();
    let group_id = ctx.group("IS-21").await;
    let created = ctx.create("/api/v1/students", student("040101500123", &group_id)).await;
    assert!(created.get("group").is_none());

    let listed = ctx.server.get("/api/v1/students").await.json::<Value>();
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
    assert_eq!(listed[0]["group"]["name"], json!("IS-21"));

    let fetched = ctx
        .server
        .get(&format!("/api/v1/students/{}", id_of(&created)))
        .await
        .json::<Value>();
    assert_eq!(fetched["group"]["id"], json!(group_id));
}

#[test_log::test(tokio::test)]
async fn test_student_schedule_is_found_by_national_id() {
    let ctx = TestContext::new();
    let group_id = ctx.group("IS-21").await;
    let teacher_id = ctx.teacher("800101400111").await;
    let subject_id = ctx.subject("DB-101").await;
    ctx.create("/api/v1/students", student("040101500123", &group_id)).await;
    ctx.create(
        "/api/v1/schedules",
        json!({
            "group_id": group_id,
            "teacher_id": teacher_id,
            "subject_id": subject_id,
            "room": "204",
            "day_of_week": 1,
            "start_time": "08:00",
            "end_time": "09:20",
            "shift": 1,
        }),
    )
    .await;

    let body = ctx
        .server
        .get("/api/v1/students/040101500123/schedule")
        .await
        .json::<Value>();
    assert_eq!(body["student"]["iin"], json!("040101500123"));
    assert_eq!(body["schedules"][0]["subject"]["code"], json!("DB-101"));
    assert_eq!(body["schedules"][0]["teacher"]["last_name"], json!("Sadykova"));

    ctx.server
        .get("/api/v1/students/999999999999/schedule")
        .await
        .assert_status_not_found();
}

#[test_log::test(tokio::test)]
async fn test_delete_student() {
    let ctx = TestContext::new();
    let group_id = ctx.group("IS-21").await;
    let created = ctx.create("/api/v1/students", student("040101500123", &group_id)).await;
    let path = format!("/api/v1/students/{}", id_of(&created));

    ctx.server.delete(&path).await.assert_status_ok();
    ctx.server.delete(&path).await.assert_status_not_found();
}
