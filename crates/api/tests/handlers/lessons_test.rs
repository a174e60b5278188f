use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::{id_of, TestContext};

struct Refs {
    group_id: String,
    teacher_id: String,
    subject_id: String,
}

async fn refs(ctx: &TestContext) -> Refs {
    Refs {
        group_id: ctx.group("IS-21").await,
        teacher_id: ctx.teacher("800101400111").await,
        subject_id: ctx.subject("DB-101").await,
    }
}

fn lesson(refs: &Refs, extra: Value) -> Value {
    let mut body = json!({
        "group_id": refs.group_id,
        "teacher_id": refs.teacher_id,
        "subject_id": refs.subject_id,
        "room": "101",
    });
    if let (Some(body), Value::Object(extra)) = (body.as_object_mut(), extra) {
        body.extend(extra);
    }
    body
}

fn ids(listing: &Value) -> Vec<String> {
    listing
        .as_array()
        .map(|lessons| lessons.iter().map(id_of).collect())
        .unwrap_or_default()
}

#[test_log::test(tokio::test)]
async fn test_shift_follows_start_time() {
    let ctx = TestContext::new();
    let refs = refs(&ctx).await;

    let created = ctx
        .create(
            "/api/v1/lessons",
            lesson(&refs, json!({ "date": "2024-01-15", "start_time": "12:40" })),
        )
        .await;
    assert_eq!(created["shift"], json!(2));

    let updated = ctx
        .server
        .put(&format!("/api/v1/lessons/{}", id_of(&created)))
        .json(&json!({ "start_time": "08:00" }))
        .await
        .json::<Value>();
    assert_eq!(updated["shift"], json!(1));
}

#[test_log::test(tokio::test)]
async fn test_lesson_is_hydrated_with_placeholder_subject() {
    let ctx = TestContext::new();
    let refs = Refs {
        subject_id: Uuid::new_v4().to_string(),
        ..refs(&ctx).await
    };
    let created = ctx
        .create("/api/v1/lessons", lesson(&refs, json!({ "date": "2024-01-15" })))
        .await;

    let fetched = ctx
        .server
        .get(&format!("/api/v1/lessons/{}", id_of(&created)))
        .await
        .json::<Value>();
    assert_eq!(fetched["group"]["name"], json!("IS-21"));
    assert_eq!(fetched["subject"]["name"], json!("Subject not found"));
    assert_eq!(fetched["subject"]["code"], json!("N/A"));
}

#[test_log::test(tokio::test)]
async fn test_range_filter_excludes_next_month() {
    let ctx = TestContext::new();
    let refs = refs(&ctx).await;
    let january = ctx
        .create("/api/v1/lessons", lesson(&refs, json!({ "date": "2024-01-31" })))
        .await;
    ctx.create("/api/v1/lessons", lesson(&refs, json!({ "date": "2024-02-01" })))
        .await;

    let listing = ctx
        .server
        .get("/api/v1/lessons?start_date=2024-01-01&end_date=2024-01-31")
        .await
        .json::<Value>();
    assert_eq!(ids(&listing), vec![id_of(&january)]);

    let unfiltered = ctx
        .server
        .get("/api/v1/lessons?shift=9&group_id=nonsense")
        .await
        .json::<Value>();
    assert_eq!(ids(&unfiltered).len(), 2);
}

#[test_log::test(tokio::test)]
async fn test_lessons_by_date() {
    let ctx = TestContext::new();
    let refs = refs(&ctx).await;
    let monday = ctx
        .create("/api/v1/lessons", lesson(&refs, json!({ "date": "2024-01-15" })))
        .await;
    ctx.create("/api/v1/lessons", lesson(&refs, json!({ "date": "2024-01-16" })))
        .await;

    let listing = ctx.server.get("/api/v1/lessons/date/2024-01-15").await.json::<Value>();
    assert_eq!(ids(&listing), vec![id_of(&monday)]);

    ctx.server
        .get("/api/v1/lessons/date/15.01.2024")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn test_available_pool_follows_date() {
    let ctx = TestContext::new();
    let refs = refs(&ctx).await;
    let floating = ctx.create("/api/v1/lessons", lesson(&refs, json!({}))).await;
    assert!(floating.get("date").is_none());
    ctx.create("/api/v1/lessons", lesson(&refs, json!({ "date": "2024-01-15" })))
        .await;

    let available = ctx.server.get("/api/v1/lessons/available").await.json::<Value>();
    assert_eq!(ids(&available), vec![id_of(&floating)]);

    let path = format!("/api/v1/lessons/{}", id_of(&floating));
    ctx.server
        .put(&path)
        .json(&json!({ "date": "2024-01-17" }))
        .await
        .assert_status_ok();
    let available = ctx.server.get("/api/v1/lessons/available").await.json::<Value>();
    assert_eq!(available, json!([]));

    ctx.server
        .put(&path)
        .json(&json!({ "date": null }))
        .await
        .assert_status_ok();
    let available = ctx.server.get("/api/v1/lessons/available").await.json::<Value>();
    assert_eq!(ids(&available), vec![id_of(&floating)]);
}

#[test_log::test(tokio::test)]
async fn test_delete_lesson() {
    let ctx = TestContext::new();
    let refs = refs(&ctx).await;
    let created = ctx.create("/api/v1/lessons", lesson(&refs, json!({}))).await;
    let path = format!("/api/v1/lessons/{}", id_of(&created));

    let response = ctx.server.delete(&path).await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({ "message": "Lesson deleted successfully" })
    );
    ctx.server.get(&path).await.assert_status_not_found();
}

#[test_log::test(tokio::test)]
async fn test_statistics_over_http() {
    let ctx = TestContext::new();
    let refs = refs(&ctx).await;
    for start in ["08:00", "12:40", "07:00"] {
        ctx.create(
            "/api/v1/lessons",
            lesson(&refs, json!({ "date": "2024-01-15", "start_time": start })),
        )
        .await;
    }

    let stats = ctx
        .server
        .get("/api/v1/statistics/lessons?start_date=2024-01-01&end_date=2024-01-31")
        .await
        .json::<Value>();
    assert_eq!(stats["total_lessons"], json!(3));
    assert_eq!(stats["by_shift"], json!({ "first_shift": 1, "second_shift": 1 }));
    assert_eq!(stats["top_teachers"][0]["name"], json!("Aigerim Sadykova"));
    assert_eq!(stats["period"]["end_date"], json!("2024-01-31"));

    ctx.server
        .get("/api/v1/statistics/lessons?start_date=yesterday")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn test_subject_used_by_lesson_cannot_be_deleted() {
    let ctx = TestContext::new();
    let refs = refs(&ctx).await;
    let created = ctx
        .create("/api/v1/lessons", lesson(&refs, json!({ "date": "2024-01-15" })))
        .await;

    let response = ctx
        .server
        .delete(&format!("/api/v1/subjects/{}", refs.subject_id))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    let body = response.json::<Value>();
    assert_eq!(body["kind"], json!("referential_conflict"));
    assert_eq!(body["dependents"], json!(["lessons"]));

    ctx.server
        .delete(&format!("/api/v1/lessons/{}", id_of(&created)))
        .await
        .assert_status_ok();
    ctx.server
        .delete(&format!("/api/v1/subjects/{}", refs.subject_id))
        .await
        .assert_status_ok();
}

#[test_log::test(tokio::test)]
async fn test_teacher_with_lesson_cannot_be_deleted() {
    let ctx = TestContext::new();
    let refs = refs(&ctx).await;
    ctx.create("/api/v1/lessons", lesson(&refs, json!({}))).await;

    let response = ctx
        .server
        .delete(&format!("/api/v1/teachers/{}", refs.teacher_id))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["dependents"], json!(["lessons"]));

    ctx.server
        .get(&format!("/api/v1/teachers/{}", refs.teacher_id))
        .await
        .assert_status_ok();
}
