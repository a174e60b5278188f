use college_core::{
    calendar::parse_date,
    models::lesson::{CreateLessonRequest, LessonListQuery, UpdateLessonRequest},
    patch::Patch,
};
use college_db::{
    lesson_query::{available_lessons, lessons_on, list_lessons},
    repositories::lesson::{create_lesson, get_lesson_by_id, update_lesson},
    MemoryStore,
};
use pretty_assertions::assert_eq;
use uuid::Uuid;

fn lesson_request(date: Option<&str>, start_time: Option<&str>) -> CreateLessonRequest {
    CreateLessonRequest {
        group_id: Uuid::new_v4().to_string(),
        teacher_id: Uuid::new_v4().to_string(),
        subject_id: Uuid::new_v4().to_string(),
        room: "305".to_string(),
        date: date.map(str::to_string),
        start_time: start_time.map(str::to_string),
        end_time: None,
        shift: None,
        description: None,
    }
}

#[test_log::test(tokio::test)]
async fn start_time_drives_shift_on_create_and_update() {
    let store = MemoryStore::new();
    let lesson = create_lesson(&store, &lesson_request(Some("2024-01-15"), Some("12:40")))
        .await
        .unwrap();
    assert_eq!(lesson.shift, 2);

    let update = UpdateLessonRequest {
        start_time: Patch::Set("08:00".to_string()),
        ..Default::default()
    };
    let updated = update_lesson(&store, lesson.id, &update).await.unwrap().unwrap();
    assert_eq!(updated.shift, 1);
    assert_eq!(updated.start_time.as_deref(), Some("08:00"));
    assert!(updated.updated_at >= lesson.updated_at);
}

#[test_log::test(tokio::test)]
async fn explicit_shift_survives_start_time_change() {
    let store = MemoryStore::new();
    let lesson = create_lesson(&store, &lesson_request(None, Some("08:00")))
        .await
        .unwrap();

    let update = UpdateLessonRequest {
        start_time: Patch::Set("08:30".to_string()),
        shift: Patch::Set(2),
        ..Default::default()
    };
    let updated = update_lesson(&store, lesson.id, &update).await.unwrap().unwrap();
    assert_eq!(updated.shift, 2);
}

#[test_log::test(tokio::test)]
async fn round_trip_preserves_fields() {
    let store = MemoryStore::new();
    let mut request = lesson_request(Some("2024-01-15"), Some("08:00"));
    request.end_time = Some("09:20".to_string());
    request.description = Some("Lab".to_string());

    let created = create_lesson(&store, &request).await.unwrap();
    let loaded = get_lesson_by_id(&store, created.id).await.unwrap().unwrap();
    assert_eq!(loaded, created);
}

#[test_log::test(tokio::test)]
async fn range_filter_is_inclusive_of_last_day_only() {
    let store = MemoryStore::new();
    for date in ["2024-01-01", "2024-01-31", "2024-02-01"] {
        create_lesson(&store, &lesson_request(Some(date), None))
            .await
            .unwrap();
    }
    create_lesson(&store, &lesson_request(None, None)).await.unwrap();

    let query = LessonListQuery {
        start_date: Some("2024-01-01".to_string()),
        end_date: Some("2024-01-31".to_string()),
        ..Default::default()
    };
    let lessons = list_lessons(&store, &query).await.unwrap();
    let dates: Vec<_> = lessons
        .iter()
        .filter_map(|l| l.calendar_date())
        .map(|d| d.to_string())
        .collect();
    assert_eq!(dates, vec!["2024-01-01", "2024-01-31"]);
}

#[test_log::test(tokio::test)]
async fn single_day_listing() {
    let store = MemoryStore::new();
    create_lesson(&store, &lesson_request(Some("2024-01-15"), None))
        .await
        .unwrap();
    create_lesson(&store, &lesson_request(Some("2024-01-16"), None))
        .await
        .unwrap();

    let on_15th = lessons_on(&store, parse_date("2024-01-15").unwrap())
        .await
        .unwrap();
    assert_eq!(on_15th.len(), 1);
}

#[test_log::test(tokio::test)]
async fn scheduling_a_lesson_removes_it_from_available_pool() {
    let store = MemoryStore::new();
    let floating = create_lesson(&store, &lesson_request(None, None)).await.unwrap();
    create_lesson(&store, &lesson_request(Some("2024-01-15"), None))
        .await
        .unwrap();

    let available = available_lessons(&store).await.unwrap();
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].id, floating.id);

    let update = UpdateLessonRequest {
        date: Patch::Set("2024-01-20".to_string()),
        ..Default::default()
    };
    update_lesson(&store, floating.id, &update).await.unwrap();
    assert!(available_lessons(&store).await.unwrap().is_empty());

    let unschedule = UpdateLessonRequest {
        date: Patch::Clear,
        ..Default::default()
    };
    update_lesson(&store, floating.id, &unschedule).await.unwrap();
    assert_eq!(available_lessons(&store).await.unwrap().len(), 1);
}

#[test_log::test(tokio::test)]
async fn updating_missing_lesson_returns_none() {
    let store = MemoryStore::new();
    let result = update_lesson(&store, Uuid::new_v4(), &UpdateLessonRequest::default())
        .await
        .unwrap();
    assert!(result.is_none());
}
