use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use college_core::{
    calendar::require_date,
    ids::parse_id,
    models::{
        lesson::{CreateLessonRequest, Lesson, LessonListQuery, LessonView, UpdateLessonRequest},
        DeleteResponse,
    },
};
use college_db::{
    hydrate::Hydrator,
    lesson_query::{available_lessons, lessons_on, list_lessons},
    repositories::lesson,
};
use std::sync::Arc;

use super::found;
use crate::{extract::AppJson, middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn create_lesson(
    State(state): State<Arc<ApiState>>,
    AppJson(payload): AppJson<CreateLessonRequest>,
) -> Result<(StatusCode, Json<Lesson>), AppError> {
    let lesson = lesson::create_lesson(state.store(), &payload).await?;
    Ok((StatusCode::CREATED, Json(lesson)))
}

/// Unparseable query values are ignored, never rejected.
#[axum::debug_handler]
pub async fn list_lessons_filtered(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<LessonListQuery>,
) -> Result<Json<Vec<LessonView>>, AppError> {
    let store = state.store();
    let lessons = list_lessons(store, &query).await?;
    Ok(Json(Hydrator::new(store).lessons(lessons).await))
}

#[axum::debug_handler]
pub async fn list_available_lessons(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<LessonView>>, AppError> {
    let store = state.store();
    let lessons = available_lessons(store).await?;
    Ok(Json(Hydrator::new(store).lessons(lessons).await))
}

#[axum::debug_handler]
pub async fn list_lessons_by_date(
    State(state): State<Arc<ApiState>>,
    Path(date): Path<String>,
) -> Result<Json<Vec<LessonView>>, AppError> {
    let day = require_date("date", &date)?;
    let store = state.store();
    let lessons = lessons_on(store, day).await?;
    Ok(Json(Hydrator::new(store).lessons(lessons).await))
}

#[axum::debug_handler]
pub async fn get_lesson(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<LessonView>, AppError> {
    let id = parse_id("lesson", &id)?;
    let store = state.store();
    let lesson = found(lesson::get_lesson_by_id(store, id).await?, "lesson", id)?;
    Ok(Json(Hydrator::new(store).lesson(lesson).await))
}

#[axum::debug_handler]
pub async fn update_lesson(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateLessonRequest>,
) -> Result<Json<Lesson>, AppError> {
    let id = parse_id("lesson", &id)?;
    let lesson = lesson::update_lesson(state.store(), id, &payload).await?;
    Ok(Json(found(lesson, "lesson", id)?))
}

#[axum::debug_handler]
pub async fn delete_lesson(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let id = parse_id("lesson", &id)?;
    if !lesson::delete_lesson(state.store(), id).await? {
        return Err(AppError::not_found(format!("lesson {id} not found")));
    }
    Ok(Json(DeleteResponse::new("Lesson deleted successfully")))
}
