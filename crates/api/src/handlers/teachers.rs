use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use college_core::{
    ids::parse_id,
    models::{
        teacher::{CreateTeacherRequest, Teacher, TeacherScheduleResponse, UpdateTeacherRequest},
        DeleteResponse,
    },
};
use college_db::{
    guard::{ensure_deletable, DeleteTarget},
    hydrate::Hydrator,
    repositories::{schedule::list_schedules_for_teacher, teacher},
};
use std::sync::Arc;

use super::found;
use crate::{extract::AppJson, middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn create_teacher(
    State(state): State<Arc<ApiState>>,
    AppJson(payload): AppJson<CreateTeacherRequest>,
) -> Result<(StatusCode, Json<Teacher>), AppError> {
    let teacher = teacher::create_teacher(state.store(), &payload).await?;
    Ok((StatusCode::CREATED, Json(teacher)))
}

#[axum::debug_handler]
pub async fn list_teachers(State(state): State<Arc<ApiState>>) -> Result<Json<Vec<Teacher>>, AppError> {
    Ok(Json(teacher::list_teachers(state.store()).await?))
}

#[axum::debug_handler]
pub async fn get_teacher(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<Teacher>, AppError> {
    let id = parse_id("teacher", &id)?;
    let teacher = teacher::get_teacher_by_id(state.store(), id).await?;
    Ok(Json(found(teacher, "teacher", id)?))
}

#[axum::debug_handler]
pub async fn update_teacher(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateTeacherRequest>,
) -> Result<Json<Teacher>, AppError> {
    let id = parse_id("teacher", &id)?;
    let teacher = teacher::update_teacher(state.store(), id, &payload).await?;
    Ok(Json(found(teacher, "teacher", id)?))
}

/// Refuses while schedules or lessons still reference the teacher.
#[axum::debug_handler]
pub async fn delete_teacher(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let id = parse_id("teacher", &id)?;
    let store = state.store();
    found(teacher::get_teacher_by_id(store, id).await?, "teacher", id)?;

    ensure_deletable(store, &DeleteTarget::Teacher(id)).await?;
    teacher::delete_teacher(store, id).await?;

    tracing::info!(%id, "teacher deleted");
    Ok(Json(DeleteResponse::new("Teacher deleted successfully")))
}

/// The path segment is the teacher's national ID.
#[axum::debug_handler]
pub async fn get_teacher_schedule(
    State(state): State<Arc<ApiState>>,
    Path(iin): Path<String>,
) -> Result<Json<TeacherScheduleResponse>, AppError> {
    let store = state.store();
    let teacher = teacher::get_teacher_by_iin(store, &iin).await?;
    let teacher = found(teacher, "teacher with IIN", &iin)?;

    let schedules = list_schedules_for_teacher(store, teacher.id).await?;
    let schedules = Hydrator::new(store).schedules(schedules).await;

    Ok(Json(TeacherScheduleResponse { teacher, schedules }))
}
