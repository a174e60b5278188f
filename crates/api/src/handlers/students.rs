use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use college_core::{
    ids::parse_id,
    models::{
        student::{CreateStudentRequest, Student, StudentScheduleResponse, StudentView, UpdateStudentRequest},
        DeleteResponse,
    },
};
use college_db::{
    hydrate::Hydrator,
    repositories::{schedule::list_schedules_for_group, student},
};
use std::sync::Arc;

use super::found;
use crate::{extract::AppJson, middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn create_student(
    State(state): State<Arc<ApiState>>,
    AppJson(payload): AppJson<CreateStudentRequest>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    let student = student::create_student(state.store(), &payload).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

#[axum::debug_handler]
pub async fn list_students(State(state): State<Arc<ApiState>>) -> Result<Json<Vec<StudentView>>, AppError> {
    let store = state.store();
    let students = student::list_students(store).await?;
    Ok(Json(Hydrator::new(store).students(students).await))
}

#[axum::debug_handler]
pub async fn get_student(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<StudentView>, AppError> {
    let id = parse_id("student", &id)?;
    let store = state.store();
    let student = found(student::get_student_by_id(store, id).await?, "student", id)?;
    Ok(Json(Hydrator::new(store).student(student).await))
}

#[axum::debug_handler]
pub async fn update_student(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateStudentRequest>,
) -> Result<Json<Student>, AppError> {
    let id = parse_id("student", &id)?;
    let student = student::update_student(state.store(), id, &payload).await?;
    Ok(Json(found(student, "student", id)?))
}

#[axum::debug_handler]
pub async fn delete_student(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let id = parse_id("student", &id)?;
    if !student::delete_student(state.store(), id).await? {
        return Err(AppError::not_found(format!("student {id} not found")));
    }
    Ok(Json(DeleteResponse::new("Student deleted successfully")))
}

/// The path segment is the student's national ID, not a record id.
#[axum::debug_handler]
pub async fn get_student_schedule(
    State(state): State<Arc<ApiState>>,
    Path(iin): Path<String>,
) -> Result<Json<StudentScheduleResponse>, AppError> {
    let store = state.store();
    let student = student::get_student_by_iin(store, &iin).await?;
    let student = found(student, "student with IIN", &iin)?;

    let schedules = list_schedules_for_group(store, student.group_id).await?;
    let schedules = Hydrator::new(store).schedules(schedules).await;

    Ok(Json(StudentScheduleResponse { student, schedules }))
}
