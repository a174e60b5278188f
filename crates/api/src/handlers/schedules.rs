use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use college_core::{
    errors::CollegeError,
    ids::parse_id,
    models::{
        schedule::{validate_day_of_week, CreateScheduleRequest, Schedule, ScheduleView, UpdateScheduleRequest},
        DeleteResponse,
    },
};
use college_db::{hydrate::Hydrator, repositories::schedule};
use std::sync::Arc;

use super::found;
use crate::{extract::AppJson, middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn create_schedule(
    State(state): State<Arc<ApiState>>,
    AppJson(payload): AppJson<CreateScheduleRequest>,
) -> Result<(StatusCode, Json<Schedule>), AppError> {
    let schedule = schedule::create_schedule(state.store(), &payload).await?;
    Ok((StatusCode::CREATED, Json(schedule)))
}

#[axum::debug_handler]
pub async fn list_schedules(State(state): State<Arc<ApiState>>) -> Result<Json<Vec<ScheduleView>>, AppError> {
    let store = state.store();
    let schedules = schedule::list_schedules(store).await?;
    Ok(Json(Hydrator::new(store).schedules(schedules).await))
}

#[axum::debug_handler]
pub async fn list_schedules_by_day(
    State(state): State<Arc<ApiState>>,
    Path(day): Path<String>,
) -> Result<Json<Vec<ScheduleView>>, AppError> {
    let day: u8 = day
        .trim()
        .parse()
        .map_err(|_| CollegeError::Validation(format!("Invalid day of week: {day}")))?;
    validate_day_of_week(day)?;

    let store = state.store();
    let schedules = schedule::list_schedules_by_day(store, day).await?;
    Ok(Json(Hydrator::new(store).schedules(schedules).await))
}

#[axum::debug_handler]
pub async fn get_schedule(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<ScheduleView>, AppError> {
    let id = parse_id("schedule", &id)?;
    let store = state.store();
    let schedule = found(schedule::get_schedule_by_id(store, id).await?, "schedule", id)?;
    Ok(Json(Hydrator::new(store).schedule(schedule).await))
}

#[axum::debug_handler]
pub async fn update_schedule(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateScheduleRequest>,
) -> Result<Json<Schedule>, AppError> {
    let id = parse_id("schedule", &id)?;
    let schedule = schedule::update_schedule(state.store(), id, &payload).await?;
    Ok(Json(found(schedule, "schedule", id)?))
}

#[axum::debug_handler]
pub async fn delete_schedule(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let id = parse_id("schedule", &id)?;
    if !schedule::delete_schedule(state.store(), id).await? {
        return Err(AppError::not_found(format!("schedule {id} not found")));
    }
    Ok(Json(DeleteResponse::new("Schedule deleted successfully")))
}
