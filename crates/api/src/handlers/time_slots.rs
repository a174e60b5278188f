use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use college_core::{
    ids::parse_id,
    models::{
        time_slot::{CreateTimeSlotRequest, TimeSlot, TimeSlotListQuery, UpdateTimeSlotRequest},
        DeleteResponse,
    },
};
use college_db::{
    guard::{ensure_deletable, DeleteTarget},
    repositories::time_slot,
};
use std::sync::Arc;

use super::found;
use crate::{extract::AppJson, middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn create_time_slot(
    State(state): State<Arc<ApiState>>,
    AppJson(payload): AppJson<CreateTimeSlotRequest>,
) -> Result<(StatusCode, Json<TimeSlot>), AppError> {
    let slot = time_slot::create_time_slot(state.store(), &payload).await?;
    Ok((StatusCode::CREATED, Json(slot)))
}

#[axum::debug_handler]
pub async fn list_time_slots(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<TimeSlotListQuery>,
) -> Result<Json<Vec<TimeSlot>>, AppError> {
    Ok(Json(time_slot::list_time_slots(state.store(), &query).await?))
}

#[axum::debug_handler]
pub async fn get_time_slot(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<TimeSlot>, AppError> {
    let id = parse_id("time slot", &id)?;
    let slot = time_slot::get_time_slot_by_id(state.store(), id).await?;
    Ok(Json(found(slot, "time slot", id)?))
}

#[axum::debug_handler]
pub async fn update_time_slot(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateTimeSlotRequest>,
) -> Result<Json<TimeSlot>, AppError> {
    let id = parse_id("time slot", &id)?;
    let slot = time_slot::update_time_slot(state.store(), id, &payload).await?;
    Ok(Json(found(slot, "time slot", id)?))
}

/// Refuses while any lesson runs at exactly this slot's times.
#[axum::debug_handler]
pub async fn delete_time_slot(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let id = parse_id("time slot", &id)?;
    let store = state.store();
    let slot = found(time_slot::get_time_slot_by_id(store, id).await?, "time slot", id)?;

    let target = DeleteTarget::TimeSlot {
        start_time: slot.start_time,
        end_time: slot.end_time,
    };
    ensure_deletable(store, &target).await?;
    time_slot::delete_time_slot(store, id).await?;

    tracing::info!(%id, "time slot deleted");
    Ok(Json(DeleteResponse::new("Time slot deleted successfully")))
}
