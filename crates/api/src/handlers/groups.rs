use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use college_core::{
    ids::parse_id,
    models::{
        group::{CreateGroupRequest, Group, UpdateGroupRequest},
        DeleteResponse,
    },
};
use college_db::{
    guard::{ensure_deletable, DeleteTarget},
    repositories::group,
};
use std::sync::Arc;

use super::found;
use crate::{extract::AppJson, middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn create_group(
    State(state): State<Arc<ApiState>>,
    AppJson(payload): AppJson<CreateGroupRequest>,
) -> Result<(StatusCode, Json<Group>), AppError> {
    let group = group::create_group(state.store(), &payload).await?;
    Ok((StatusCode::CREATED, Json(group)))
}

#[axum::debug_handler]
pub async fn list_groups(State(state): State<Arc<ApiState>>) -> Result<Json<Vec<Group>>, AppError> {
    Ok(Json(group::list_groups(state.store()).await?))
}

#[axum::debug_handler]
pub async fn get_group(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<Group>, AppError> {
    let id = parse_id("group", &id)?;
    let group = group::get_group_by_id(state.store(), id).await?;
    Ok(Json(found(group, "group", id)?))
}

#[axum::debug_handler]
pub async fn update_group(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateGroupRequest>,
) -> Result<Json<Group>, AppError> {
    let id = parse_id("group", &id)?;
    let group = group::update_group(state.store(), id, &payload).await?;
    Ok(Json(found(group, "group", id)?))
}

/// Refuses while students or lessons still reference the group.
#[axum::debug_handler]
pub async fn delete_group(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let id = parse_id("group", &id)?;
    let store = state.store();
    found(group::get_group_by_id(store, id).await?, "group", id)?;

    ensure_deletable(store, &DeleteTarget::Group(id)).await?;
    group::delete_group(store, id).await?;

    tracing::info!(%id, "group deleted");
    Ok(Json(DeleteResponse::new("Group deleted successfully")))
}
