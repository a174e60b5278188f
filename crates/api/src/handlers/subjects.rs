use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use college_core::{
    ids::parse_id,
    models::{
        subject::{CreateSubjectRequest, Subject, UpdateSubjectRequest},
        DeleteResponse,
    },
};
use college_db::{
    guard::{ensure_deletable, DeleteTarget},
    repositories::subject,
};
use std::sync::Arc;

use super::found;
use crate::{extract::AppJson, middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn create_subject(
    State(state): State<Arc<ApiState>>,
    AppJson(payload): AppJson<CreateSubjectRequest>,
) -> Result<(StatusCode, Json<Subject>), AppError> {
    let subject = subject::create_subject(state.store(), &payload).await?;
    Ok((StatusCode::CREATED, Json(subject)))
}

#[axum::debug_handler]
pub async fn list_subjects(State(state): State<Arc<ApiState>>) -> Result<Json<Vec<Subject>>, AppError> {
    Ok(Json(subject::list_subjects(state.store()).await?))
}

#[axum::debug_handler]
pub async fn get_subject(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<Subject>, AppError> {
    let id = parse_id("subject", &id)?;
    let subject = subject::get_subject_by_id(state.store(), id).await?;
    Ok(Json(found(subject, "subject", id)?))
}

#[axum::debug_handler]
pub async fn update_subject(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateSubjectRequest>,
) -> Result<Json<Subject>, AppError> {
    let id = parse_id("subject", &id)?;
    let subject = subject::update_subject(state.store(), id, &payload).await?;
    Ok(Json(found(subject, "subject", id)?))
}

#[axum::debug_handler]
pub async fn delete_subject(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let id = parse_id("subject", &id)?;
    let store = state.store();
    found(subject::get_subject_by_id(store, id).await?, "subject", id)?;

    ensure_deletable(store, &DeleteTarget::Subject(id)).await?;
    subject::delete_subject(store, id).await?;

    tracing::info!(%id, "subject deleted");
    Ok(Json(DeleteResponse::new("Subject deleted successfully")))
}
