use chrono::Utc;
use college_core::{
    errors::CollegeResult,
    models::subject::{CreateSubjectRequest, Subject, UpdateSubjectRequest},
};
use uuid::Uuid;

use super::{
    delete_by_id, ensure_unique, exists, find_all, find_by_id, insert, set_optional_text,
    set_required_text, update_by_id,
};
use crate::store::{Collection, DocumentStore, Filter, Update};

pub async fn create_subject(store: &dyn DocumentStore, request: &CreateSubjectRequest) -> CollegeResult<Subject> {
    request.validate()?;
    ensure_unique(store, Collection::Subjects, "code", &request.code, None).await?;

    let mut subject = Subject::new(request, Utc::now());
    subject.id = insert(store, Collection::Subjects, &subject).await?;

    tracing::debug!(id = %subject.id, code = %subject.code, "subject created");
    Ok(subject)
}

pub async fn get_subject_by_id(store: &dyn DocumentStore, id: Uuid) -> CollegeResult<Option<Subject>> {
    find_by_id(store, Collection::Subjects, id).await
}

pub async fn list_subjects(store: &dyn DocumentStore) -> CollegeResult<Vec<Subject>> {
    find_all(store, Collection::Subjects, &Filter::all()).await
}

pub async fn update_subject(
    store: &dyn DocumentStore,
    id: Uuid,
    request: &UpdateSubjectRequest,
) -> CollegeResult<Option<Subject>> {
    if !exists(store, Collection::Subjects, id).await? {
        return Ok(None);
    }

    let mut update = Update::new();
    set_required_text(&mut update, "name", &request.name)?;
    if let Some(code) = set_required_text(&mut update, "code", &request.code)? {
        ensure_unique(store, Collection::Subjects, "code", code, Some(id)).await?;
    }
    set_optional_text(&mut update, "description", &request.description)?;

    tracing::debug!(%id, "updating subject");
    update_by_id(store, Collection::Subjects, id, update).await
}

pub async fn delete_subject(store: &dyn DocumentStore, id: Uuid) -> CollegeResult<bool> {
    delete_by_id(store, Collection::Subjects, id).await
}
