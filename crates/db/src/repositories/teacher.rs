use chrono::Utc;
use college_core::{
    errors::CollegeResult,
    models::teacher::{CreateTeacherRequest, Teacher, UpdateTeacherRequest},
    patch::Patch,
};
use uuid::Uuid;

use super::{
    delete_by_id, ensure_unique, exists, find_all, find_by_id, insert, set_required_text,
    update_by_id,
};
use crate::store::{from_document, Collection, Condition, DocumentStore, Filter, Update};

pub async fn create_teacher(store: &dyn DocumentStore, request: &CreateTeacherRequest) -> CollegeResult<Teacher> {
    request.validate()?;
    ensure_unique(store, Collection::Teachers, "iin", &request.iin, None).await?;

    let mut teacher = Teacher::new(request, Utc::now());
    teacher.id = insert(store, Collection::Teachers, &teacher).await?;

    tracing::debug!(id = %teacher.id, "teacher created");
    Ok(teacher)
}

pub async fn get_teacher_by_id(store: &dyn DocumentStore, id: Uuid) -> CollegeResult<Option<Teacher>> {
    find_by_id(store, Collection::Teachers, id).await
}

pub async fn get_teacher_by_iin(store: &dyn DocumentStore, iin: &str) -> CollegeResult<Option<Teacher>> {
    let filter = Filter::all().and(Condition::eq("iin", iin));
    match store.find_one(Collection::Teachers, &filter).await? {
        Some(document) => Ok(Some(from_document(document)?)),
        None => Ok(None),
    }
}

pub async fn list_teachers(store: &dyn DocumentStore) -> CollegeResult<Vec<Teacher>> {
    find_all(store, Collection::Teachers, &Filter::all()).await
}

pub async fn update_teacher(
    store: &dyn DocumentStore,
    id: Uuid,
    request: &UpdateTeacherRequest,
) -> CollegeResult<Option<Teacher>> {
    if !exists(store, Collection::Teachers, id).await? {
        return Ok(None);
    }

    let mut update = Update::new();
    if let Some(iin) = set_required_text(&mut update, "iin", &request.iin)? {
        ensure_unique(store, Collection::Teachers, "iin", iin, Some(id)).await?;
    }
    set_required_text(&mut update, "first_name", &request.first_name)?;
    set_required_text(&mut update, "last_name", &request.last_name)?;
    match &request.subjects {
        Patch::Absent => {}
        Patch::Clear => {
            update.set("subjects", &Vec::<String>::new())?;
        }
        Patch::Set(subjects) => {
            update.set("subjects", subjects)?;
        }
    }

    tracing::debug!(%id, "updating teacher");
    update_by_id(store, Collection::Teachers, id, update).await
}

pub async fn delete_teacher(store: &dyn DocumentStore, id: Uuid) -> CollegeResult<bool> {
    delete_by_id(store, Collection::Teachers, id).await
}
