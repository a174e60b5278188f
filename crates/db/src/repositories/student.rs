use chrono::Utc;
use college_core::{
    errors::CollegeResult,
    ids::parse_id,
    models::student::{CreateStudentRequest, Student, UpdateStudentRequest},
};
use uuid::Uuid;

use super::{
    delete_by_id, ensure_exists, ensure_unique, exists, find_all, find_by_id, insert,
    set_required_text, update_by_id,
};
use crate::store::{from_document, Collection, Condition, DocumentStore, Filter, Update};

pub async fn create_student(store: &dyn DocumentStore, request: &CreateStudentRequest) -> CollegeResult<Student> {
    request.validate()?;
    let group_id = parse_id("group", &request.group_id)?;
    ensure_exists(store, Collection::Groups, "group", group_id).await?;
    ensure_unique(store, Collection::Students, "iin", &request.iin, None).await?;

    let mut student = Student::new(request, group_id, Utc::now());
    student.id = insert(store, Collection::Students, &student).await?;

    tracing::debug!(id = %student.id, %group_id, "student created");
    Ok(student)
}

pub async fn get_student_by_id(store: &dyn DocumentStore, id: Uuid) -> CollegeResult<Option<Student>> {
    find_by_id(store, Collection::Students, id).await
}

pub async fn get_student_by_iin(store: &dyn DocumentStore, iin: &str) -> CollegeResult<Option<Student>> {
    let filter = Filter::all().and(Condition::eq("iin", iin));
    match store.find_one(Collection::Students, &filter).await? {
        Some(document) => Ok(Some(from_document(document)?)),
        None => Ok(None),
    }
}

pub async fn list_students(store: &dyn DocumentStore) -> CollegeResult<Vec<Student>> {
    find_all(store, Collection::Students, &Filter::all()).await
}

/// A new `group_id` must name an existing group.
pub async fn update_student(
    store: &dyn DocumentStore,
    id: Uuid,
    request: &UpdateStudentRequest,
) -> CollegeResult<Option<Student>> {
    if !exists(store, Collection::Students, id).await? {
        return Ok(None);
    }

    let mut update = Update::new();
    if let Some(iin) = set_required_text(&mut update, "iin", &request.iin)? {
        ensure_unique(store, Collection::Students, "iin", iin, Some(id)).await?;
    }
    set_required_text(&mut update, "first_name", &request.first_name)?;
    set_required_text(&mut update, "last_name", &request.last_name)?;
    if let Some(raw) = request.group_id.required_text("group_id")? {
        let group_id = parse_id("group", raw)?;
        ensure_exists(store, Collection::Groups, "group", group_id).await?;
        update.set("group_id", &group_id)?;
    }

    tracing::debug!(%id, "updating student");
    update_by_id(store, Collection::Students, id, update).await
}

pub async fn delete_student(store: &dyn DocumentStore, id: Uuid) -> CollegeResult<bool> {
    delete_by_id(store, Collection::Students, id).await
}
