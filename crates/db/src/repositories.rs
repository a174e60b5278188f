//! Per-entity read/write operations on top of a [`DocumentStore`].
//!
//! Writes verify the entities they reference and the natural keys they must
//! keep unique before touching the store. Partial updates only change the
//! fields a request supplies.

pub mod group;
pub mod lesson;
pub mod schedule;
pub mod student;
pub mod subject;
pub mod teacher;
pub mod time_slot;

use college_core::{
    errors::{CollegeError, CollegeResult},
    patch::Patch,
};
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use crate::store::{
    from_document, to_document, Collection, Condition, DocumentStore, Filter, Update,
};

pub(crate) async fn find_by_id<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: Collection,
    id: Uuid,
) -> CollegeResult<Option<T>> {
    match store.find_one(collection, &Filter::by_id(id)).await? {
        Some(document) => Ok(Some(from_document(document)?)),
        None => Ok(None),
    }
}

pub(crate) async fn find_all<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: Collection,
    filter: &Filter,
) -> CollegeResult<Vec<T>> {
    store
        .find_many(collection, filter)
        .await?
        .into_iter()
        .map(|document| from_document(document).map_err(CollegeError::from))
        .collect()
}

/// Inserts `entity` and returns the identifier the store assigned.
pub(crate) async fn insert<T: Serialize>(
    store: &dyn DocumentStore,
    collection: Collection,
    entity: &T,
) -> CollegeResult<Uuid> {
    let mut document = to_document(entity)?;
    document.remove("id");
    Ok(store.insert_one(collection, document).await?)
}

pub(crate) async fn exists(
    store: &dyn DocumentStore,
    collection: Collection,
    id: Uuid,
) -> CollegeResult<bool> {
    Ok(store.count(collection, &Filter::by_id(id)).await? > 0)
}

/// Fails with `NotFound` unless a document with `id` exists.
pub(crate) async fn ensure_exists(
    store: &dyn DocumentStore,
    collection: Collection,
    entity: &str,
    id: Uuid,
) -> CollegeResult<()> {
    if !exists(store, collection, id).await? {
        return Err(CollegeError::NotFound(format!("{entity} {id} not found")));
    }
    Ok(())
}

/// Fails with a validation error when another document already holds `value`
/// in `field`. `except` names the document being updated.
pub(crate) async fn ensure_unique(
    store: &dyn DocumentStore,
    collection: Collection,
    field: &'static str,
    value: &str,
    except: Option<Uuid>,
) -> CollegeResult<()> {
    let filter = Filter::all().and(Condition::eq(field, value));
    let except = except.map(|id| serde_json::Value::String(id.to_string()));
    let taken = store
        .find_many(collection, &filter)
        .await?
        .iter()
        .any(|document| document.get("id") != except.as_ref());
    if taken {
        return Err(CollegeError::Validation(format!(
            "{field} {value} is already in use"
        )));
    }
    Ok(())
}

/// Applies `update` to the document with `id` and reads it back.
/// `None` when no such document exists.
pub(crate) async fn update_by_id<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: Collection,
    id: Uuid,
    update: Update,
) -> CollegeResult<Option<T>> {
    if !store.update_one(collection, &Filter::by_id(id), update).await? {
        return Ok(None);
    }
    find_by_id(store, collection, id).await
}

pub(crate) async fn delete_by_id(
    store: &dyn DocumentStore,
    collection: Collection,
    id: Uuid,
) -> CollegeResult<bool> {
    Ok(store.delete_one(collection, &Filter::by_id(id)).await?)
}

/// Writes a required text field when supplied. Returns the written value.
pub(crate) fn set_required_text<'a>(
    update: &mut Update,
    field: &'static str,
    patch: &'a Patch<String>,
) -> CollegeResult<Option<&'a str>> {
    let value = patch.required_text(field)?;
    if let Some(value) = value {
        update.set(field, value)?;
    }
    Ok(value)
}

/// Writes or removes an optional text field.
pub(crate) fn set_optional_text(
    update: &mut Update,
    field: &'static str,
    patch: &Patch<String>,
) -> CollegeResult<()> {
    match patch.text() {
        Patch::Absent => {}
        Patch::Clear => {
            update.unset(field);
        }
        Patch::Set(value) => {
            update.set(field, value)?;
        }
    }
    Ok(())
}

/// Writes a required non-text field when supplied. Returns the written value.
pub(crate) fn set_required<'a, T: Serialize>(
    update: &mut Update,
    field: &'static str,
    patch: &'a Patch<T>,
) -> CollegeResult<Option<&'a T>> {
    let value = patch.required(field)?;
    if let Some(value) = value {
        update.set(field, value)?;
    }
    Ok(value)
}
