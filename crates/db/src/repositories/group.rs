use chrono::Utc;
use college_core::{
    errors::CollegeResult,
    models::group::{CreateGroupRequest, Group, UpdateGroupRequest},
};
use uuid::Uuid;

use super::{
    delete_by_id, exists, find_all, find_by_id, insert, set_optional_text, set_required_text,
    update_by_id,
};
use crate::store::{Collection, DocumentStore, Filter, Update};

pub async fn create_group(store: &dyn DocumentStore, request: &CreateGroupRequest) -> CollegeResult<Group> {
    request.validate()?;

    let mut group = Group::new(request, Utc::now());
    group.id = insert(store, Collection::Groups, &group).await?;

    tracing::debug!(id = %group.id, name = %group.name, "group created");
    Ok(group)
}

pub async fn get_group_by_id(store: &dyn DocumentStore, id: Uuid) -> CollegeResult<Option<Group>> {
    tracing::debug!("Getting group by id: {}", id);
    find_by_id(store, Collection::Groups, id).await
}

pub async fn list_groups(store: &dyn DocumentStore) -> CollegeResult<Vec<Group>> {
    find_all(store, Collection::Groups, &Filter::all()).await
}

/// Returns `None` when the group does not exist.
pub async fn update_group(
    store: &dyn DocumentStore,
    id: Uuid,
    request: &UpdateGroupRequest,
) -> CollegeResult<Option<Group>> {
    if !exists(store, Collection::Groups, id).await? {
        return Ok(None);
    }

    let mut update = Update::new();
    set_required_text(&mut update, "name", &request.name)?;
    set_optional_text(&mut update, "description", &request.description)?;

    tracing::debug!(%id, "updating group");
    update_by_id(store, Collection::Groups, id, update).await
}

pub async fn delete_group(store: &dyn DocumentStore, id: Uuid) -> CollegeResult<bool> {
    delete_by_id(store, Collection::Groups, id).await
}
