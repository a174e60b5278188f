use chrono::Utc;
use college_core::{
    calendar::require_time,
    errors::{CollegeError, CollegeResult},
    models::time_slot::{
        default_label, CreateTimeSlotRequest, TimeSlot, TimeSlotListQuery, UpdateTimeSlotRequest,
    },
    shift::is_valid_shift,
};
use uuid::Uuid;

use super::{delete_by_id, find_all, find_by_id, insert, set_required, set_required_text, update_by_id};
use crate::store::{Collection, Condition, DocumentStore, Filter, Update};

pub async fn create_time_slot(store: &dyn DocumentStore, request: &CreateTimeSlotRequest) -> CollegeResult<TimeSlot> {
    request.validate()?;

    let mut slot = TimeSlot::new(request, Utc::now());
    slot.id = insert(store, Collection::TimeSlots, &slot).await?;

    tracing::debug!(id = %slot.id, label = %slot.label, "time slot created");
    Ok(slot)
}

pub async fn get_time_slot_by_id(store: &dyn DocumentStore, id: Uuid) -> CollegeResult<Option<TimeSlot>> {
    find_by_id(store, Collection::TimeSlots, id).await
}

/// Boolean spellings accepted by the `is_active` filter.
fn parse_flag(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

/// Filter for the time slot listing. Values that do not parse are dropped.
pub fn time_slot_filter(query: &TimeSlotListQuery) -> Filter {
    let mut filter = Filter::all();
    if let Some(shift) = query.shift.as_deref().and_then(|s| s.parse::<i64>().ok()) {
        filter = filter.and(Condition::eq("shift", shift));
    }
    if let Some(active) = query.is_active.as_deref().and_then(parse_flag) {
        filter = filter.and(Condition::eq("is_active", active));
    }
    filter
}

pub async fn list_time_slots(store: &dyn DocumentStore, query: &TimeSlotListQuery) -> CollegeResult<Vec<TimeSlot>> {
    find_all(store, Collection::TimeSlots, &time_slot_filter(query)).await
}

/// Changing either time rewrites the label from the resulting pair,
/// replacing any label sent alongside.
pub async fn update_time_slot(
    store: &dyn DocumentStore,
    id: Uuid,
    request: &UpdateTimeSlotRequest,
) -> CollegeResult<Option<TimeSlot>> {
    let Some(existing) = get_time_slot_by_id(store, id).await? else {
        return Ok(None);
    };

    let mut update = Update::new();
    let start = set_required_text(&mut update, "start_time", &request.start_time)?;
    if let Some(start) = start {
        require_time("start_time", start)?;
    }
    let end = set_required_text(&mut update, "end_time", &request.end_time)?;
    if let Some(end) = end {
        require_time("end_time", end)?;
    }
    if let Some(shift) = set_required(&mut update, "shift", &request.shift)? {
        if !is_valid_shift(*shift) {
            return Err(CollegeError::Validation("shift must be 1 or 2".to_string()));
        }
    }
    set_required_text(&mut update, "label", &request.label)?;
    set_required(&mut update, "is_active", &request.is_active)?;

    if start.is_some() || end.is_some() {
        let label = default_label(
            start.unwrap_or(existing.start_time.as_str()),
            end.unwrap_or(existing.end_time.as_str()),
        );
        update.set("label", &label)?;
    }

    tracing::debug!(%id, "updating time slot");
    update_by_id(store, Collection::TimeSlots, id, update).await
}

pub async fn delete_time_slot(store: &dyn DocumentStore, id: Uuid) -> CollegeResult<bool> {
    delete_by_id(store, Collection::TimeSlots, id).await
}
