use chrono::Utc;
use college_core::{
    calendar::require_time,
    errors::CollegeResult,
    ids::parse_id,
    models::schedule::{
        validate_day_of_week, validate_schedule_shift, CreateScheduleRequest, Schedule,
        ScheduleRefs, UpdateScheduleRequest,
    },
    patch::Patch,
};
use uuid::Uuid;

use super::{
    delete_by_id, ensure_exists, exists, find_all, find_by_id, insert, set_optional_text,
    set_required, set_required_text, update_by_id,
};
use crate::store::{Collection, Condition, DocumentStore, Filter, Update};

/// Parses a reference id and checks that it resolves.
async fn resolve_reference(
    store: &dyn DocumentStore,
    collection: Collection,
    entity: &str,
    raw: &str,
) -> CollegeResult<Uuid> {
    let id = parse_id(entity, raw)?;
    ensure_exists(store, collection, entity, id).await?;
    Ok(id)
}

/// Verifies group, teacher and subject before anything is written.
pub async fn create_schedule(store: &dyn DocumentStore, request: &CreateScheduleRequest) -> CollegeResult<Schedule> {
    request.validate()?;
    let refs = ScheduleRefs {
        group_id: resolve_reference(store, Collection::Groups, "group", &request.group_id).await?,
        teacher_id: resolve_reference(store, Collection::Teachers, "teacher", &request.teacher_id)
            .await?,
        subject_id: resolve_reference(store, Collection::Subjects, "subject", &request.subject_id)
            .await?,
    };

    let mut schedule = Schedule::new(request, refs, Utc::now());
    schedule.id = insert(store, Collection::Schedules, &schedule).await?;

    tracing::debug!(
        "Schedule created: id={}, group={}, teacher={}, day={}",
        schedule.id,
        schedule.group_id,
        schedule.teacher_id,
        schedule.day_of_week
    );
    Ok(schedule)
}

pub async fn get_schedule_by_id(store: &dyn DocumentStore, id: Uuid) -> CollegeResult<Option<Schedule>> {
    find_by_id(store, Collection::Schedules, id).await
}

pub async fn list_schedules(store: &dyn DocumentStore) -> CollegeResult<Vec<Schedule>> {
    find_all(store, Collection::Schedules, &Filter::all()).await
}

pub async fn list_schedules_by_day(store: &dyn DocumentStore, day_of_week: u8) -> CollegeResult<Vec<Schedule>> {
    let filter = Filter::all().and(Condition::eq("day_of_week", day_of_week));
    find_all(store, Collection::Schedules, &filter).await
}

pub async fn list_schedules_for_group(store: &dyn DocumentStore, group_id: Uuid) -> CollegeResult<Vec<Schedule>> {
    let filter = Filter::all().and(Condition::id_eq("group_id", group_id));
    find_all(store, Collection::Schedules, &filter).await
}

pub async fn list_schedules_for_teacher(
    store: &dyn DocumentStore,
    teacher_id: Uuid,
) -> CollegeResult<Vec<Schedule>> {
    let filter = Filter::all().and(Condition::id_eq("teacher_id", teacher_id));
    find_all(store, Collection::Schedules, &filter).await
}

/// Sets a reference field after checking the new target exists.
async fn set_reference(
    store: &dyn DocumentStore,
    update: &mut Update,
    field: &'static str,
    patch: &Patch<String>,
    collection: Collection,
    entity: &str,
) -> CollegeResult<()> {
    if let Some(raw) = patch.required_text(field)? {
        let id = resolve_reference(store, collection, entity, raw).await?;
        update.set(field, &id)?;
    }
    Ok(())
}

pub async fn update_schedule(
    store: &dyn DocumentStore,
    id: Uuid,
    request: &UpdateScheduleRequest,
) -> CollegeResult<Option<Schedule>> {
    if !exists(store, Collection::Schedules, id).await? {
        return Ok(None);
    }

    let mut update = Update::new();
    set_reference(store, &mut update, "group_id", &request.group_id, Collection::Groups, "group").await?;
    set_reference(
        store,
        &mut update,
        "teacher_id",
        &request.teacher_id,
        Collection::Teachers,
        "teacher",
    )
    .await?;
    set_reference(
        store,
        &mut update,
        "subject_id",
        &request.subject_id,
        Collection::Subjects,
        "subject",
    )
    .await?;
    set_required_text(&mut update, "room", &request.room)?;
    if let Some(day) = request.day_of_week.required("day_of_week")? {
        validate_day_of_week(*day)?;
    }
    set_required(&mut update, "day_of_week", &request.day_of_week)?;
    if let Some(start) = request.start_time.required_text("start_time")? {
        require_time("start_time", start)?;
    }
    set_required_text(&mut update, "start_time", &request.start_time)?;
    if let Some(end) = request.end_time.required_text("end_time")? {
        require_time("end_time", end)?;
    }
    set_required_text(&mut update, "end_time", &request.end_time)?;
    if let Some(shift) = request.shift.required("shift")? {
        validate_schedule_shift(*shift)?;
    }
    set_required(&mut update, "shift", &request.shift)?;
    set_optional_text(&mut update, "description", &request.description)?;

    tracing::debug!(%id, "updating schedule");
    update_by_id(store, Collection::Schedules, id, update).await
}

pub async fn delete_schedule(store: &dyn DocumentStore, id: Uuid) -> CollegeResult<bool> {
    delete_by_id(store, Collection::Schedules, id).await
}
