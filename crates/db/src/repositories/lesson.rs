use chrono::Utc;
use college_core::{
    calendar::{require_date, require_time, start_of_day},
    errors::CollegeResult,
    ids::parse_id,
    models::lesson::{
        validate_lesson_shift, CreateLessonRequest, Lesson, LessonRefs, UpdateLessonRequest,
    },
    patch::Patch,
    shift::{determine_shift, UNDETERMINED_SHIFT},
};
use uuid::Uuid;

use super::{
    delete_by_id, exists, find_all, find_by_id, insert, set_optional_text, set_required_text,
    update_by_id,
};
use crate::store::{Collection, DocumentStore, Filter, Update};

/// Lesson references are parsed but not looked up; hydration copes with
/// dangling ones.
pub async fn create_lesson(store: &dyn DocumentStore, request: &CreateLessonRequest) -> CollegeResult<Lesson> {
    request.validate()?;
    let refs = LessonRefs {
        group_id: parse_id("group", &request.group_id)?,
        teacher_id: parse_id("teacher", &request.teacher_id)?,
        subject_id: parse_id("subject", &request.subject_id)?,
    };

    let mut lesson = Lesson::new(request, refs, Utc::now())?;
    lesson.id = insert(store, Collection::Lessons, &lesson).await?;

    tracing::debug!(
        id = %lesson.id,
        shift = lesson.shift,
        available = lesson.is_available(),
        "lesson created"
    );
    Ok(lesson)
}

pub async fn get_lesson_by_id(store: &dyn DocumentStore, id: Uuid) -> CollegeResult<Option<Lesson>> {
    find_by_id(store, Collection::Lessons, id).await
}

pub async fn find_lessons(store: &dyn DocumentStore, filter: &Filter) -> CollegeResult<Vec<Lesson>> {
    find_all(store, Collection::Lessons, filter).await
}

fn set_id(update: &mut Update, field: &'static str, entity: &str, patch: &Patch<String>) -> CollegeResult<()> {
    if let Some(raw) = patch.required_text(field)? {
        update.set(field, &parse_id(entity, raw)?)?;
    }
    Ok(())
}

/// Applies a partial lesson update.
///
/// A new start time re-derives the shift; an explicit shift of 1 or 2 wins
/// over the derived one. Clearing the start time resets the shift to 0.
pub async fn update_lesson(
    store: &dyn DocumentStore,
    id: Uuid,
    request: &UpdateLessonRequest,
) -> CollegeResult<Option<Lesson>> {
    if !exists(store, Collection::Lessons, id).await? {
        return Ok(None);
    }

    let mut update = Update::new();
    set_id(&mut update, "group_id", "group", &request.group_id)?;
    set_id(&mut update, "teacher_id", "teacher", &request.teacher_id)?;
    set_id(&mut update, "subject_id", "subject", &request.subject_id)?;
    set_required_text(&mut update, "room", &request.room)?;

    match request.date.text() {
        Patch::Absent => {}
        Patch::Clear => {
            update.unset("date");
        }
        Patch::Set(date) => {
            update.set("date", &start_of_day(require_date("date", date)?))?;
        }
    }

    let derived_shift = match request.start_time.text() {
        Patch::Absent => None,
        Patch::Clear => {
            update.unset("start_time");
            Some(UNDETERMINED_SHIFT)
        }
        Patch::Set(start) => {
            require_time("start_time", start)?;
            update.set("start_time", start)?;
            Some(determine_shift(start))
        }
    };

    match request.end_time.text() {
        Patch::Absent => {}
        Patch::Clear => {
            update.unset("end_time");
        }
        Patch::Set(end) => {
            require_time("end_time", end)?;
            update.set("end_time", end)?;
        }
    }

    let explicit_shift = match request.shift {
        Patch::Set(shift) if shift > 0 => Some(shift),
        _ => None,
    };
    validate_lesson_shift(explicit_shift)?;
    if let Some(shift) = explicit_shift.or(derived_shift) {
        update.set("shift", &shift)?;
    }

    set_optional_text(&mut update, "description", &request.description)?;

    tracing::debug!(%id, "updating lesson");
    update_by_id(store, Collection::Lessons, id, update).await
}

pub async fn delete_lesson(store: &dyn DocumentStore, id: Uuid) -> CollegeResult<bool> {
    delete_by_id(store, Collection::Lessons, id).await
}
