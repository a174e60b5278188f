//! Filter construction for the lesson listings.
//!
//! Query parameters arrive as raw strings. Anything that does not parse is
//! dropped from the filter instead of failing the request.

use chrono::NaiveDate;
use college_core::{
    calendar::{end_of_day, next_day, parse_date, start_of_day},
    errors::CollegeResult,
    models::lesson::{Lesson, LessonListQuery},
    shift::is_valid_shift,
};
use uuid::Uuid;

use crate::{
    repositories::lesson::find_lessons,
    store::{Condition, DocumentStore, Filter},
};

/// Date constraint: an inclusive range when both bounds parse, else a single
/// day, else nothing.
pub fn date_conditions(query: &LessonListQuery) -> Vec<Condition> {
    let parsed = |raw: &Option<String>| raw.as_deref().and_then(parse_date);

    match (parsed(&query.start_date), parsed(&query.end_date)) {
        (Some(start), Some(end)) => vec![
            Condition::gte("date", start_of_day(start)),
            Condition::lte("date", end_of_day(end)),
        ],
        _ => match parsed(&query.date) {
            Some(day) => single_day(day),
            None => Vec::new(),
        },
    }
}

fn single_day(day: NaiveDate) -> Vec<Condition> {
    vec![
        Condition::gte("date", start_of_day(day)),
        Condition::lt("date", next_day(day)),
    ]
}

fn id_param(raw: &Option<String>) -> Option<Uuid> {
    raw.as_deref().and_then(|raw| Uuid::parse_str(raw.trim()).ok())
}

pub fn lesson_filter(query: &LessonListQuery) -> Filter {
    let mut filter = Filter::all();
    for condition in date_conditions(query) {
        filter = filter.and(condition);
    }
    if let Some(group_id) = id_param(&query.group_id) {
        filter = filter.and(Condition::id_eq("group_id", group_id));
    }
    if let Some(teacher_id) = id_param(&query.teacher_id) {
        filter = filter.and(Condition::id_eq("teacher_id", teacher_id));
    }
    if let Some(shift) = query
        .shift
        .as_deref()
        .and_then(|raw| raw.trim().parse::<u8>().ok())
        .filter(|shift| is_valid_shift(*shift))
    {
        filter = filter.and(Condition::eq("shift", shift));
    }
    filter
}

/// Lessons dated on `day`.
pub fn day_filter(day: NaiveDate) -> Filter {
    single_day(day)
        .into_iter()
        .fold(Filter::all(), |filter, condition| filter.and(condition))
}

/// Lessons without a `date` attribute. A stored `null` date does not count.
pub fn available_filter() -> Filter {
    Filter::all().and(Condition::missing("date"))
}

pub async fn list_lessons(store: &dyn DocumentStore, query: &LessonListQuery) -> CollegeResult<Vec<Lesson>> {
    find_lessons(store, &lesson_filter(query)).await
}

pub async fn lessons_on(store: &dyn DocumentStore, day: NaiveDate) -> CollegeResult<Vec<Lesson>> {
    find_lessons(store, &day_filter(day)).await
}

pub async fn available_lessons(store: &dyn DocumentStore) -> CollegeResult<Vec<Lesson>> {
    find_lessons(store, &available_filter()).await
}
