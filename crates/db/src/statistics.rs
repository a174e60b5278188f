//! Lesson statistics over a date window.
//!
//! All counts share one base filter; each bucket derives its own filter from
//! it. Count failures abort the computation. Name lookups for the rankings
//! only log and leave the name out.

use chrono::NaiveDate;
use college_core::{
    calendar::{end_of_day, format_date, require_date, start_of_day},
    errors::CollegeResult,
    models::{
        group::Group,
        statistics::{
            DayOfWeekCount, LessonStatistics, RankedEntry, ShiftCounts, StatisticsPeriod,
            StatisticsQuery, DAY_NAMES, DEFAULT_PERIOD_DAYS, TOP_LIMIT,
        },
        teacher::Teacher,
    },
    shift::{FIRST_SHIFT, SECOND_SHIFT},
};
use uuid::Uuid;

use crate::{
    repositories::{group::get_group_by_id, teacher::get_teacher_by_id},
    store::{Collection, Condition, DocumentStore, Filter},
};

/// Effective `[start, end]` window. Missing bounds default to the last
/// [`DEFAULT_PERIOD_DAYS`] days; a supplied bound must parse.
pub fn resolve_period(query: &StatisticsQuery, today: NaiveDate) -> CollegeResult<(NaiveDate, NaiveDate)> {
    let bound = |field: &str, raw: &Option<String>, default: NaiveDate| match raw.as_deref() {
        Some(raw) if !raw.is_empty() => require_date(field, raw),
        _ => Ok(default),
    };

    let start = bound(
        "start_date",
        &query.start_date,
        today - chrono::Duration::days(DEFAULT_PERIOD_DAYS),
    )?;
    let end = bound("end_date", &query.end_date, today)?;
    Ok((start, end))
}

/// Dated lessons inside the window, narrowed by group and teacher when those
/// parse as identifiers.
pub fn base_filter(query: &StatisticsQuery, start: NaiveDate, end: NaiveDate) -> Filter {
    let mut filter = Filter::all()
        .and(Condition::gte("date", start_of_day(start)))
        .and(Condition::lte("date", end_of_day(end)))
        .and(Condition::not_null("date"));

    let id = |raw: &Option<String>| raw.as_deref().and_then(|raw| Uuid::parse_str(raw.trim()).ok());
    if let Some(group_id) = id(&query.group_id) {
        filter = filter.and(Condition::id_eq("group_id", group_id));
    }
    if let Some(teacher_id) = id(&query.teacher_id) {
        filter = filter.and(Condition::id_eq("teacher_id", teacher_id));
    }
    filter
}

async fn top_by(
    store: &dyn DocumentStore,
    filter: &Filter,
    field: &'static str,
) -> CollegeResult<Vec<(Uuid, u64)>> {
    let buckets = store
        .count_by(Collection::Lessons, filter, field, TOP_LIMIT)
        .await?;
    Ok(buckets
        .into_iter()
        .filter_map(|bucket| {
            let id = bucket.key.as_str().and_then(|raw| Uuid::parse_str(raw).ok())?;
            Some((id, bucket.count))
        })
        .collect())
}

async fn teacher_name(store: &dyn DocumentStore, id: Uuid) -> Option<String> {
    match get_teacher_by_id(store, id).await {
        Ok(teacher) => teacher.as_ref().map(Teacher::full_name),
        Err(e) => {
            tracing::warn!(%id, "could not resolve teacher name: {e}");
            None
        }
    }
}

async fn group_name(store: &dyn DocumentStore, id: Uuid) -> Option<String> {
    match get_group_by_id(store, id).await {
        Ok(group) => group.map(|Group { name, .. }| name),
        Err(e) => {
            tracing::warn!(%id, "could not resolve group name: {e}");
            None
        }
    }
}

pub async fn lesson_statistics(
    store: &dyn DocumentStore,
    query: &StatisticsQuery,
    today: NaiveDate,
) -> CollegeResult<LessonStatistics> {
    let (start, end) = resolve_period(query, today)?;
    let base = base_filter(query, start, end);
    tracing::debug!(%start, %end, "computing lesson statistics");

    let total_lessons = store.count(Collection::Lessons, &base).await?;

    let by_shift = ShiftCounts {
        first_shift: store
            .count(Collection::Lessons, &base.and(Condition::eq("shift", FIRST_SHIFT)))
            .await?,
        second_shift: store
            .count(Collection::Lessons, &base.and(Condition::eq("shift", SECOND_SHIFT)))
            .await?,
    };

    // Lessons carry no day_of_week, so these stay at zero.
    let mut by_day_of_week = Vec::with_capacity(DAY_NAMES.len());
    for (day, name) in (1u8..).zip(DAY_NAMES) {
        let count = store
            .count(Collection::Lessons, &base.and(Condition::eq("day_of_week", day)))
            .await?;
        by_day_of_week.push(DayOfWeekCount {
            day_of_week: day,
            name: name.to_string(),
            count,
        });
    }

    let mut top_teachers = Vec::new();
    for (id, count) in top_by(store, &base, "teacher_id").await? {
        top_teachers.push(RankedEntry {
            id,
            count,
            name: teacher_name(store, id).await,
        });
    }

    let mut top_groups = Vec::new();
    for (id, count) in top_by(store, &base, "group_id").await? {
        top_groups.push(RankedEntry {
            id,
            count,
            name: group_name(store, id).await,
        });
    }

    Ok(LessonStatistics {
        period: StatisticsPeriod {
            start_date: format_date(start),
            end_date: format_date(end),
        },
        total_lessons,
        by_shift,
        by_day_of_week,
        top_teachers,
        top_groups,
    })
}
