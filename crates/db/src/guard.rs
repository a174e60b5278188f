//! # Referential Guard
//!
//! Before an entity is deleted, every collection that may point at it is
//! counted. Any dependent blocks the delete.
//!
//! The check is advisory: it runs before the delete, not inside a transaction
//! with it, so a dependent inserted in between goes unnoticed. A count that
//! fails refuses the delete.

use college_core::errors::{CollegeError, CollegeResult};
use uuid::Uuid;

use crate::store::{Collection, Condition, DocumentStore, Filter};

/// An entity about to be deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    Group(Uuid),
    Subject(Uuid),
    Teacher(Uuid),
    /// Time slots are matched by their exact time strings, not by id.
    TimeSlot { start_time: String, end_time: String },
}

/// A dependent collection together with the filter selecting dependents.
#[derive(Debug, Clone, PartialEq)]
pub struct Dependent {
    pub collection: Collection,
    pub filter: Filter,
}

impl DeleteTarget {
    pub fn entity(&self) -> &'static str {
        match self {
            Self::Group(_) => "group",
            Self::Subject(_) => "subject",
            Self::Teacher(_) => "teacher",
            Self::TimeSlot { .. } => "time slot",
        }
    }

    pub fn dependents(&self) -> Vec<Dependent> {
        let referencing = |collection: Collection, field: &'static str, id: &Uuid| Dependent {
            collection,
            filter: Filter::all().and(Condition::id_eq(field, *id)),
        };

        match self {
            Self::Group(id) => vec![
                referencing(Collection::Students, "group_id", id),
                referencing(Collection::Lessons, "group_id", id),
            ],
            Self::Subject(id) => vec![referencing(Collection::Lessons, "subject_id", id)],
            Self::Teacher(id) => vec![
                referencing(Collection::Schedules, "teacher_id", id),
                referencing(Collection::Lessons, "teacher_id", id),
            ],
            Self::TimeSlot {
                start_time,
                end_time,
            } => vec![Dependent {
                collection: Collection::Lessons,
                filter: Filter::all()
                    .and(Condition::eq("start_time", start_time.as_str()))
                    .and(Condition::eq("end_time", end_time.as_str())),
            }],
        }
    }
}

/// Collections that still hold dependents of `target`.
pub async fn blocking_collections(
    store: &dyn DocumentStore,
    target: &DeleteTarget,
) -> CollegeResult<Vec<&'static str>> {
    let mut blocking = Vec::new();
    for dependent in target.dependents() {
        let count = store.count(dependent.collection, &dependent.filter).await?;
        if count > 0 {
            tracing::debug!(
                entity = target.entity(),
                dependents = %dependent.collection,
                count,
                "delete blocked by dependents"
            );
            blocking.push(dependent.collection.as_str());
        }
    }
    Ok(blocking)
}

pub async fn can_delete(store: &dyn DocumentStore, target: &DeleteTarget) -> CollegeResult<bool> {
    Ok(blocking_collections(store, target).await?.is_empty())
}

/// Fails with [`CollegeError::ReferentialConflict`] while dependents exist.
pub async fn ensure_deletable(store: &dyn DocumentStore, target: &DeleteTarget) -> CollegeResult<()> {
    let dependents = blocking_collections(store, target).await?;
    if dependents.is_empty() {
        return Ok(());
    }
    Err(CollegeError::ReferentialConflict {
        entity: target.entity(),
        dependents,
    })
}
