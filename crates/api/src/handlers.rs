//! Request handlers, one module per resource.
//!
//! Handlers parse identifiers, call into `college-db` and shape responses.
//! Creates answer `201 Created`; missing entities become `404`.

pub mod groups;
pub mod lessons;
pub mod schedules;
pub mod statistics;
pub mod students;
pub mod subjects;
pub mod teachers;
pub mod time_slots;

use crate::middleware::error_handling::AppError;

/// Turns a lookup result into the entity or a not-found error.
pub(crate) fn found<T>(entity: Option<T>, kind: &str, id: impl std::fmt::Display) -> Result<T, AppError> {
    entity.ok_or_else(|| AppError::not_found(format!("{kind} {id} not found")))
}
