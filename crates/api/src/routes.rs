//! Route tables, one module per resource.
//!
//! Resource routes are relative and get nested under `/api/v1` by
//! [`crate::build_router`]; health and version stay at the root.

pub mod groups;
pub mod health;
pub mod lessons;
pub mod schedules;
pub mod statistics;
pub mod students;
pub mod subjects;
pub mod teachers;
pub mod time_slots;

use axum::Router;
use std::sync::Arc;

use crate::ApiState;

/// Every resource route, without the version prefix.
pub fn api_routes() -> Router<Arc<ApiState>> {
    Router::new()
        .merge(groups::routes())
        .merge(subjects::routes())
        .merge(students::routes())
        .merge(teachers::routes())
        .merge(schedules::routes())
        .merge(lessons::routes())
        .merge(time_slots::routes())
        .merge(statistics::routes())
}
