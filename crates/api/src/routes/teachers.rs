use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers::teachers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/teachers", get(teachers::list_teachers).post(teachers::create_teacher))
        .route(
            "/teachers/:id",
            get(teachers::get_teacher)
                .put(teachers::update_teacher)
                .delete(teachers::delete_teacher),
        )
        .route("/teachers/:id/schedule", get(teachers::get_teacher_schedule))
}
