use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers::students, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/students", get(students::list_students).post(students::create_student))
        .route(
            "/students/:id",
            get(students::get_student)
                .put(students::update_student)
                .delete(students::delete_student),
        )
        // `:id` carries the national ID here; sibling parameters must share a name.
        .route("/students/:id/schedule", get(students::get_student_schedule))
}
