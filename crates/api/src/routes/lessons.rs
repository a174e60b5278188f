use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers::lessons, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/lessons", get(lessons::list_lessons_filtered).post(lessons::create_lesson))
        .route("/lessons/available", get(lessons::list_available_lessons))
        .route("/lessons/date/:date", get(lessons::list_lessons_by_date))
        .route(
            "/lessons/:id",
            get(lessons::get_lesson)
                .put(lessons::update_lesson)
                .delete(lessons::delete_lesson),
        )
}
