use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers::subjects, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/subjects", get(subjects::list_subjects).post(subjects::create_subject))
        .route(
            "/subjects/:id",
            get(subjects::get_subject)
                .put(subjects::update_subject)
                .delete(subjects::delete_subject),
        )
}
