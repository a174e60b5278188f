use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers::statistics, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route("/statistics/lessons", get(statistics::get_lesson_statistics))
}
