use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers::schedules, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/schedules", get(schedules::list_schedules).post(schedules::create_schedule))
        .route("/schedules/day/:day", get(schedules::list_schedules_by_day))
        .route(
            "/schedules/:id",
            get(schedules::get_schedule)
                .put(schedules::update_schedule)
                .delete(schedules::delete_schedule),
        )
}
