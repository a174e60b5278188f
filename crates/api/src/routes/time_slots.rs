use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers::time_slots, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/time-slots",
            get(time_slots::list_time_slots).post(time_slots::create_time_slot),
        )
        .route(
            "/time-slots/:id",
            get(time_slots::get_time_slot)
                .put(time_slots::update_time_slot)
                .delete(time_slots::delete_time_slot),
        )
}
