use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers::groups, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/groups", get(groups::list_groups).post(groups::create_group))
        .route(
            "/groups/:id",
            get(groups::get_group)
                .put(groups::update_group)
                .delete(groups::delete_group),
        )
}
