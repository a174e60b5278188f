use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use college_core::models::statistics::{LessonStatistics, StatisticsQuery};
use college_db::statistics::lesson_statistics;
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, ApiState};

/// Defaults to the last 30 days when no period is given.
#[axum::debug_handler]
pub async fn get_lesson_statistics(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<StatisticsQuery>,
) -> Result<Json<LessonStatistics>, AppError> {
    let today = Utc::now().date_naive();
    let statistics = lesson_statistics(state.store(), &query, today).await?;
    Ok(Json(statistics))
}
