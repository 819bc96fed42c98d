//! Daily stats API routes

use crate::error::ApiResult;
use crate::services::StatsService;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use trackit_shared::types::{DailyStatResponse, StatsQuery};

/// Create stats routes
pub fn stats_routes() -> Router<AppState> {
    Router::new().route("/", get(get_daily_stats))
}

/// GET /api/v1/stats?user_id=&start_date=&end_date=
///
/// Each missing date defaults to today (UTC). Only days with a stored row
/// are returned.
async fn get_daily_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> ApiResult<Json<Vec<DailyStatResponse>>> {
    let today = Utc::now().date_naive();
    let start = query.start_date.unwrap_or(today);
    let end = query.end_date.unwrap_or(today);

    let stats = StatsService::get_daily_stats(state.store(), query.user_id, start, end).await?;
    Ok(Json(stats))
}
