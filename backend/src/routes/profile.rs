//! User profile API routes

use crate::error::ApiResult;
use crate::services::ProfileService;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use trackit_shared::types::{SaveProfileRequest, UserProfileResponse, UserQuery};

/// Create profile routes
pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/", get(get_profile).post(save_profile))
}

/// POST /api/v1/profile - Create or replace a profile
///
/// Recomputes the daily calorie goal from the submitted values.
async fn save_profile(
    State(state): State<AppState>,
    Json(req): Json<SaveProfileRequest>,
) -> ApiResult<Json<UserProfileResponse>> {
    let profile = ProfileService::save_profile(state.store(), req.user_id, req.profile).await?;
    Ok(Json(profile))
}

/// GET /api/v1/profile?user_id= - Get a profile with derived read-outs
async fn get_profile(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> ApiResult<Json<UserProfileResponse>> {
    let profile = ProfileService::get_profile(state.store(), query.user_id).await?;
    Ok(Json(profile))
}
