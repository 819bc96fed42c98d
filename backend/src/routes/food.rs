//! Food log API routes

use crate::error::ApiResult;
use crate::services::FoodService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use trackit_shared::types::{CreateFoodRequest, DeletedResponse, UserQuery};
use trackit_shared::FoodEntry;

/// Create food routes
pub fn food_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_food).post(create_food))
        .route("/:id", delete(delete_food))
}

/// POST /api/v1/food - Log a food entry
async fn create_food(
    State(state): State<AppState>,
    Json(req): Json<CreateFoodRequest>,
) -> ApiResult<(StatusCode, Json<FoodEntry>)> {
    let entry = FoodService::create_food(state.store(), req).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /api/v1/food?user_id= - Food log, newest first
async fn list_food(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> ApiResult<Json<Vec<FoodEntry>>> {
    let entries = FoodService::list_food(state.store(), query.user_id).await?;
    Ok(Json(entries))
}

/// DELETE /api/v1/food/:id?user_id=
async fn delete_food(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<UserQuery>,
) -> ApiResult<Json<DeletedResponse>> {
    let resp = FoodService::delete_food(state.store(), query.user_id, id).await?;
    Ok(Json(resp))
}
