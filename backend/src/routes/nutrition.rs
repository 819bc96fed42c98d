//! Nutrition lookup API routes

use crate::error::ApiResult;
use crate::services::NutritionService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use trackit_shared::nutrition::ServingNutrition;
use trackit_shared::types::{FoodSearchQuery, FoodSearchResult, ServingQuery};

/// Create nutrition routes
pub fn nutrition_routes() -> Router<AppState> {
    Router::new()
        .route("/search", get(search_foods))
        .route("/foods/:id", get(get_serving))
}

/// GET /api/v1/nutrition/search?query=&limit=
async fn search_foods(
    State(state): State<AppState>,
    Query(query): Query<FoodSearchQuery>,
) -> ApiResult<Json<Vec<FoodSearchResult>>> {
    let results = NutritionService::search(state.nutrition(), &query.query, query.limit).await?;
    Ok(Json(results))
}

/// GET /api/v1/nutrition/foods/:id?grams= - Nutrition scaled to a serving
async fn get_serving(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<ServingQuery>,
) -> ApiResult<Json<ServingNutrition>> {
    let serving = NutritionService::serving(state.nutrition(), id, query.grams).await?;
    Ok(Json(serving))
}
