//! Workout log and exercise catalog API routes

use crate::error::ApiResult;
use crate::services::WorkoutService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use trackit_shared::types::{
    CatalogExerciseResponse, CreateWorkoutRequest, DeletedResponse, UserQuery,
};
use trackit_shared::WorkoutEntry;

/// Create workout routes
pub fn workout_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_workouts).post(create_workout))
        .route("/:id", delete(delete_workout))
}

/// Routes addressing single exercises inside a workout
pub fn workout_exercise_routes() -> Router<AppState> {
    Router::new().route("/:id", delete(delete_exercise))
}

/// Exercise catalog routes
pub fn exercise_routes() -> Router<AppState> {
    Router::new().route("/", get(list_catalog))
}

/// POST /api/v1/workouts - Log a workout
///
/// Calories burned are derived from the catalog when exercises are given.
async fn create_workout(
    State(state): State<AppState>,
    Json(req): Json<CreateWorkoutRequest>,
) -> ApiResult<(StatusCode, Json<WorkoutEntry>)> {
    let workout = WorkoutService::create_workout(state.store(), req).await?;
    Ok((StatusCode::CREATED, Json(workout)))
}

/// GET /api/v1/workouts?user_id= - Workouts with exercises, newest first
async fn list_workouts(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> ApiResult<Json<Vec<WorkoutEntry>>> {
    let workouts = WorkoutService::list_workouts(state.store(), query.user_id).await?;
    Ok(Json(workouts))
}

/// DELETE /api/v1/workouts/:id?user_id=
async fn delete_workout(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<UserQuery>,
) -> ApiResult<Json<DeletedResponse>> {
    let resp = WorkoutService::delete_workout(state.store(), query.user_id, id).await?;
    Ok(Json(resp))
}

/// DELETE /api/v1/workout-exercises/:id?user_id= - Returns the updated workout
async fn delete_exercise(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<UserQuery>,
) -> ApiResult<Json<WorkoutEntry>> {
    let workout = WorkoutService::delete_exercise(state.store(), query.user_id, id).await?;
    Ok(Json(workout))
}

/// GET /api/v1/exercises
async fn list_catalog(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<CatalogExerciseResponse>>> {
    Ok(Json(WorkoutService::catalog(state.store()).await?))
}
