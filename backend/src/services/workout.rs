//! Workout service - catalog-derived calorie totals and workout log writes

use crate::error::ApiError;
use crate::repositories::{ExerciseCatalogRepository, FitnessStore, WorkoutRepository};
use crate::services::stats::StatsService;
use chrono::Utc;
use tracing::{info, warn};
use trackit_shared::types::{
    CatalogExerciseResponse, CreateWorkoutRequest, DeletedResponse, WorkoutExerciseInput,
};
use trackit_shared::validation::{
    check_field, validate_calories, validate_duration_minutes, validate_exercise_minutes,
    validate_reps, validate_sets, ValidationError,
};
use trackit_shared::{CalorieRate, ExerciseVolume, NewExerciseEntry, NewWorkout, WorkoutEntry};

/// Workout logging operations
pub struct WorkoutService;

impl WorkoutService {
    /// Log a workout and recompute the stat for the day it was performed
    ///
    /// With exercises, calories burned is the sum of each exercise's catalog
    /// rate times its volume and any caller-supplied total is ignored.
    pub async fn create_workout(
        store: &dyn FitnessStore,
        req: CreateWorkoutRequest,
    ) -> Result<WorkoutEntry, ApiError> {
        let name = req.name.trim().to_string();
        if name.is_empty() {
            return Err(ApiError::invalid_field("name", "Workout name is required"));
        }
        let workout_type = req.workout_type.trim().to_string();
        if workout_type.is_empty() {
            return Err(ApiError::invalid_field("workout_type", "Workout type is required"));
        }
        check_field("duration_minutes", req.duration_minutes, validate_duration_minutes)?;

        let mut exercises = Vec::with_capacity(req.exercises.len());
        for input in &req.exercises {
            exercises.push(Self::price_exercise(store, input).await?);
        }

        let calories_burned = if exercises.is_empty() {
            let supplied = req
                .calories_burned
                .ok_or_else(|| ApiError::missing_fields(&["calories_burned"]))?;
            check_field("calories_burned", supplied, validate_calories)?;
            supplied
        } else {
            if req.calories_burned.is_some() {
                warn!(user_id = req.user_id, "Ignoring supplied calories_burned for workout with exercises");
            }
            let total = exercises
                .iter()
                .try_fold(0i32, |acc, e| acc.checked_add(e.calories))
                .ok_or_else(|| {
                    ValidationError::new("calories_burned", "Calorie value unreasonably high")
                })?;
            check_field("calories_burned", total, validate_calories)?;
            total
        };

        let workout = NewWorkout {
            user_id: req.user_id,
            name,
            workout_type,
            duration_minutes: req.duration_minutes,
            calories_burned,
            performed_at: req.performed_at.unwrap_or_else(Utc::now),
            notes: req.notes,
            exercises,
        };

        let stored = store
            .insert_workout(&workout)
            .await?;
        metrics::counter!("trackit_workouts_created_total").increment(1);
        info!(
            user_id = stored.user_id,
            workout_id = stored.id,
            exercises = stored.exercises.len(),
            calories_burned = stored.calories_burned,
            "Workout logged"
        );

        StatsService::recompute_daily_stat(store, stored.user_id, stored.date()).await?;
        Ok(stored)
    }

    /// Resolve an exercise against the catalog and compute its contribution
    async fn price_exercise(
        store: &dyn FitnessStore,
        input: &WorkoutExerciseInput,
    ) -> Result<NewExerciseEntry, ApiError> {
        let def = store
            .find_exercise(&input.name)
            .await?
            .ok_or_else(|| {
                ApiError::invalid_field(
                    "exercises",
                    format!("Exercise '{}' is not in the catalog", input.name),
                )
            })?;

        Self::check_volume(input).map_err(|err| {
            ApiError::invalid_field("exercises", format!("{}: {}", def.name, err.user_message()))
        })?;

        let volume = ExerciseVolume {
            sets: input.sets,
            reps: input.reps,
            duration_minutes: input.duration_minutes,
        };
        let calories = def.rate.calories_for(&volume).ok_or_else(|| {
            let needs = match def.rate {
                CalorieRate::PerRep(_) => "sets and reps of at least 1",
                CalorieRate::PerMinute(_) => "duration_minutes of at least 1",
            };
            ApiError::invalid_field("exercises", format!("{} needs {}", def.name, needs))
        })?;

        // keep only the volume the rate uses
        let (sets, reps, duration_minutes) = match def.rate {
            CalorieRate::PerRep(_) => (input.sets, input.reps, None),
            CalorieRate::PerMinute(_) => (None, None, input.duration_minutes),
        };

        Ok(NewExerciseEntry {
            name: def.name,
            exercise_type: def.category,
            sets,
            reps,
            duration_minutes,
            weight_kg: input.weight_kg,
            calories,
        })
    }

    /// Range-check every volume field the caller supplied
    fn check_volume(input: &WorkoutExerciseInput) -> Result<(), ValidationError> {
        if let Some(sets) = input.sets {
            check_field("sets", sets, validate_sets)?;
        }
        if let Some(reps) = input.reps {
            check_field("reps", reps, validate_reps)?;
        }
        if let Some(minutes) = input.duration_minutes {
            check_field("duration_minutes", minutes, validate_exercise_minutes)?;
        }
        Ok(())
    }

    /// A user's workouts with exercises, newest first
    pub async fn list_workouts(
        store: &dyn FitnessStore,
        user_id: i64,
    ) -> Result<Vec<WorkoutEntry>, ApiError> {
        store.list_workouts(user_id).await.map_err(ApiError::from)
    }

    /// Delete a workout with its exercises and recompute its day
    pub async fn delete_workout(
        store: &dyn FitnessStore,
        user_id: i64,
        id: i64,
    ) -> Result<DeletedResponse, ApiError> {
        let deleted = store
            .delete_workout(user_id, id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Workout {} not found", id)))?;

        info!(user_id, workout_id = id, "Workout deleted");
        StatsService::recompute_daily_stat(store, user_id, deleted.date()).await?;

        Ok(DeletedResponse { id, deleted: true })
    }

    /// Delete one exercise; its workout's total is re-summed and the day
    /// recomputed
    pub async fn delete_exercise(
        store: &dyn FitnessStore,
        user_id: i64,
        exercise_id: i64,
    ) -> Result<WorkoutEntry, ApiError> {
        let workout = store
            .delete_exercise(user_id, exercise_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Exercise {} not found", exercise_id)))?;

        info!(
            user_id,
            exercise_id,
            workout_id = workout.id,
            calories_burned = workout.calories_burned,
            "Workout exercise deleted"
        );
        StatsService::recompute_daily_stat(store, user_id, workout.date()).await?;

        Ok(workout)
    }

    /// The exercise catalog ordered by name
    pub async fn catalog(
        store: &dyn FitnessStore,
    ) -> Result<Vec<CatalogExerciseResponse>, ApiError> {
        let exercises = store.list_exercises().await?;
        Ok(exercises.into_iter().map(CatalogExerciseResponse::from).collect())
    }
}
