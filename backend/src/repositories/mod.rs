//! Data access layer
//!
//! Services talk to storage only through the traits below. [`PgStore`] backs
//! them with Postgres; [`MemoryStore`] keeps everything in process memory for
//! tests and database-less runs.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use trackit_shared::{
    DailyStat, ExerciseDefinition, FoodEntry, NewFoodEntry, NewWorkout, UserProfile, WorkoutEntry,
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// One profile row per user
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Insert or fully replace the user's profile
    ///
    /// `created_at` of an existing row is kept; the stored row is returned.
    async fn upsert_profile(&self, profile: &UserProfile) -> Result<UserProfile>;

    async fn find_profile(&self, user_id: i64) -> Result<Option<UserProfile>>;
}

/// Append-only food log
#[async_trait]
pub trait FoodRepository: Send + Sync {
    async fn insert_food(&self, entry: &NewFoodEntry) -> Result<FoodEntry>;

    /// All of a user's entries, newest first
    async fn list_food(&self, user_id: i64) -> Result<Vec<FoodEntry>>;

    /// Delete an entry owned by the user, returning it if it existed
    async fn delete_food(&self, user_id: i64, id: i64) -> Result<Option<FoodEntry>>;

    /// Sum of calories consumed on a UTC day
    async fn sum_food_calories(&self, user_id: i64, date: NaiveDate) -> Result<i32>;
}

/// Workouts and their exercises
#[async_trait]
pub trait WorkoutRepository: Send + Sync {
    /// Insert the workout and all of its exercises atomically
    async fn insert_workout(&self, workout: &NewWorkout) -> Result<WorkoutEntry>;

    /// All of a user's workouts with exercises, newest first
    async fn list_workouts(&self, user_id: i64) -> Result<Vec<WorkoutEntry>>;

    /// Delete a workout and its exercises, returning it if it existed
    async fn delete_workout(&self, user_id: i64, id: i64) -> Result<Option<WorkoutEntry>>;

    /// Delete one exercise and re-sum its workout's calories_burned
    ///
    /// Returns the updated workout, or `None` if the exercise does not exist
    /// or belongs to another user.
    async fn delete_exercise(&self, user_id: i64, exercise_id: i64)
        -> Result<Option<WorkoutEntry>>;

    /// Sum of calories burned on a UTC day
    async fn sum_workout_calories(&self, user_id: i64, date: NaiveDate) -> Result<i32>;
}

/// Exercise reference data
#[async_trait]
pub trait ExerciseCatalogRepository: Send + Sync {
    /// All exercises ordered by name
    async fn list_exercises(&self) -> Result<Vec<ExerciseDefinition>>;

    /// Case-insensitive lookup by name
    async fn find_exercise(&self, name: &str) -> Result<Option<ExerciseDefinition>>;
}

/// Per-day rollups
#[async_trait]
pub trait DailyStatRepository: Send + Sync {
    /// Replace the (user, date) row with `stat` in a single write
    async fn upsert_daily_stat(&self, stat: &DailyStat) -> Result<DailyStat>;

    /// Stored rows in `[start, end]`, ascending by date
    async fn list_daily_stats(
        &self,
        user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyStat>>;
}

/// Everything the services need from storage
#[async_trait]
pub trait FitnessStore:
    ProfileRepository
    + FoodRepository
    + WorkoutRepository
    + ExerciseCatalogRepository
    + DailyStatRepository
{
    /// Short name for logs and the readiness probe
    fn backend_name(&self) -> &'static str;

    /// Check that the store can serve requests
    async fn ping(&self) -> Result<()>;
}

/// Half-open UTC range `[00:00 of date, 00:00 of the next day)`
pub(crate) fn utc_day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_time(chrono::NaiveTime::MIN).and_utc();
    (start, start + Duration::days(1))
}
