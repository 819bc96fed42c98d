//! Postgres-backed store

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use std::collections::HashMap;
use trackit_shared::{
    CalorieRate, DailyStat, ExerciseCategory, ExerciseDefinition, ExerciseEntry, FoodEntry,
    NewFoodEntry, NewWorkout, UserProfile, WorkoutEntry,
};

use super::{
    utc_day_bounds, DailyStatRepository, ExerciseCatalogRepository, FitnessStore,
    FoodRepository, ProfileRepository, WorkoutRepository,
};
use crate::db;

/// Store over a Postgres pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    user_id: i64,
    age: i32,
    gender: String,
    height_cm: f64,
    weight_kg: f64,
    activity_level: String,
    goal: String,
    target_weight_kg: Option<f64>,
    time_frame_weeks: Option<i32>,
    weight_change_rate_kg_per_week: Option<f64>,
    daily_calorie_goal: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProfileRow> for UserProfile {
    type Error = anyhow::Error;

    fn try_from(row: ProfileRow) -> Result<Self> {
        Ok(UserProfile {
            user_id: row.user_id,
            age: row.age,
            gender: row.gender.parse()?,
            height_cm: row.height_cm,
            weight_kg: row.weight_kg,
            activity_level: row.activity_level.parse()?,
            goal: row.goal.parse()?,
            target_weight_kg: row.target_weight_kg,
            time_frame_weeks: row.time_frame_weeks,
            weight_change_rate_kg_per_week: row.weight_change_rate_kg_per_week,
            daily_calorie_goal: row.daily_calorie_goal,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct FoodRow {
    id: i64,
    user_id: i64,
    name: String,
    serving_size_g: f64,
    calories: i32,
    protein_g: f64,
    carbs_g: f64,
    fat_g: f64,
    source_id: Option<i64>,
    consumed_at: DateTime<Utc>,
}

impl From<FoodRow> for FoodEntry {
    fn from(row: FoodRow) -> Self {
        FoodEntry {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            serving_size_g: row.serving_size_g,
            calories: row.calories,
            protein_g: row.protein_g,
            carbs_g: row.carbs_g,
            fat_g: row.fat_g,
            source_id: row.source_id,
            consumed_at: row.consumed_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct WorkoutRow {
    id: i64,
    user_id: i64,
    name: String,
    workout_type: String,
    duration_minutes: i32,
    calories_burned: i32,
    performed_at: DateTime<Utc>,
    notes: Option<String>,
}

impl WorkoutRow {
    fn with_exercises(self, exercises: Vec<ExerciseEntry>) -> WorkoutEntry {
        WorkoutEntry {
            id: self.id,
            user_id: self.user_id,
            name: self.name,
            workout_type: self.workout_type,
            duration_minutes: self.duration_minutes,
            calories_burned: self.calories_burned,
            performed_at: self.performed_at,
            notes: self.notes,
            exercises,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ExerciseRow {
    id: i64,
    workout_id: i64,
    name: String,
    exercise_type: String,
    sets: Option<i32>,
    reps: Option<i32>,
    duration_minutes: Option<i32>,
    weight_kg: Option<f64>,
    calories: i32,
}

impl TryFrom<ExerciseRow> for ExerciseEntry {
    type Error = anyhow::Error;

    fn try_from(row: ExerciseRow) -> Result<Self> {
        let exercise_type: ExerciseCategory =
            row.exercise_type.parse().map_err(anyhow::Error::msg)?;
        Ok(ExerciseEntry {
            id: row.id,
            workout_id: row.workout_id,
            name: row.name,
            exercise_type,
            sets: row.sets,
            reps: row.reps,
            duration_minutes: row.duration_minutes,
            weight_kg: row.weight_kg,
            calories: row.calories,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CatalogRow {
    name: String,
    category: String,
    muscle_group: String,
    equipment: String,
    calories_per_rep: Option<f64>,
    calories_per_minute: Option<f64>,
}

impl TryFrom<CatalogRow> for ExerciseDefinition {
    type Error = anyhow::Error;

    fn try_from(row: CatalogRow) -> Result<Self> {
        let category: ExerciseCategory = row.category.parse().map_err(anyhow::Error::msg)?;
        let rate = CalorieRate::from_columns(row.calories_per_rep, row.calories_per_minute)
            .with_context(|| format!("exercise '{}' has no calorie rate", row.name))?;
        Ok(ExerciseDefinition {
            name: row.name,
            category,
            muscle_group: row.muscle_group,
            equipment: row.equipment,
            rate,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct DailyStatRow {
    user_id: i64,
    date: NaiveDate,
    total_calories_consumed: i32,
    total_calories_burned: i32,
    net_calories: i32,
}

impl From<DailyStatRow> for DailyStat {
    fn from(row: DailyStatRow) -> Self {
        DailyStat {
            user_id: row.user_id,
            date: row.date,
            total_calories_consumed: row.total_calories_consumed,
            total_calories_burned: row.total_calories_burned,
            net_calories: row.net_calories,
        }
    }
}

const PROFILE_COLUMNS: &str = "user_id, age, gender, height_cm, weight_kg, activity_level, goal, \
     target_weight_kg, time_frame_weeks, weight_change_rate_kg_per_week, daily_calorie_goal, \
     created_at, updated_at";

const FOOD_COLUMNS: &str =
    "id, user_id, name, serving_size_g, calories, protein_g, carbs_g, fat_g, source_id, consumed_at";

const WORKOUT_COLUMNS: &str =
    "id, user_id, name, workout_type, duration_minutes, calories_burned, performed_at, notes";

const EXERCISE_COLUMNS: &str =
    "id, workout_id, name, exercise_type, sets, reps, duration_minutes, weight_kg, calories";

fn sum_to_i32(sum: i64) -> Result<i32> {
    i32::try_from(sum).context("daily calorie sum out of range")
}

async fn fetch_exercises(
    tx: &mut Transaction<'_, Postgres>,
    workout_id: i64,
) -> Result<Vec<ExerciseEntry>> {
    let rows = sqlx::query_as::<_, ExerciseRow>(&format!(
        "SELECT {EXERCISE_COLUMNS} FROM workout_exercises WHERE workout_id = $1 ORDER BY position"
    ))
    .bind(workout_id)
    .fetch_all(&mut **tx)
    .await?;

    rows.into_iter().map(ExerciseEntry::try_from).collect()
}

// ============================================================================
// Repository implementations
// ============================================================================

#[async_trait]
impl ProfileRepository for PgStore {
    async fn upsert_profile(&self, profile: &UserProfile) -> Result<UserProfile> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            r#"
            INSERT INTO user_profiles (
                user_id, age, gender, height_cm, weight_kg, activity_level, goal,
                target_weight_kg, time_frame_weeks, weight_change_rate_kg_per_week,
                daily_calorie_goal, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ON CONFLICT (user_id) DO UPDATE SET
                age = EXCLUDED.age,
                gender = EXCLUDED.gender,
                height_cm = EXCLUDED.height_cm,
                weight_kg = EXCLUDED.weight_kg,
                activity_level = EXCLUDED.activity_level,
                goal = EXCLUDED.goal,
                target_weight_kg = EXCLUDED.target_weight_kg,
                time_frame_weeks = EXCLUDED.time_frame_weeks,
                weight_change_rate_kg_per_week = EXCLUDED.weight_change_rate_kg_per_week,
                daily_calorie_goal = EXCLUDED.daily_calorie_goal,
                updated_at = EXCLUDED.updated_at
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(profile.user_id)
        .bind(profile.age)
        .bind(profile.gender.as_str())
        .bind(profile.height_cm)
        .bind(profile.weight_kg)
        .bind(profile.activity_level.as_str())
        .bind(profile.goal.as_str())
        .bind(profile.target_weight_kg)
        .bind(profile.time_frame_weeks)
        .bind(profile.weight_change_rate_kg_per_week)
        .bind(profile.daily_calorie_goal)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn find_profile(&self, user_id: i64) -> Result<Option<UserProfile>> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM user_profiles WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserProfile::try_from).transpose()
    }
}

#[async_trait]
impl FoodRepository for PgStore {
    async fn insert_food(&self, entry: &NewFoodEntry) -> Result<FoodEntry> {
        let row = sqlx::query_as::<_, FoodRow>(&format!(
            r#"
            INSERT INTO food_entries (
                user_id, name, serving_size_g, calories, protein_g, carbs_g, fat_g,
                source_id, consumed_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {FOOD_COLUMNS}
            "#
        ))
        .bind(entry.user_id)
        .bind(&entry.name)
        .bind(entry.serving_size_g)
        .bind(entry.calories)
        .bind(entry.protein_g)
        .bind(entry.carbs_g)
        .bind(entry.fat_g)
        .bind(entry.source_id)
        .bind(entry.consumed_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn list_food(&self, user_id: i64) -> Result<Vec<FoodEntry>> {
        let rows = sqlx::query_as::<_, FoodRow>(&format!(
            "SELECT {FOOD_COLUMNS} FROM food_entries WHERE user_id = $1 \
             ORDER BY consumed_at DESC, id DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(FoodEntry::from).collect())
    }

    async fn delete_food(&self, user_id: i64, id: i64) -> Result<Option<FoodEntry>> {
        let row = sqlx::query_as::<_, FoodRow>(&format!(
            "DELETE FROM food_entries WHERE id = $1 AND user_id = $2 RETURNING {FOOD_COLUMNS}"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(FoodEntry::from))
    }

    async fn sum_food_calories(&self, user_id: i64, date: NaiveDate) -> Result<i32> {
        let (start, end) = utc_day_bounds(date);
        let sum: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(calories), 0)::BIGINT
            FROM food_entries
            WHERE user_id = $1 AND consumed_at >= $2 AND consumed_at < $3
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        sum_to_i32(sum)
    }
}

#[async_trait]
impl WorkoutRepository for PgStore {
    async fn insert_workout(&self, workout: &NewWorkout) -> Result<WorkoutEntry> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, WorkoutRow>(&format!(
            r#"
            INSERT INTO workout_history (
                user_id, name, workout_type, duration_minutes, calories_burned,
                performed_at, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {WORKOUT_COLUMNS}
            "#
        ))
        .bind(workout.user_id)
        .bind(&workout.name)
        .bind(&workout.workout_type)
        .bind(workout.duration_minutes)
        .bind(workout.calories_burned)
        .bind(workout.performed_at)
        .bind(&workout.notes)
        .fetch_one(&mut *tx)
        .await?;

        let mut exercises = Vec::with_capacity(workout.exercises.len());
        for (position, exercise) in workout.exercises.iter().enumerate() {
            let inserted = sqlx::query_as::<_, ExerciseRow>(&format!(
                r#"
                INSERT INTO workout_exercises (
                    workout_id, position, name, exercise_type, sets, reps,
                    duration_minutes, weight_kg, calories
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                RETURNING {EXERCISE_COLUMNS}
                "#
            ))
            .bind(row.id)
            .bind(position as i32)
            .bind(&exercise.name)
            .bind(exercise.exercise_type.as_str())
            .bind(exercise.sets)
            .bind(exercise.reps)
            .bind(exercise.duration_minutes)
            .bind(exercise.weight_kg)
            .bind(exercise.calories)
            .fetch_one(&mut *tx)
            .await?;
            exercises.push(ExerciseEntry::try_from(inserted)?);
        }

        tx.commit().await?;
        Ok(row.with_exercises(exercises))
    }

    async fn list_workouts(&self, user_id: i64) -> Result<Vec<WorkoutEntry>> {
        let rows = sqlx::query_as::<_, WorkoutRow>(&format!(
            "SELECT {WORKOUT_COLUMNS} FROM workout_history WHERE user_id = $1 \
             ORDER BY performed_at DESC, id DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let ids: Vec<i64> = rows.iter().map(|w| w.id).collect();
        let exercise_rows = sqlx::query_as::<_, ExerciseRow>(&format!(
            "SELECT {EXERCISE_COLUMNS} FROM workout_exercises WHERE workout_id = ANY($1) \
             ORDER BY workout_id, position"
        ))
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_workout: HashMap<i64, Vec<ExerciseEntry>> = HashMap::new();
        for row in exercise_rows {
            let entry = ExerciseEntry::try_from(row)?;
            by_workout.entry(entry.workout_id).or_default().push(entry);
        }

        Ok(rows
            .into_iter()
            .map(|w| {
                let exercises = by_workout.remove(&w.id).unwrap_or_default();
                w.with_exercises(exercises)
            })
            .collect())
    }

    async fn delete_workout(&self, user_id: i64, id: i64) -> Result<Option<WorkoutEntry>> {
        let mut tx = self.pool.begin().await?;

        // ownership first; the row lock holds until the delete commits
        let row = sqlx::query_as::<_, WorkoutRow>(&format!(
            "SELECT {WORKOUT_COLUMNS} FROM workout_history WHERE id = $1 AND user_id = $2 FOR UPDATE"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        // exercises cascade with the workout, so read them before it goes
        let exercises = fetch_exercises(&mut tx, id).await?;
        sqlx::query("DELETE FROM workout_history WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(row.with_exercises(exercises)))
    }

    async fn delete_exercise(
        &self,
        user_id: i64,
        exercise_id: i64,
    ) -> Result<Option<WorkoutEntry>> {
        let mut tx = self.pool.begin().await?;

        let workout_id: Option<i64> = sqlx::query_scalar(
            r#"
            DELETE FROM workout_exercises e
            USING workout_history w
            WHERE e.id = $1 AND e.workout_id = w.id AND w.user_id = $2
            RETURNING e.workout_id
            "#,
        )
        .bind(exercise_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(workout_id) = workout_id else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, WorkoutRow>(&format!(
            r#"
            UPDATE workout_history
            SET calories_burned = (
                SELECT COALESCE(SUM(calories), 0)::INTEGER
                FROM workout_exercises
                WHERE workout_id = $1
            )
            WHERE id = $1
            RETURNING {WORKOUT_COLUMNS}
            "#
        ))
        .bind(workout_id)
        .fetch_one(&mut *tx)
        .await?;

        let exercises = fetch_exercises(&mut tx, workout_id).await?;
        tx.commit().await?;

        Ok(Some(row.with_exercises(exercises)))
    }

    async fn sum_workout_calories(&self, user_id: i64, date: NaiveDate) -> Result<i32> {
        let (start, end) = utc_day_bounds(date);
        let sum: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(calories_burned), 0)::BIGINT
            FROM workout_history
            WHERE user_id = $1 AND performed_at >= $2 AND performed_at < $3
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        sum_to_i32(sum)
    }
}

#[async_trait]
impl ExerciseCatalogRepository for PgStore {
    async fn list_exercises(&self) -> Result<Vec<ExerciseDefinition>> {
        let rows = sqlx::query_as::<_, CatalogRow>(
            r#"
            SELECT name, category, muscle_group, equipment, calories_per_rep, calories_per_minute
            FROM exercises
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ExerciseDefinition::try_from).collect()
    }

    async fn find_exercise(&self, name: &str) -> Result<Option<ExerciseDefinition>> {
        let row = sqlx::query_as::<_, CatalogRow>(
            r#"
            SELECT name, category, muscle_group, equipment, calories_per_rep, calories_per_minute
            FROM exercises
            WHERE LOWER(name) = LOWER(TRIM($1))
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        row.map(ExerciseDefinition::try_from).transpose()
    }
}

#[async_trait]
impl DailyStatRepository for PgStore {
    async fn upsert_daily_stat(&self, stat: &DailyStat) -> Result<DailyStat> {
        let row = sqlx::query_as::<_, DailyStatRow>(
            r#"
            INSERT INTO daily_stats (
                user_id, date, total_calories_consumed, total_calories_burned, net_calories
            )
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id, date) DO UPDATE SET
                total_calories_consumed = EXCLUDED.total_calories_consumed,
                total_calories_burned = EXCLUDED.total_calories_burned,
                net_calories = EXCLUDED.net_calories,
                updated_at = NOW()
            RETURNING user_id, date, total_calories_consumed, total_calories_burned, net_calories
            "#,
        )
        .bind(stat.user_id)
        .bind(stat.date)
        .bind(stat.total_calories_consumed)
        .bind(stat.total_calories_burned)
        .bind(stat.net_calories)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn list_daily_stats(
        &self,
        user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyStat>> {
        let rows = sqlx::query_as::<_, DailyStatRow>(
            r#"
            SELECT user_id, date, total_calories_consumed, total_calories_burned, net_calories
            FROM daily_stats
            WHERE user_id = $1 AND date BETWEEN $2 AND $3
            ORDER BY date ASC
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(DailyStat::from).collect())
    }
}

#[async_trait]
impl FitnessStore for PgStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<()> {
        db::ping(&self.pool).await
    }
}
