//! In-memory store
//!
//! Same contract as the Postgres store, held behind a single lock. Used by the
//! test suite and by `storage.backend = "memory"`.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;
use trackit_shared::catalog::{catalog_key, seed_catalog};
use trackit_shared::{
    DailyStat, ExerciseDefinition, ExerciseEntry, FoodEntry, NewFoodEntry, NewWorkout,
    UserProfile, WorkoutEntry,
};

use super::{
    DailyStatRepository, ExerciseCatalogRepository, FitnessStore, FoodRepository,
    ProfileRepository, WorkoutRepository,
};

#[derive(Default)]
struct Tables {
    next_id: i64,
    profiles: HashMap<i64, UserProfile>,
    food: BTreeMap<i64, FoodEntry>,
    workouts: BTreeMap<i64, WorkoutEntry>,
    exercises: BTreeMap<String, ExerciseDefinition>,
    daily_stats: BTreeMap<(i64, NaiveDate), DailyStat>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Process-local store, cheap to clone
#[derive(Clone)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    /// Empty store with the built-in exercise catalog loaded
    pub fn new() -> Self {
        let exercises = seed_catalog()
            .into_iter()
            .map(|def| (catalog_key(&def.name), def))
            .collect();
        Self {
            tables: Arc::new(RwLock::new(Tables {
                exercises,
                ..Tables::default()
            })),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn newest_first<T, K: Ord>(mut items: Vec<T>, key: impl Fn(&T) -> K) -> Vec<T> {
    items.sort_by(|a, b| key(b).cmp(&key(a)));
    items
}

#[async_trait]
impl ProfileRepository for MemoryStore {
    async fn upsert_profile(&self, profile: &UserProfile) -> Result<UserProfile> {
        let mut tables = self.tables.write().await;
        let mut stored = profile.clone();
        if let Some(existing) = tables.profiles.get(&profile.user_id) {
            stored.created_at = existing.created_at;
        }
        tables.profiles.insert(profile.user_id, stored.clone());
        Ok(stored)
    }

    async fn find_profile(&self, user_id: i64) -> Result<Option<UserProfile>> {
        Ok(self.tables.read().await.profiles.get(&user_id).cloned())
    }
}

#[async_trait]
impl FoodRepository for MemoryStore {
    async fn insert_food(&self, entry: &NewFoodEntry) -> Result<FoodEntry> {
        let mut tables = self.tables.write().await;
        let id = tables.next_id();
        let stored = FoodEntry {
            id,
            user_id: entry.user_id,
            name: entry.name.clone(),
            serving_size_g: entry.serving_size_g,
            calories: entry.calories,
            protein_g: entry.protein_g,
            carbs_g: entry.carbs_g,
            fat_g: entry.fat_g,
            source_id: entry.source_id,
            consumed_at: entry.consumed_at,
        };
        tables.food.insert(id, stored.clone());
        Ok(stored)
    }

    async fn list_food(&self, user_id: i64) -> Result<Vec<FoodEntry>> {
        let tables = self.tables.read().await;
        let entries = tables
            .food
            .values()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        Ok(newest_first(entries, |e| (e.consumed_at, e.id)))
    }

    async fn delete_food(&self, user_id: i64, id: i64) -> Result<Option<FoodEntry>> {
        let mut tables = self.tables.write().await;
        match tables.food.get(&id) {
            Some(entry) if entry.user_id == user_id => Ok(tables.food.remove(&id)),
            _ => Ok(None),
        }
    }

    async fn sum_food_calories(&self, user_id: i64, date: NaiveDate) -> Result<i32> {
        let tables = self.tables.read().await;
        let total: i64 = tables
            .food
            .values()
            .filter(|e| e.user_id == user_id && e.date() == date)
            .map(|e| i64::from(e.calories))
            .sum();
        i32::try_from(total).context("daily calorie sum out of range")
    }
}

#[async_trait]
impl WorkoutRepository for MemoryStore {
    async fn insert_workout(&self, workout: &NewWorkout) -> Result<WorkoutEntry> {
        let mut tables = self.tables.write().await;
        let id = tables.next_id();

        let mut exercises = Vec::with_capacity(workout.exercises.len());
        for exercise in &workout.exercises {
            exercises.push(ExerciseEntry {
                id: tables.next_id(),
                workout_id: id,
                name: exercise.name.clone(),
                exercise_type: exercise.exercise_type,
                sets: exercise.sets,
                reps: exercise.reps,
                duration_minutes: exercise.duration_minutes,
                weight_kg: exercise.weight_kg,
                calories: exercise.calories,
            });
        }

        let stored = WorkoutEntry {
            id,
            user_id: workout.user_id,
            name: workout.name.clone(),
            workout_type: workout.workout_type.clone(),
            duration_minutes: workout.duration_minutes,
            calories_burned: workout.calories_burned,
            performed_at: workout.performed_at,
            notes: workout.notes.clone(),
            exercises,
        };
        tables.workouts.insert(id, stored.clone());
        Ok(stored)
    }

    async fn list_workouts(&self, user_id: i64) -> Result<Vec<WorkoutEntry>> {
        let tables = self.tables.read().await;
        let workouts = tables
            .workouts
            .values()
            .filter(|w| w.user_id == user_id)
            .cloned()
            .collect();
        Ok(newest_first(workouts, |w| (w.performed_at, w.id)))
    }

    async fn delete_workout(&self, user_id: i64, id: i64) -> Result<Option<WorkoutEntry>> {
        let mut tables = self.tables.write().await;
        match tables.workouts.get(&id) {
            Some(workout) if workout.user_id == user_id => Ok(tables.workouts.remove(&id)),
            _ => Ok(None),
        }
    }

    async fn delete_exercise(
        &self,
        user_id: i64,
        exercise_id: i64,
    ) -> Result<Option<WorkoutEntry>> {
        let mut tables = self.tables.write().await;
        let Some(workout) = tables
            .workouts
            .values_mut()
            .find(|w| w.user_id == user_id && w.exercises.iter().any(|e| e.id == exercise_id))
        else {
            return Ok(None);
        };

        workout.exercises.retain(|e| e.id != exercise_id);
        workout.calories_burned = workout.exercises.iter().map(|e| e.calories).sum();
        Ok(Some(workout.clone()))
    }

    async fn sum_workout_calories(&self, user_id: i64, date: NaiveDate) -> Result<i32> {
        let tables = self.tables.read().await;
        let total: i64 = tables
            .workouts
            .values()
            .filter(|w| w.user_id == user_id && w.date() == date)
            .map(|w| i64::from(w.calories_burned))
            .sum();
        i32::try_from(total).context("daily calorie sum out of range")
    }
}

#[async_trait]
impl ExerciseCatalogRepository for MemoryStore {
    async fn list_exercises(&self) -> Result<Vec<ExerciseDefinition>> {
        let tables = self.tables.read().await;
        let mut exercises: Vec<ExerciseDefinition> = tables.exercises.values().cloned().collect();
        exercises.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(exercises)
    }

    async fn find_exercise(&self, name: &str) -> Result<Option<ExerciseDefinition>> {
        let tables = self.tables.read().await;
        Ok(tables.exercises.get(&catalog_key(name)).cloned())
    }
}

#[async_trait]
impl DailyStatRepository for MemoryStore {
    async fn upsert_daily_stat(&self, stat: &DailyStat) -> Result<DailyStat> {
        let mut tables = self.tables.write().await;
        tables.daily_stats.insert((stat.user_id, stat.date), *stat);
        tables
            .daily_stats
            .get(&(stat.user_id, stat.date))
            .copied()
            .context("daily stat missing after upsert")
    }

    async fn list_daily_stats(
        &self,
        user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyStat>> {
        let tables = self.tables.read().await;
        // keyed by (user, date) so the range comes back in date order
        Ok(tables
            .daily_stats
            .range((user_id, start)..=(user_id, end))
            .map(|(_, stat)| *stat)
            .collect())
    }
}

#[async_trait]
impl FitnessStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
