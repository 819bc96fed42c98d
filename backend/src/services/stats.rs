//! Daily stats service - recompute and read the per-day calorie rollup

use crate::error::ApiError;
use crate::repositories::{
    DailyStatRepository, FitnessStore, FoodRepository, ProfileRepository, WorkoutRepository,
};
use chrono::NaiveDate;
use tracing::debug;
use trackit_shared::types::DailyStatResponse;
use trackit_shared::{DailyStat, DailyTotals};

/// Daily stats aggregation
pub struct StatsService;

impl StatsService {
    /// Rebuild the (user, date) row from the food and workout logs
    ///
    /// Always a full replace from current sums, so calling it twice in a row
    /// leaves the same row behind.
    pub async fn recompute_daily_stat(
        store: &dyn FitnessStore,
        user_id: i64,
        date: NaiveDate,
    ) -> Result<DailyStat, ApiError> {
        let consumed = store
            .sum_food_calories(user_id, date)
            .await?;
        let burned = store
            .sum_workout_calories(user_id, date)
            .await?;

        let stat = DailyStat::from_totals(user_id, date, DailyTotals::new(consumed, burned));
        let stored = store
            .upsert_daily_stat(&stat)
            .await?;

        metrics::counter!("trackit_daily_stat_recomputes_total").increment(1);
        debug!(
            user_id,
            date = %date,
            consumed = stored.total_calories_consumed,
            burned = stored.total_calories_burned,
            net = stored.net_calories,
            "Daily stat recomputed"
        );

        Ok(stored)
    }

    /// Stored stats for an inclusive date range, classified against the
    /// user's current calorie goal when a profile exists
    pub async fn get_daily_stats(
        store: &dyn FitnessStore,
        user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyStatResponse>, ApiError> {
        if start > end {
            return Err(ApiError::invalid_field(
                "start_date",
                format!("start_date {} is after end_date {}", start, end),
            ));
        }

        let stats = store
            .list_daily_stats(user_id, start, end)
            .await?;

        let calorie_goal = store
            .find_profile(user_id)
            .await?
            .map(|p| p.daily_calorie_goal);

        Ok(stats
            .iter()
            .map(|stat| DailyStatResponse::classify(stat, calorie_goal))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{ExerciseCatalogRepository, MemoryStore};
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use trackit_shared::{
        ActivityLevel, DayStatus, ExerciseDefinition, FoodEntry, Gender, NewFoodEntry,
        NewWorkout, UserProfile, WeightGoal, WorkoutEntry,
    };

    /// Delegates to a `MemoryStore` but rejects every daily stat write
    struct ReadOnlyStats(MemoryStore);

    #[async_trait]
    impl ProfileRepository for ReadOnlyStats {
        async fn upsert_profile(&self, profile: &UserProfile) -> anyhow::Result<UserProfile> {
            self.0.upsert_profile(profile).await
        }

        async fn find_profile(&self, user_id: i64) -> anyhow::Result<Option<UserProfile>> {
            self.0.find_profile(user_id).await
        }
    }

    #[async_trait]
    impl FoodRepository for ReadOnlyStats {
        async fn insert_food(&self, entry: &NewFoodEntry) -> anyhow::Result<FoodEntry> {
            self.0.insert_food(entry).await
        }

        async fn list_food(&self, user_id: i64) -> anyhow::Result<Vec<FoodEntry>> {
            self.0.list_food(user_id).await
        }

        async fn delete_food(&self, user_id: i64, id: i64) -> anyhow::Result<Option<FoodEntry>> {
            self.0.delete_food(user_id, id).await
        }

        async fn sum_food_calories(&self, user_id: i64, date: NaiveDate) -> anyhow::Result<i32> {
            self.0.sum_food_calories(user_id, date).await
        }
    }

    #[async_trait]
    impl WorkoutRepository for ReadOnlyStats {
        async fn insert_workout(&self, workout: &NewWorkout) -> anyhow::Result<WorkoutEntry> {
            self.0.insert_workout(workout).await
        }

        async fn list_workouts(&self, user_id: i64) -> anyhow::Result<Vec<WorkoutEntry>> {
            self.0.list_workouts(user_id).await
        }

        async fn delete_workout(
            &self,
            user_id: i64,
            id: i64,
        ) -> anyhow::Result<Option<WorkoutEntry>> {
            self.0.delete_workout(user_id, id).await
        }

        async fn delete_exercise(
            &self,
            user_id: i64,
            exercise_id: i64,
        ) -> anyhow::Result<Option<WorkoutEntry>> {
            self.0.delete_exercise(user_id, exercise_id).await
        }

        async fn sum_workout_calories(&self, user_id: i64, date: NaiveDate) -> anyhow::Result<i32> {
            self.0.sum_workout_calories(user_id, date).await
        }
    }

    #[async_trait]
    impl ExerciseCatalogRepository for ReadOnlyStats {
        async fn list_exercises(&self) -> anyhow::Result<Vec<ExerciseDefinition>> {
            self.0.list_exercises().await
        }

        async fn find_exercise(&self, name: &str) -> anyhow::Result<Option<ExerciseDefinition>> {
            self.0.find_exercise(name).await
        }
    }

    #[async_trait]
    impl DailyStatRepository for ReadOnlyStats {
        async fn upsert_daily_stat(&self, _stat: &DailyStat) -> anyhow::Result<DailyStat> {
            Err(anyhow::Error::new(sqlx::Error::PoolTimedOut).context("failed to upsert daily stat"))
        }

        async fn list_daily_stats(
            &self,
            user_id: i64,
            start: NaiveDate,
            end: NaiveDate,
        ) -> anyhow::Result<Vec<DailyStat>> {
            self.0.list_daily_stats(user_id, start, end).await
        }
    }

    #[async_trait]
    impl FitnessStore for ReadOnlyStats {
        fn backend_name(&self) -> &'static str {
            "read-only-stats"
        }

        async fn ping(&self) -> anyhow::Result<()> {
            self.0.ping().await
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    async fn log_food(store: &MemoryStore, user_id: i64, d: u32, calories: i32) {
        store
            .insert_food(&NewFoodEntry {
                user_id,
                name: "Pasta".to_string(),
                serving_size_g: 200.0,
                calories,
                protein_g: 10.0,
                carbs_g: 60.0,
                fat_g: 2.0,
                source_id: None,
                consumed_at: Utc.with_ymd_and_hms(2024, 6, d, 13, 0, 0).unwrap(),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_recompute_is_idempotent() {
        let store = MemoryStore::new();
        log_food(&store, 1, 10, 650).await;

        let first = StatsService::recompute_daily_stat(&store, 1, day(10)).await.unwrap();
        let second = StatsService::recompute_daily_stat(&store, 1, day(10)).await.unwrap();
        assert_eq!(first, second);

        let rows = store.list_daily_stats(1, day(10), day(10)).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].net_calories, 650);
    }

    #[tokio::test]
    async fn test_failed_write_keeps_previous_row() {
        let store = MemoryStore::new();
        log_food(&store, 1, 10, 650).await;
        let before = StatsService::recompute_daily_stat(&store, 1, day(10)).await.unwrap();

        // the wrapper shares the memory store's tables
        let failing = ReadOnlyStats(store.clone());
        log_food(&store, 1, 10, 300).await;
        let err = StatsService::recompute_daily_stat(&failing, 1, day(10))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Persistence(_)), "got {:?}", err);

        let rows = store.list_daily_stats(1, day(10), day(10)).await.unwrap();
        assert_eq!(rows, vec![before]);
        assert_eq!(rows[0].total_calories_consumed, 650);
    }

    #[tokio::test]
    async fn test_recompute_empty_day_writes_zero_row() {
        let store = MemoryStore::new();
        let stat = StatsService::recompute_daily_stat(&store, 1, day(2)).await.unwrap();
        assert_eq!(stat.total_calories_consumed, 0);
        assert_eq!(stat.net_calories, 0);
    }

    #[tokio::test]
    async fn test_stats_without_profile_are_unclassified() {
        let store = MemoryStore::new();
        log_food(&store, 1, 10, 2100).await;
        StatsService::recompute_daily_stat(&store, 1, day(10)).await.unwrap();

        let stats = StatsService::get_daily_stats(&store, 1, day(1), day(30)).await.unwrap();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].calorie_goal, None);
        assert_eq!(stats[0].status, None);
    }

    #[tokio::test]
    async fn test_stats_classified_against_current_goal() {
        let store = MemoryStore::new();
        let now = Utc::now();
        store
            .upsert_profile(&UserProfile {
                user_id: 1,
                age: 25,
                gender: Gender::Male,
                height_cm: 175.0,
                weight_kg: 70.0,
                activity_level: ActivityLevel::Sedentary,
                goal: WeightGoal::Maintain,
                target_weight_kg: None,
                time_frame_weeks: None,
                weight_change_rate_kg_per_week: None,
                daily_calorie_goal: 2000,
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();

        log_food(&store, 1, 3, 2201).await;
        log_food(&store, 1, 5, 1799).await;
        for d in [3, 5] {
            StatsService::recompute_daily_stat(&store, 1, day(d)).await.unwrap();
        }

        // sparse: seven days requested, two stored
        let stats = StatsService::get_daily_stats(&store, 1, day(1), day(7)).await.unwrap();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].date, day(3));
        assert_eq!(stats[0].status, Some(DayStatus::Over));
        assert_eq!(stats[1].status, Some(DayStatus::Under));
        assert_eq!(stats[1].calorie_goal, Some(2000));
    }

    #[tokio::test]
    async fn test_inverted_range_rejected() {
        let store = MemoryStore::new();
        let err = StatsService::get_daily_stats(&store, 1, day(9), day(1)).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation { .. }));
    }
}
