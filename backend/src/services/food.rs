//! Food service - food log writes keep the matching daily stat current

use crate::error::ApiError;
use crate::repositories::{FitnessStore, FoodRepository};
use crate::services::stats::StatsService;
use chrono::Utc;
use tracing::info;
use trackit_shared::types::{CreateFoodRequest, DeletedResponse};
use trackit_shared::{FoodEntry, NewFoodEntry};
use validator::Validate;

/// Food logging operations
pub struct FoodService;

impl FoodService {
    /// Log a food entry and recompute the stat for the day it was eaten
    pub async fn create_food(
        store: &dyn FitnessStore,
        req: CreateFoodRequest,
    ) -> Result<FoodEntry, ApiError> {
        req.validate()?;

        let name = req.name.trim().to_string();
        if name.is_empty() {
            return Err(ApiError::invalid_field("name", "name cannot be blank"));
        }

        let entry = NewFoodEntry {
            user_id: req.user_id,
            name,
            serving_size_g: req.serving_size_g,
            calories: req.calories,
            protein_g: req.protein_g,
            carbs_g: req.carbs_g,
            fat_g: req.fat_g,
            source_id: req.source_id,
            consumed_at: req.consumed_at.unwrap_or_else(Utc::now),
        };

        let stored = store.insert_food(&entry).await?;
        metrics::counter!("trackit_food_entries_created_total").increment(1);
        info!(
            user_id = stored.user_id,
            food_id = stored.id,
            calories = stored.calories,
            "Food entry logged"
        );

        StatsService::recompute_daily_stat(store, stored.user_id, stored.date()).await?;
        Ok(stored)
    }

    /// A user's food log, newest first
    pub async fn list_food(
        store: &dyn FitnessStore,
        user_id: i64,
    ) -> Result<Vec<FoodEntry>, ApiError> {
        store.list_food(user_id).await.map_err(ApiError::from)
    }

    /// Delete a food entry and recompute its day
    pub async fn delete_food(
        store: &dyn FitnessStore,
        user_id: i64,
        id: i64,
    ) -> Result<DeletedResponse, ApiError> {
        let deleted = store
            .delete_food(user_id, id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Food entry {} not found", id)))?;

        info!(user_id, food_id = id, "Food entry deleted");
        StatsService::recompute_daily_stat(store, user_id, deleted.date()).await?;

        Ok(DeletedResponse { id, deleted: true })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{DailyStatRepository, MemoryStore};
    use chrono::{NaiveDate, TimeZone};
    use fake::faker::lorem::en::Word;
    use fake::Fake;

    fn request(user_id: i64, calories: i32, day: u32) -> CreateFoodRequest {
        CreateFoodRequest {
            user_id,
            name: Word().fake(),
            serving_size_g: 100.0,
            calories,
            protein_g: 5.0,
            carbs_g: 20.0,
            fat_g: 3.0,
            source_id: Some(9040),
            consumed_at: Some(Utc.with_ymd_and_hms(2024, 7, day, 8, 30, 0).unwrap()),
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, d).unwrap()
    }

    #[tokio::test]
    async fn test_create_updates_stat_for_entry_date() {
        let store = MemoryStore::new();
        FoodService::create_food(&store, request(1, 300, 4)).await.unwrap();
        FoodService::create_food(&store, request(1, 200, 4)).await.unwrap();

        let stats = store.list_daily_stats(1, day(4), day(4)).await.unwrap();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].total_calories_consumed, 500);
        // nothing written for any other day
        assert!(store.list_daily_stats(1, day(1), day(3)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_recomputes_day() {
        let store = MemoryStore::new();
        let keep = FoodService::create_food(&store, request(1, 300, 4)).await.unwrap();
        let drop = FoodService::create_food(&store, request(1, 450, 4)).await.unwrap();

        let resp = FoodService::delete_food(&store, 1, drop.id).await.unwrap();
        assert!(resp.deleted);

        let stats = store.list_daily_stats(1, day(4), day(4)).await.unwrap();
        assert_eq!(stats[0].total_calories_consumed, keep.calories);

        let again = FoodService::delete_food(&store, 1, drop.id).await;
        assert!(matches!(again, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_invalid_entry_rejected_before_write() {
        let store = MemoryStore::new();
        let mut bad = request(1, 300, 4);
        bad.serving_size_g = 0.0;
        let err = FoodService::create_food(&store, bad).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation { .. }));

        let mut blank = request(1, 300, 4);
        blank.name = "   ".to_string();
        assert!(FoodService::create_food(&store, blank).await.is_err());

        assert!(FoodService::list_food(&store, 1).await.unwrap().is_empty());
    }
}
