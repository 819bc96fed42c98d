//! API request and response types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::catalog::{ExerciseCategory, ExerciseDefinition};
use crate::metabolic::{ActivityLevel, Gender, WeightGoal};
use crate::models::{DailyStat, UserProfile};
use crate::stats::{classify_day, DayStatus};
use crate::timeline::GoalTimeline;

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// `?user_id=` query parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserQuery {
    pub user_id: i64,
}

/// Acknowledgement for delete endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub id: i64,
    pub deleted: bool,
}

// ============================================================================
// Profile Types
// ============================================================================

/// Profile form fields as submitted
///
/// Everything is optional on the wire so that missing fields can be reported
/// together instead of failing on the first one. Enum fields stay strings
/// until the profile service parses them.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProfileInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    /// male or female
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    /// sedentary, light, moderate, active, very_active
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<String>,
    /// lose, maintain, gain
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_frame_weeks: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_change_rate_kg_per_week: Option<f64>,
}

/// Save (create or replace) profile request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveProfileRequest {
    pub user_id: i64,
    pub profile: ProfileInput,
}

/// User profile response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfileResponse {
    pub user_id: i64,
    pub age: i32,
    pub gender: Gender,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub activity_level: ActivityLevel,
    pub goal: WeightGoal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_frame_weeks: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_change_rate_kg_per_week: Option<f64>,
    pub daily_calorie_goal: i32,
    /// Basal Metabolic Rate
    pub bmr: i32,
    /// Total Daily Energy Expenditure
    pub tdee: i32,
    /// Daily delta implied by the weekly rate (7700 kcal per kg)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_calorie_adjustment: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<GoalTimeline>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfileResponse {
    pub fn from_profile(profile: &UserProfile, now: DateTime<Utc>) -> Self {
        let targets = profile.energy_targets();
        Self {
            user_id: profile.user_id,
            age: profile.age,
            gender: profile.gender,
            height_cm: profile.height_cm,
            weight_kg: profile.weight_kg,
            activity_level: profile.activity_level,
            goal: profile.goal,
            target_weight_kg: profile.target_weight_kg,
            time_frame_weeks: profile.time_frame_weeks,
            weight_change_rate_kg_per_week: profile.weight_change_rate_kg_per_week,
            daily_calorie_goal: profile.daily_calorie_goal,
            bmr: targets.bmr,
            tdee: targets.tdee,
            rate_calorie_adjustment: profile.rate_calorie_adjustment(),
            timeline: profile.timeline(now),
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

// ============================================================================
// Food Types
// ============================================================================

/// Log food request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFoodRequest {
    pub user_id: i64,
    #[validate(length(min = 1, max = 255, message = "must be 1-255 characters"))]
    pub name: String,
    #[validate(range(exclusive_min = 0.0, message = "must be greater than 0"))]
    pub serving_size_g: f64,
    /// Calories for the serving, already scaled
    #[validate(range(min = 0, max = 50000, message = "must be between 0 and 50000"))]
    pub calories: i32,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "cannot be negative"))]
    pub protein_g: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "cannot be negative"))]
    pub carbs_g: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "cannot be negative"))]
    pub fat_g: f64,
    /// Nutrition database id the values came from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<i64>,
    /// When the food was consumed (defaults to now)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumed_at: Option<DateTime<Utc>>,
}

// ============================================================================
// Workout Types
// ============================================================================

/// One exercise in a workout submission
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WorkoutExerciseInput {
    /// Catalog name, matched case-insensitively
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sets: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reps: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
}

/// Log workout request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWorkoutRequest {
    pub user_id: i64,
    pub name: String,
    pub workout_type: String,
    pub duration_minutes: i32,
    /// Only used when no exercises are given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories_burned: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub exercises: Vec<WorkoutExerciseInput>,
}

// ============================================================================
// Catalog and Stats Types
// ============================================================================

/// Catalog entry as shown to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogExerciseResponse {
    pub name: String,
    pub category: ExerciseCategory,
    pub muscle_group: String,
    pub equipment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories_per_rep: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories_per_minute: Option<f64>,
}

impl From<ExerciseDefinition> for CatalogExerciseResponse {
    fn from(def: ExerciseDefinition) -> Self {
        Self {
            calories_per_rep: def.rate.per_rep(),
            calories_per_minute: def.rate.per_minute(),
            name: def.name,
            category: def.category,
            muscle_group: def.muscle_group,
            equipment: def.equipment,
        }
    }
}

/// Stats range query; both dates default to today (UTC)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsQuery {
    pub user_id: i64,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// One day of stats, classified when the user has a profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyStatResponse {
    pub date: NaiveDate,
    pub total_calories_consumed: i32,
    pub total_calories_burned: i32,
    pub net_calories: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calorie_goal: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DayStatus>,
}

impl DailyStatResponse {
    /// Attach goal and status against the current goal, if any
    pub fn classify(stat: &DailyStat, calorie_goal: Option<i32>) -> Self {
        Self {
            date: stat.date,
            total_calories_consumed: stat.total_calories_consumed,
            total_calories_burned: stat.total_calories_burned,
            net_calories: stat.net_calories,
            calorie_goal,
            status: calorie_goal.map(|goal| classify_day(stat.net_calories, goal)),
        }
    }
}

// ============================================================================
// Nutrition Lookup Types
// ============================================================================

/// Nutrition search query parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodSearchQuery {
    pub query: String,
    #[serde(default)]
    pub limit: Option<u32>,
}

/// Search hit from the nutrition database
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodSearchResult {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// `?grams=` for serving lookups (defaults to 100 g)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServingQuery {
    #[serde(default)]
    pub grams: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn food_request() -> CreateFoodRequest {
        CreateFoodRequest {
            user_id: 1,
            name: "Greek yogurt".to_string(),
            serving_size_g: 170.0,
            calories: 100,
            protein_g: 17.0,
            carbs_g: 6.0,
            fat_g: 0.7,
            source_id: None,
            consumed_at: None,
        }
    }

    #[test]
    fn test_food_request_validation() {
        assert!(food_request().validate().is_ok());

        let mut bad = food_request();
        bad.serving_size_g = 0.0;
        bad.calories = -5;
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("serving_size_g"));
        assert!(fields.contains_key("calories"));

        let mut empty = food_request();
        empty.name = String::new();
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_stat_classification() {
        let stat = DailyStat {
            user_id: 1,
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            total_calories_consumed: 2500,
            total_calories_burned: 299,
            net_calories: 2201,
        };
        let classified = DailyStatResponse::classify(&stat, Some(2000));
        assert_eq!(classified.status, Some(DayStatus::Over));

        let bare = DailyStatResponse::classify(&stat, None);
        assert_eq!(bare.status, None);
        let json = serde_json::to_value(&bare).unwrap();
        assert!(json.get("status").is_none());
        assert!(json.get("calorie_goal").is_none());
    }

    #[test]
    fn test_catalog_response_columns() {
        let def = crate::catalog::seed_catalog()
            .into_iter()
            .find(|d| d.name == "Running")
            .unwrap();
        let resp = CatalogExerciseResponse::from(def);
        assert_eq!(resp.calories_per_minute, Some(10.0));
        assert_eq!(resp.calories_per_rep, None);
    }

    #[test]
    fn test_profile_input_accepts_partial_json() {
        let req: SaveProfileRequest =
            serde_json::from_str(r#"{"user_id": 7, "profile": {"age": 30}}"#).unwrap();
        assert_eq!(req.user_id, 7);
        assert_eq!(req.profile.age, Some(30));
        assert!(req.profile.goal.is_none());
    }
}
