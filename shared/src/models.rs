//! Data models for the TrackIT fitness engine
//!
//! These are the persisted records. Request and response shapes live in
//! [`crate::types`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::ExerciseCategory;
use crate::metabolic::{
    compute_calorie_adjustment_for_rate, compute_energy_targets, ActivityLevel, EnergyTargets,
    Gender, WeightGoal,
};
use crate::stats::DailyTotals;
use crate::timeline::{compute_goal_timeline, GoalTimeline};

/// A user's body metrics and weight goal, one row per user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: i64,
    pub age: i32,
    pub gender: Gender,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub activity_level: ActivityLevel,
    pub goal: WeightGoal,
    pub target_weight_kg: Option<f64>,
    pub time_frame_weeks: Option<i32>,
    pub weight_change_rate_kg_per_week: Option<f64>,
    /// Always the calculator output for the fields above
    pub daily_calorie_goal: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// BMR, TDEE and goal recomputed from the stored inputs
    pub fn energy_targets(&self) -> EnergyTargets {
        compute_energy_targets(
            self.age,
            self.gender,
            self.weight_kg,
            self.height_cm,
            self.activity_level,
            self.goal,
        )
    }

    pub fn rate_calorie_adjustment(&self) -> Option<i32> {
        self.weight_change_rate_kg_per_week
            .map(|rate| compute_calorie_adjustment_for_rate(rate, self.goal))
    }

    /// Goal timeline, only for goals that move weight and have a time frame
    pub fn timeline(&self, now: DateTime<Utc>) -> Option<GoalTimeline> {
        if !self.goal.requires_target() {
            return None;
        }
        self.time_frame_weeks
            .map(|weeks| compute_goal_timeline(self.created_at, weeks, now))
    }
}

/// A logged food item with calories already scaled to the serving
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodEntry {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub serving_size_g: f64,
    pub calories: i32,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub source_id: Option<i64>,
    pub consumed_at: DateTime<Utc>,
}

impl FoodEntry {
    /// The UTC calendar day this entry counts towards
    pub fn date(&self) -> NaiveDate {
        self.consumed_at.date_naive()
    }
}

/// Food entry before insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewFoodEntry {
    pub user_id: i64,
    pub name: String,
    pub serving_size_g: f64,
    pub calories: i32,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub source_id: Option<i64>,
    pub consumed_at: DateTime<Utc>,
}

/// One exercise within a workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseEntry {
    pub id: i64,
    pub workout_id: i64,
    pub name: String,
    pub exercise_type: ExerciseCategory,
    pub sets: Option<i32>,
    pub reps: Option<i32>,
    pub duration_minutes: Option<i32>,
    pub weight_kg: Option<f64>,
    pub calories: i32,
}

/// Exercise before insertion; calories are already derived from the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct NewExerciseEntry {
    pub name: String,
    pub exercise_type: ExerciseCategory,
    pub sets: Option<i32>,
    pub reps: Option<i32>,
    pub duration_minutes: Option<i32>,
    pub weight_kg: Option<f64>,
    pub calories: i32,
}

/// A logged workout with its exercises in submission order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutEntry {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub workout_type: String,
    pub duration_minutes: i32,
    pub calories_burned: i32,
    pub performed_at: DateTime<Utc>,
    pub notes: Option<String>,
    pub exercises: Vec<ExerciseEntry>,
}

impl WorkoutEntry {
    pub fn date(&self) -> NaiveDate {
        self.performed_at.date_naive()
    }
}

/// Workout before insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkout {
    pub user_id: i64,
    pub name: String,
    pub workout_type: String,
    pub duration_minutes: i32,
    pub calories_burned: i32,
    pub performed_at: DateTime<Utc>,
    pub notes: Option<String>,
    pub exercises: Vec<NewExerciseEntry>,
}

/// Persisted per-day rollup, one row per (user, date)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyStat {
    pub user_id: i64,
    pub date: NaiveDate,
    pub total_calories_consumed: i32,
    pub total_calories_burned: i32,
    pub net_calories: i32,
}

impl DailyStat {
    pub fn from_totals(user_id: i64, date: NaiveDate, totals: DailyTotals) -> Self {
        Self {
            user_id,
            date,
            total_calories_consumed: totals.total_calories_consumed,
            total_calories_burned: totals.total_calories_burned,
            net_calories: totals.net_calories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn profile(goal: WeightGoal) -> UserProfile {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        UserProfile {
            user_id: 1,
            age: 25,
            gender: Gender::Male,
            height_cm: 175.0,
            weight_kg: 70.0,
            activity_level: ActivityLevel::Sedentary,
            goal,
            target_weight_kg: Some(65.0),
            time_frame_weeks: Some(10),
            weight_change_rate_kg_per_week: Some(0.5),
            daily_calorie_goal: 1607,
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_profile_read_outs() {
        let p = profile(WeightGoal::Lose);
        let targets = p.energy_targets();
        assert_eq!(targets.bmr, 1674);
        assert_eq!(targets.tdee, 2009);
        assert_eq!(targets.daily_calorie_goal, p.daily_calorie_goal);
        assert_eq!(p.rate_calorie_adjustment(), Some(-550));
    }

    #[test]
    fn test_maintain_has_no_timeline() {
        let p = profile(WeightGoal::Maintain);
        assert!(p.timeline(p.created_at).is_none());
        assert_eq!(profile(WeightGoal::Gain).timeline(p.created_at).unwrap().days_remaining, 70);
    }

    #[test]
    fn test_entry_date_is_utc_day() {
        let entry = FoodEntry {
            id: 1,
            user_id: 1,
            name: "Oats".to_string(),
            serving_size_g: 50.0,
            calories: 190,
            protein_g: 6.5,
            carbs_g: 33.0,
            fat_g: 3.5,
            source_id: None,
            consumed_at: Utc.with_ymd_and_hms(2024, 5, 3, 23, 59, 59).unwrap(),
        };
        assert_eq!(entry.date(), NaiveDate::from_ymd_opt(2024, 5, 3).unwrap());
    }
}
