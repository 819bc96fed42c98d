//! Profile service - validate profile submissions and keep the calorie goal
//! in step with them

use crate::error::ApiError;
use crate::repositories::{FitnessStore, ProfileRepository};
use chrono::Utc;
use tracing::info;
use trackit_shared::types::{ProfileInput, UserProfileResponse};
use trackit_shared::validation::{
    check_field, validate_age, validate_height_cm, validate_time_frame_weeks,
    validate_weight_change_rate, validate_weight_kg,
};
use trackit_shared::{
    compute_energy_targets, ActivityLevel, Gender, UserProfile, WeightGoal,
};

/// Profile service for user profile operations
pub struct ProfileService;

impl ProfileService {
    /// Create or fully replace a user's profile
    ///
    /// The daily calorie goal is recomputed from the submitted values every
    /// time; existing daily stats are left as they are.
    pub async fn save_profile(
        store: &dyn FitnessStore,
        user_id: i64,
        input: ProfileInput,
    ) -> Result<UserProfileResponse, ApiError> {
        let profile = Self::build_profile(user_id, input)?;

        let stored = store
            .upsert_profile(&profile)
            .await?;

        metrics::counter!("trackit_profiles_saved_total").increment(1);
        info!(
            user_id,
            goal = %stored.goal,
            daily_calorie_goal = stored.daily_calorie_goal,
            "Profile saved"
        );

        Ok(UserProfileResponse::from_profile(&stored, Utc::now()))
    }

    /// Get a user's profile
    pub async fn get_profile(
        store: &dyn FitnessStore,
        user_id: i64,
    ) -> Result<UserProfileResponse, ApiError> {
        let profile = store
            .find_profile(user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Profile for user {} not found", user_id)))?;

        Ok(UserProfileResponse::from_profile(&profile, Utc::now()))
    }

    /// Validate the submission and derive the calorie goal
    fn build_profile(user_id: i64, input: ProfileInput) -> Result<UserProfile, ApiError> {
        Self::check_required(&input)?;

        // check_required guarantees these are present
        let (Some(age), Some(gender), Some(height_cm), Some(weight_kg), Some(activity), Some(goal)) = (
            input.age,
            input.gender.as_deref(),
            input.height_cm,
            input.weight_kg,
            input.activity_level.as_deref(),
            input.goal.as_deref(),
        ) else {
            return Err(ApiError::validation("Missing required profile fields"));
        };

        let gender: Gender = gender.parse()?;
        let activity_level: ActivityLevel = activity.parse()?;
        let goal: WeightGoal = goal.parse()?;

        check_field("age", age, validate_age)?;
        check_field("height_cm", height_cm, validate_height_cm)?;
        check_field("weight_kg", weight_kg, validate_weight_kg)?;
        if let Some(target) = input.target_weight_kg {
            check_field("target_weight_kg", target, validate_weight_kg)?;
        }
        if let Some(weeks) = input.time_frame_weeks {
            check_field("time_frame_weeks", weeks, validate_time_frame_weeks)?;
        }
        if let Some(rate) = input.weight_change_rate_kg_per_week {
            check_field(
                "weight_change_rate_kg_per_week",
                rate,
                validate_weight_change_rate,
            )?;
        }

        let targets =
            compute_energy_targets(age, gender, weight_kg, height_cm, activity_level, goal);
        let now = Utc::now();

        Ok(UserProfile {
            user_id,
            age,
            gender,
            height_cm,
            weight_kg,
            activity_level,
            goal,
            target_weight_kg: input.target_weight_kg,
            time_frame_weeks: input.time_frame_weeks,
            weight_change_rate_kg_per_week: input.weight_change_rate_kg_per_week,
            daily_calorie_goal: targets.daily_calorie_goal,
            created_at: now,
            updated_at: now,
        })
    }

    /// Report every missing mandatory field in one error
    fn check_required(input: &ProfileInput) -> Result<(), ApiError> {
        let mut missing = Vec::new();
        if input.age.is_none() {
            missing.push("age");
        }
        if input.gender.is_none() {
            missing.push("gender");
        }
        if input.height_cm.is_none() {
            missing.push("height_cm");
        }
        if input.weight_kg.is_none() {
            missing.push("weight_kg");
        }
        if input.activity_level.is_none() {
            missing.push("activity_level");
        }
        match input.goal.as_deref() {
            None => missing.push("goal"),
            Some(goal) => {
                // an unparseable goal is reported by the parse step instead
                let needs_target = goal
                    .parse::<WeightGoal>()
                    .map(|g| g.requires_target())
                    .unwrap_or(false);
                if needs_target {
                    if input.target_weight_kg.is_none() {
                        missing.push("target_weight_kg");
                    }
                    if input.time_frame_weeks.is_none() {
                        missing.push("time_frame_weeks");
                    }
                }
            }
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ApiError::missing_fields(&missing))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MemoryStore;
    use rstest::rstest;

    fn input(goal: &str) -> ProfileInput {
        ProfileInput {
            age: Some(25),
            gender: Some("male".to_string()),
            height_cm: Some(175.0),
            weight_kg: Some(70.0),
            activity_level: Some("sedentary".to_string()),
            goal: Some(goal.to_string()),
            target_weight_kg: Some(65.0),
            time_frame_weeks: Some(10),
            weight_change_rate_kg_per_week: Some(0.5),
        }
    }

    fn validation_message(err: ApiError) -> String {
        match err {
            ApiError::Validation { message, .. } => message,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[rstest]
    #[case("lose", 1607)]
    #[case("maintain", 2009)]
    #[case("gain", 2310)]
    #[tokio::test]
    async fn test_save_derives_goal(#[case] goal: &str, #[case] expected: i32) {
        let store = MemoryStore::new();
        let saved = ProfileService::save_profile(&store, 1, input(goal)).await.unwrap();
        assert_eq!(saved.bmr, 1674);
        assert_eq!(saved.tdee, 2009);
        assert_eq!(saved.daily_calorie_goal, expected);
    }

    #[tokio::test]
    async fn test_rate_adjustment_is_reported_separately() {
        let store = MemoryStore::new();
        let saved = ProfileService::save_profile(&store, 1, input("lose")).await.unwrap();
        assert_eq!(saved.rate_calorie_adjustment, Some(-550));
        assert_eq!(saved.daily_calorie_goal, 1607);
        assert_eq!(saved.timeline.map(|t| t.days_remaining), Some(70));
    }

    #[tokio::test]
    async fn test_female_scenario() {
        let store = MemoryStore::new();
        let req = ProfileInput {
            age: Some(30),
            gender: Some("female".to_string()),
            height_cm: Some(165.0),
            weight_kg: Some(60.0),
            activity_level: Some("moderate".to_string()),
            goal: Some("lose".to_string()),
            target_weight_kg: Some(55.0),
            time_frame_weeks: Some(12),
            weight_change_rate_kg_per_week: None,
        };
        let saved = ProfileService::save_profile(&store, 2, req).await.unwrap();
        assert_eq!(saved.bmr, 1320);
        assert_eq!(saved.tdee, 2046);
        assert_eq!(saved.daily_calorie_goal, 1637);
        assert_eq!(saved.rate_calorie_adjustment, None);
    }

    #[tokio::test]
    async fn test_resave_replaces_goal_and_keeps_created_at() {
        let store = MemoryStore::new();
        let first = ProfileService::save_profile(&store, 1, input("lose")).await.unwrap();

        let mut heavier = input("gain");
        heavier.weight_kg = Some(80.0);
        heavier.target_weight_kg = Some(85.0);
        let second = ProfileService::save_profile(&store, 1, heavier).await.unwrap();

        assert_eq!(second.created_at, first.created_at);
        assert!(second.updated_at >= first.updated_at);
        assert_eq!(second.goal, WeightGoal::Gain);
        // bmr 1774, tdee round(1774 * 1.2) = 2129, gain round(2129 * 1.15) = 2448
        assert_eq!(second.daily_calorie_goal, 2448);

        let fetched = ProfileService::get_profile(&store, 1).await.unwrap();
        assert_eq!(fetched.daily_calorie_goal, 2448);
    }

    #[tokio::test]
    async fn test_missing_fields_reported_together() {
        let store = MemoryStore::new();
        let req = ProfileInput {
            age: Some(40),
            goal: Some("lose".to_string()),
            ..ProfileInput::default()
        };
        let message = validation_message(
            ProfileService::save_profile(&store, 1, req).await.unwrap_err(),
        );
        for field in [
            "gender",
            "height_cm",
            "weight_kg",
            "activity_level",
            "target_weight_kg",
            "time_frame_weeks",
        ] {
            assert!(message.contains(field), "{} not named in '{}'", field, message);
        }
        assert!(ProfileService::get_profile(&store, 1).await.is_err());
    }

    #[tokio::test]
    async fn test_maintain_needs_no_target() {
        let store = MemoryStore::new();
        let mut req = input("maintain");
        req.target_weight_kg = None;
        req.time_frame_weeks = None;
        let saved = ProfileService::save_profile(&store, 1, req).await.unwrap();
        assert!(saved.timeline.is_none());
    }

    #[rstest]
    #[case::unknown_activity(|p: &mut ProfileInput| p.activity_level = Some("couch".to_string()), "activity_level")]
    #[case::unknown_gender(|p: &mut ProfileInput| p.gender = Some("other".to_string()), "gender")]
    #[case::too_short(|p: &mut ProfileInput| p.height_cm = Some(30.0), "height_cm")]
    #[case::too_old(|p: &mut ProfileInput| p.age = Some(130), "age")]
    #[case::target_too_light(|p: &mut ProfileInput| p.target_weight_kg = Some(10.0), "target_weight_kg")]
    #[tokio::test]
    async fn test_invalid_values_rejected(
        #[case] mutate: fn(&mut ProfileInput),
        #[case] field: &str,
    ) {
        let store = MemoryStore::new();
        let mut req = input("lose");
        mutate(&mut req);
        match ProfileService::save_profile(&store, 1, req).await.unwrap_err() {
            ApiError::Validation { field: Some(f), .. } => assert_eq!(f, field),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_missing_profile_is_not_found() {
        let store = MemoryStore::new();
        let err = ProfileService::get_profile(&store, 99).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
