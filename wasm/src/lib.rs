//! TrackIT WASM Module
//!
//! WebAssembly bindings for the calorie arithmetic so the browser can show
//! live previews while a profile form is being filled in. The numbers come
//! from the same functions the backend stores.
//!
//! Enum arguments are passed as strings (`"male"`, `"moderate"`, `"lose"`).
//! Unknown values yield `undefined` on the JS side.

use trackit_shared::{
    classify_day as classify, compute_bmr, compute_calorie_adjustment_for_rate,
    compute_daily_calorie_goal, compute_energy_targets, compute_tdee, ActivityLevel, Gender,
    WeightGoal,
};
use wasm_bindgen::prelude::*;

/// Basal Metabolic Rate (Mifflin-St Jeor), rounded to whole kcal
#[wasm_bindgen]
pub fn bmr(age_years: i32, gender: &str, weight_kg: f64, height_cm: f64) -> Option<i32> {
    let gender: Gender = gender.parse().ok()?;
    Some(compute_bmr(age_years, gender, weight_kg, height_cm))
}

/// Total Daily Energy Expenditure for a BMR and activity level
#[wasm_bindgen]
pub fn tdee(bmr: i32, activity_level: &str) -> Option<i32> {
    let level: ActivityLevel = activity_level.parse().ok()?;
    Some(compute_tdee(bmr, level))
}

/// Daily calorie goal for a TDEE and weight goal
#[wasm_bindgen]
pub fn daily_calorie_goal(tdee: i32, goal: &str) -> Option<i32> {
    let goal: WeightGoal = goal.parse().ok()?;
    Some(compute_daily_calorie_goal(tdee, goal))
}

/// Signed daily calorie delta implied by a weekly weight-change rate
#[wasm_bindgen]
pub fn calorie_adjustment_for_rate(rate_kg_per_week: f64, goal: &str) -> Option<i32> {
    let goal: WeightGoal = goal.parse().ok()?;
    Some(compute_calorie_adjustment_for_rate(rate_kg_per_week, goal))
}

/// The whole chain as JSON: `{"bmr":..,"tdee":..,"daily_calorie_goal":..}`
#[wasm_bindgen]
pub fn energy_targets(
    age_years: i32,
    gender: &str,
    weight_kg: f64,
    height_cm: f64,
    activity_level: &str,
    goal: &str,
) -> Option<String> {
    let targets = compute_energy_targets(
        age_years,
        gender.parse().ok()?,
        weight_kg,
        height_cm,
        activity_level.parse().ok()?,
        goal.parse().ok()?,
    );
    serde_json::to_string(&targets).ok()
}

/// "over", "under" or "on_target"
#[wasm_bindgen]
pub fn classify_day(net_calories: i32, calorie_goal: i32) -> String {
    classify(net_calories, calorie_goal).as_str().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_preview_chain() {
        let bmr = bmr(25, "male", 70.0, 175.0).unwrap();
        assert_eq!(bmr, 1674);
        let tdee = tdee(bmr, "sedentary").unwrap();
        assert_eq!(tdee, 2009);
        assert_eq!(daily_calorie_goal(tdee, "lose"), Some(1607));
        assert_eq!(calorie_adjustment_for_rate(0.5, "lose"), Some(-550));
    }

    #[test]
    fn test_energy_targets_json() {
        let json = energy_targets(30, "female", 60.0, 165.0, "moderate", "lose").unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["bmr"], 1320);
        assert_eq!(parsed["tdee"], 2046);
        assert_eq!(parsed["daily_calorie_goal"], 1637);
        assert!(energy_targets(30, "female", 60.0, 165.0, "moderate", "shred").is_none());
    }

    #[test]
    fn test_unknown_values_give_none() {
        assert_eq!(bmr(25, "robot", 70.0, 175.0), None);
        assert_eq!(tdee(1674, "extreme"), None);
        assert_eq!(daily_calorie_goal(2009, "bulk"), None);
    }

    #[test]
    fn test_classify_day() {
        assert_eq!(classify_day(2000, 2000), "on_target");
        assert_eq!(classify_day(2300, 2000), "over");
        assert_eq!(classify_day(1500, 2000), "under");
    }
}
