//! Metabolic calculator
//!
//! Pure functions deriving a user's daily energy numbers from their
//! anthropometrics and goal:
//! - BMR (Mifflin-St Jeor)
//! - TDEE (BMR scaled by an activity multiplier)
//! - Goal-adjusted daily calorie target
//! - Weekly weight-change rate expressed as a daily calorie delta
//!
//! Every function is total over its typed inputs. Range checks on age,
//! height and weight belong to the caller (see [`crate::validation`]).

use crate::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Energy content of one kilogram of body mass, in kcal
pub const KCAL_PER_KG_BODY_MASS: f64 = 7700.0;

/// Multiplier applied to TDEE when the goal is weight loss (20% deficit)
pub const LOSE_GOAL_FACTOR: f64 = 0.8;

/// Multiplier applied to TDEE when the goal is weight gain (15% surplus)
pub const GAIN_GOAL_FACTOR: f64 = 1.15;

// ============================================================================
// Profile Enums
// ============================================================================

/// Gender, used only to pick the BMR formula branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err(DomainError::UnknownGender(s.to_string())),
        }
    }
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    Moderate,
    /// Hard exercise 6-7 days/week
    Active,
    /// Very hard exercise and a physical job, or training twice a day
    VeryActive,
}

impl ActivityLevel {
    /// Get the activity multiplier for TDEE calculation
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "light" => Ok(ActivityLevel::Light),
            "moderate" => Ok(ActivityLevel::Moderate),
            "active" => Ok(ActivityLevel::Active),
            "very_active" => Ok(ActivityLevel::VeryActive),
            _ => Err(DomainError::UnknownActivityLevel(s.to_string())),
        }
    }
}

/// Body-weight goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightGoal {
    Lose,
    Maintain,
    Gain,
}

impl WeightGoal {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightGoal::Lose => "lose",
            WeightGoal::Maintain => "maintain",
            WeightGoal::Gain => "gain",
        }
    }

    /// Whether the goal needs a target weight and a time frame
    pub fn requires_target(&self) -> bool {
        !matches!(self, WeightGoal::Maintain)
    }
}

impl fmt::Display for WeightGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeightGoal {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lose" => Ok(WeightGoal::Lose),
            "maintain" => Ok(WeightGoal::Maintain),
            "gain" => Ok(WeightGoal::Gain),
            _ => Err(DomainError::UnknownGoal(s.to_string())),
        }
    }
}

// ============================================================================
// Calculations
// ============================================================================

/// Calculate Basal Metabolic Rate using the Mifflin-St Jeor equation
///
/// Men: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) + 5
/// Women: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) - 161
pub fn compute_bmr(age_years: i32, gender: Gender, weight_kg: f64, height_cm: f64) -> i32 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years as f64;
    let bmr = match gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    };
    bmr.round() as i32
}

/// Calculate Total Daily Energy Expenditure
///
/// TDEE = round(BMR × activity multiplier)
pub fn compute_tdee(bmr: i32, activity_level: ActivityLevel) -> i32 {
    (bmr as f64 * activity_level.multiplier()).round() as i32
}

/// Apply the goal modifier to TDEE to get the stored daily calorie goal
pub fn compute_daily_calorie_goal(tdee: i32, goal: WeightGoal) -> i32 {
    match goal {
        WeightGoal::Lose => (tdee as f64 * LOSE_GOAL_FACTOR).round() as i32,
        WeightGoal::Gain => (tdee as f64 * GAIN_GOAL_FACTOR).round() as i32,
        WeightGoal::Maintain => tdee,
    }
}

/// Convert a weekly weight-change rate into a signed daily calorie delta
///
/// delta = round(7700 × rate / 7), negative when losing, positive when
/// gaining, zero when maintaining. This is an estimate shown next to the
/// stored goal; it does not feed into [`compute_daily_calorie_goal`].
pub fn compute_calorie_adjustment_for_rate(rate_kg_per_week: f64, goal: WeightGoal) -> i32 {
    let magnitude = (KCAL_PER_KG_BODY_MASS * rate_kg_per_week.abs() / 7.0).round() as i32;
    match goal {
        WeightGoal::Lose => -magnitude,
        WeightGoal::Gain => magnitude,
        WeightGoal::Maintain => 0,
    }
}

/// BMR, TDEE and goal for one set of inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyTargets {
    pub bmr: i32,
    pub tdee: i32,
    pub daily_calorie_goal: i32,
}

/// Run the full BMR → TDEE → goal chain
pub fn compute_energy_targets(
    age_years: i32,
    gender: Gender,
    weight_kg: f64,
    height_cm: f64,
    activity_level: ActivityLevel,
    goal: WeightGoal,
) -> EnergyTargets {
    let bmr = compute_bmr(age_years, gender, weight_kg, height_cm);
    let tdee = compute_tdee(bmr, activity_level);
    EnergyTargets {
        bmr,
        tdee,
        daily_calorie_goal: compute_daily_calorie_goal(tdee, goal),
    }
}
