//! Exercise catalog
//!
//! Reference data mapping an exercise name to its category and calorie rate,
//! plus the arithmetic that turns a logged exercise into calories burned.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Exercise category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseCategory {
    Strength,
    Cardio,
    Core,
}

impl ExerciseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseCategory::Strength => "strength",
            ExerciseCategory::Cardio => "cardio",
            ExerciseCategory::Core => "core",
        }
    }
}

impl fmt::Display for ExerciseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExerciseCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strength" => Ok(ExerciseCategory::Strength),
            "cardio" => Ok(ExerciseCategory::Cardio),
            "core" => Ok(ExerciseCategory::Core),
            _ => Err(format!("Unknown exercise category: {}", s)),
        }
    }
}

/// How an exercise burns calories
///
/// An exercise has exactly one rate: per repetition (strength work) or per
/// minute (cardio and timed holds).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "kcal", rename_all = "snake_case")]
pub enum CalorieRate {
    PerRep(f64),
    PerMinute(f64),
}

impl CalorieRate {
    /// Rebuild a rate from the two nullable catalog columns
    pub fn from_columns(per_rep: Option<f64>, per_minute: Option<f64>) -> Option<Self> {
        match (per_rep, per_minute) {
            (Some(rep), _) => Some(CalorieRate::PerRep(rep)),
            (None, Some(minute)) => Some(CalorieRate::PerMinute(minute)),
            (None, None) => None,
        }
    }

    pub fn per_rep(&self) -> Option<f64> {
        match self {
            CalorieRate::PerRep(kcal) => Some(*kcal),
            CalorieRate::PerMinute(_) => None,
        }
    }

    pub fn per_minute(&self) -> Option<f64> {
        match self {
            CalorieRate::PerMinute(kcal) => Some(*kcal),
            CalorieRate::PerRep(_) => None,
        }
    }

    /// Calories for one logged exercise, rounded to whole kcal
    ///
    /// Per-rep: rate × sets × reps. Per-minute: rate × duration.
    /// Returns `None` when the volume needed by this rate is missing or
    /// not positive, or when the result does not fit in an `i32`.
    pub fn calories_for(&self, volume: &ExerciseVolume) -> Option<i32> {
        let raw = match self {
            CalorieRate::PerRep(kcal) => {
                let sets = volume.sets.filter(|s| *s > 0)?;
                let reps = volume.reps.filter(|r| *r > 0)?;
                kcal * sets as f64 * reps as f64
            }
            CalorieRate::PerMinute(kcal) => {
                let minutes = volume.duration_minutes.filter(|m| *m > 0)?;
                kcal * minutes as f64
            }
        };
        let rounded = raw.round();
        if !rounded.is_finite() || rounded < 0.0 || rounded > i32::MAX as f64 {
            return None;
        }
        Some(rounded as i32)
    }
}

/// Amount of work logged for one exercise
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseVolume {
    pub sets: Option<i32>,
    pub reps: Option<i32>,
    pub duration_minutes: Option<i32>,
}

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseDefinition {
    pub name: String,
    pub category: ExerciseCategory,
    pub muscle_group: String,
    pub equipment: String,
    pub rate: CalorieRate,
}

// name, category, muscle group, equipment, rate
const SEED: &[(&str, ExerciseCategory, &str, &str, CalorieRate)] = &[
    ("Push-Up", ExerciseCategory::Strength, "Chest", "Bodyweight", CalorieRate::PerRep(0.5)),
    ("Squat", ExerciseCategory::Strength, "Legs", "Bodyweight", CalorieRate::PerRep(0.6)),
    ("Bench Press", ExerciseCategory::Strength, "Chest", "Barbell", CalorieRate::PerRep(0.8)),
    ("Deadlift", ExerciseCategory::Strength, "Back", "Barbell", CalorieRate::PerRep(1.0)),
    ("Bicep Curl", ExerciseCategory::Strength, "Arms", "Dumbbell", CalorieRate::PerRep(0.3)),
    ("Running", ExerciseCategory::Cardio, "Full Body", "None", CalorieRate::PerMinute(10.0)),
    ("Cycling", ExerciseCategory::Cardio, "Legs", "Bicycle", CalorieRate::PerMinute(8.0)),
    ("Jump Rope", ExerciseCategory::Cardio, "Full Body", "Jump Rope", CalorieRate::PerMinute(12.0)),
    ("Plank", ExerciseCategory::Core, "Abs", "Bodyweight", CalorieRate::PerMinute(4.0)),
    ("Pull-Up", ExerciseCategory::Strength, "Back", "Pull-Up Bar", CalorieRate::PerRep(0.7)),
    ("Lunges", ExerciseCategory::Strength, "Legs", "Bodyweight", CalorieRate::PerRep(0.4)),
    ("Burpees", ExerciseCategory::Cardio, "Full Body", "Bodyweight", CalorieRate::PerMinute(14.0)),
    ("Mountain Climbers", ExerciseCategory::Cardio, "Core", "Bodyweight", CalorieRate::PerMinute(10.0)),
    ("Tricep Dips", ExerciseCategory::Strength, "Arms", "Bench/Chair", CalorieRate::PerRep(0.4)),
    ("Shoulder Press", ExerciseCategory::Strength, "Shoulders", "Dumbbell", CalorieRate::PerRep(0.5)),
];

/// Normalized lookup key for an exercise name
pub fn catalog_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// The built-in catalog, in seed order
pub fn seed_catalog() -> Vec<ExerciseDefinition> {
    SEED.iter()
        .map(|(name, category, muscle_group, equipment, rate)| ExerciseDefinition {
            name: (*name).to_string(),
            category: *category,
            muscle_group: (*muscle_group).to_string(),
            equipment: (*equipment).to_string(),
            rate: *rate,
        })
        .collect()
}
