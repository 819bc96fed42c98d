//! TrackIT Shared Library
//!
//! Domain logic shared by the backend service and the WASM calculator:
//! BMR/TDEE and calorie-goal math, daily stat classification, the exercise
//! catalog, validation, and the API request/response types.

pub mod catalog;
pub mod errors;
pub mod metabolic;
pub mod models;
pub mod nutrition;
pub mod stats;
pub mod timeline;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use metabolic::*;
pub use stats::*;
pub use types::*;

pub use catalog::{CalorieRate, ExerciseCategory, ExerciseDefinition, ExerciseVolume};
pub use models::{
    DailyStat, ExerciseEntry, FoodEntry, NewExerciseEntry, NewFoodEntry, NewWorkout, UserProfile,
    WorkoutEntry,
};
pub use timeline::GoalTimeline;
