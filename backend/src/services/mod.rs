//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and external systems.

pub mod food;
pub mod nutrition;
pub mod profile;
pub mod stats;
pub mod workout;

pub use food::FoodService;
pub use nutrition::{NutritionClient, NutritionService};
pub use profile::ProfileService;
pub use stats::StatsService;
pub use workout::WorkoutService;
