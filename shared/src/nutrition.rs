//! Nutrition values and serving-size scaling
//!
//! Nutrition sources report values per 100 g. A food entry stores values for
//! the serving actually eaten; scaling by grams is the only conversion made.

use serde::{Deserialize, Serialize};

/// Nutrition facts for 100 g of a food
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionPer100g {
    pub source_id: i64,
    pub name: String,
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

/// Nutrition facts for one serving, ready to be logged as a food entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServingNutrition {
    pub source_id: i64,
    pub name: String,
    pub serving_size_g: f64,
    pub calories: i32,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

/// Scale per-100 g values to a serving of `grams`
///
/// Calories are rounded to whole kcal; macros are kept to one decimal.
pub fn scale_to_serving(per_100g: &NutritionPer100g, grams: f64) -> ServingNutrition {
    let factor = grams / 100.0;
    ServingNutrition {
        source_id: per_100g.source_id,
        name: per_100g.name.clone(),
        serving_size_g: grams,
        calories: (per_100g.calories * factor).round() as i32,
        protein_g: round_tenth(per_100g.protein_g * factor),
        carbs_g: round_tenth(per_100g.carbs_g * factor),
        fat_g: round_tenth(per_100g.fat_g * factor),
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
