//! Input validation functions
//!
//! Range checks applied at the service boundary before any value reaches the
//! metabolic calculator. Request DTOs with simple bounds use the `validator`
//! derive instead (see [`crate::types`]).

/// Validate age in whole years
pub fn validate_age(age: i32) -> Result<(), String> {
    if age < 1 {
        return Err("Age must be at least 1 year".to_string());
    }
    if age > 120 {
        return Err("Age must be at most 120 years".to_string());
    }
    Ok(())
}

/// Validate height value (in cm)
/// Valid range: 50-250 cm
pub fn validate_height_cm(height_cm: f64) -> Result<(), String> {
    if height_cm.is_nan() || height_cm.is_infinite() {
        return Err("Height must be a valid number".to_string());
    }
    if height_cm < 50.0 {
        return Err("Height must be at least 50 cm".to_string());
    }
    if height_cm > 250.0 {
        return Err("Height must be at most 250 cm".to_string());
    }
    Ok(())
}

/// Validate weight value (in kg)
pub fn validate_weight_kg(weight_kg: f64) -> Result<(), String> {
    if weight_kg.is_nan() || weight_kg.is_infinite() {
        return Err("Weight must be a valid number".to_string());
    }
    if weight_kg < 20.0 {
        return Err("Weight must be at least 20 kg".to_string());
    }
    if weight_kg > 300.0 {
        return Err("Weight must be at most 300 kg".to_string());
    }
    Ok(())
}

/// Validate goal time frame in weeks (up to ten years)
pub fn validate_time_frame_weeks(weeks: i32) -> Result<(), String> {
    if weeks < 1 {
        return Err("Time frame must be at least 1 week".to_string());
    }
    if weeks > 520 {
        return Err("Time frame must be at most 520 weeks".to_string());
    }
    Ok(())
}

/// Validate weekly weight change rate (in kg/week)
pub fn validate_weight_change_rate(rate: f64) -> Result<(), String> {
    if rate.is_nan() || rate.is_infinite() {
        return Err("Weight change rate must be a valid number".to_string());
    }
    if rate < 0.0 {
        return Err("Weight change rate cannot be negative".to_string());
    }
    if rate > 2.0 {
        return Err("Weight change rate must be at most 2 kg per week".to_string());
    }
    Ok(())
}

/// Validate duration in minutes
pub fn validate_duration_minutes(minutes: i32) -> Result<(), String> {
    if minutes < 0 {
        return Err("Duration cannot be negative".to_string());
    }
    if minutes > 1440 {
        // 24 hours
        return Err("Duration cannot exceed 24 hours".to_string());
    }
    Ok(())
}

/// Validate the set count of one logged exercise
pub fn validate_sets(sets: i32) -> Result<(), String> {
    if sets < 1 {
        return Err("Sets must be at least 1".to_string());
    }
    if sets > 100 {
        return Err("Sets must be at most 100".to_string());
    }
    Ok(())
}

/// Validate repetitions per set
pub fn validate_reps(reps: i32) -> Result<(), String> {
    if reps < 1 {
        return Err("Reps must be at least 1".to_string());
    }
    if reps > 1000 {
        return Err("Reps must be at most 1000".to_string());
    }
    Ok(())
}

/// Validate the timed length of one logged exercise (1 minute to 24 hours)
pub fn validate_exercise_minutes(minutes: i32) -> Result<(), String> {
    if minutes < 1 {
        return Err("Duration must be at least 1 minute".to_string());
    }
    validate_duration_minutes(minutes)
}

/// Validate a whole-kcal calorie value
pub fn validate_calories(calories: i32) -> Result<(), String> {
    if calories < 0 {
        return Err("Calories cannot be negative".to_string());
    }
    if calories > 50000 {
        return Err("Calorie value unreasonably high".to_string());
    }
    Ok(())
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "age" => "Age",
        "gender" => "Gender",
        "height_cm" => "Height",
        "weight_kg" => "Current Weight",
        "activity_level" => "Activity Level",
        "goal" => "Goal",
        "target_weight_kg" => "Target Weight",
        "time_frame_weeks" => "Time Frame",
        "weight_change_rate_kg_per_week" => "Weight Change Rate",
        "serving_size_g" => "Serving Size",
        "duration_minutes" => "Duration",
        "calories_burned" => "Calories Burned",
        "sets" => "Sets",
        "reps" => "Reps",
        _ => field_name,
    }
}

/// Validation error with field context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }
}

/// Run a validator and attach the field name to its error
pub fn check_field<T>(
    field: &str,
    value: T,
    validator: impl FnOnce(T) -> Result<(), String>,
) -> Result<(), ValidationError> {
    validator(value).map_err(|msg| ValidationError::new(field, &msg))
}
