//! Error types for the TrackIT domain crate

use thiserror::Error;

/// Errors raised when turning untyped input into domain values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown gender '{0}'. Must be one of: male, female")]
    UnknownGender(String),

    #[error("Unknown activity level '{0}'. Must be one of: sedentary, light, moderate, active, very_active")]
    UnknownActivityLevel(String),

    #[error("Unknown goal '{0}'. Must be one of: lose, maintain, gain")]
    UnknownGoal(String),
}

impl DomainError {
    /// Name of the input field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            DomainError::UnknownGender(_) => "gender",
            DomainError::UnknownActivityLevel(_) => "activity_level",
            DomainError::UnknownGoal(_) => "goal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_names_field() {
        let err = DomainError::UnknownActivityLevel("couch".to_string());
        assert_eq!(err.field(), "activity_level");
        assert!(err.to_string().contains("couch"));
    }
}
