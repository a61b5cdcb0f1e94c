//! Unified error hierarchy for trainstats
//!
//! Validation errors cover anything wrong with the raw sensor input,
//! calculation errors cover arithmetic that cannot be carried out.

use thiserror::Error;

/// Top-level error type for all trainstats operations
#[derive(Debug, Error)]
pub enum TrainStatsError {
    /// Input validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Calculation errors
    #[error("Calculation error: {0}")]
    Calculation(#[from] CalculationError),

    /// Batch import errors
    #[error("Import error at line {line}: {reason}")]
    Import { line: u64, reason: String },
}

/// Raw input validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Package code is not one of RUN, WLK, SWM
    #[error("Unknown workout code: {code}")]
    UnknownWorkoutCode { code: String },

    /// Wrong number of values for the workout type
    #[error("{training} expects {expected} values, got {actual}")]
    ArgumentCount {
        training: String,
        expected: usize,
        actual: usize,
    },

    /// Value could not be parsed as a number
    #[error("Invalid number for {field}: '{value}'")]
    InvalidNumber { field: String, value: String },

    /// Field was given but holds no value
    #[error("{field} is empty")]
    EmptyValue { field: String },

    /// Field must be a whole number
    #[error("{field} must be a whole number, got {value}")]
    NotAnInteger { field: String, value: String },

    /// Field must be strictly positive
    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: String, value: String },

    /// Field must not be negative
    #[error("{field} must not be negative, got {value}")]
    Negative { field: String, value: String },

    /// Empty package line
    #[error("Empty workout package")]
    EmptyPackage,
}

/// Calculation errors
#[derive(Debug, Error, PartialEq)]
pub enum CalculationError {
    /// Division by zero
    #[error("Division by zero in {calculation}")]
    DivisionByZero { calculation: String },

    /// Result left the finite floating-point range
    #[error("Numerical overflow in {calculation}")]
    Overflow { calculation: String },
}

/// Result type alias for trainstats operations
pub type Result<T> = std::result::Result<T, TrainStatsError>;

impl TrainStatsError {
    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            TrainStatsError::Validation(ValidationError::UnknownWorkoutCode { code }) => {
                format!(
                    "Unknown workout code '{}'. Use one of RUN, WLK or SWM.",
                    code
                )
            }
            TrainStatsError::Validation(err) => format!("Invalid workout data: {}", err),
            TrainStatsError::Calculation(CalculationError::Overflow { calculation }) => {
                format!(
                    "The values are too large to calculate {}. Please check the input.",
                    calculation
                )
            }
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let err = TrainStatsError::from(ValidationError::UnknownWorkoutCode {
            code: "BIK".to_string(),
        });
        assert!(err.user_message().contains("RUN, WLK or SWM"));

        let err = TrainStatsError::from(CalculationError::Overflow {
            calculation: "running calories".to_string(),
        });
        assert!(err.user_message().starts_with("The values are too large to calculate running calories"));

        let err = TrainStatsError::from(ValidationError::NotPositive {
            field: "duration".to_string(),
            value: "0".to_string(),
        });
        assert_eq!(
            err.user_message(),
            "Invalid workout data: duration must be greater than zero, got 0"
        );
    }

    #[test]
    fn test_import_error_display() {
        let err = TrainStatsError::Import {
            line: 3,
            reason: "missing code".to_string(),
        };
        assert_eq!(err.to_string(), "Import error at line 3: missing code");
        assert_eq!(err.user_message(), "Import error at line 3: missing code");
    }
}
