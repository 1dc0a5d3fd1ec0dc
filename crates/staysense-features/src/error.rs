//! Feature transform error types

use staysense_core::CoreError;
use thiserror::Error;

/// Feature transform error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeatureError {
    /// Transform called before fit
    #[error("{0} is not fitted; call fit before transform")]
    NotFitted(String),

    /// Required input column absent from the batch
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// Labels missing, misaligned, non-binary or degenerate
    #[error("Invalid labels: {0}")]
    InvalidLabel(String),

    /// Invalid transform parameters or encode columns absent from the schema
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Batch content that cannot be fitted (empty batch, negative rate)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Category not seen during fit
    #[error("Unknown category '{category}' in column '{column}'")]
    UnknownCategory { column: String, category: String },

    /// Error from the tabular data model
    #[error("Data error: {0}")]
    Core(#[from] CoreError),
}

/// Result type for feature transforms
pub type Result<T> = std::result::Result<T, FeatureError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_fitted_display() {
        let error = FeatureError::NotFitted("LogitOddsEncoder".to_string());
        assert_eq!(
            error.to_string(),
            "LogitOddsEncoder is not fitted; call fit before transform"
        );
    }

    #[test]
    fn test_core_error_conversion() {
        let core = CoreError::ColumnNotFound("ADR".to_string());
        let error: FeatureError = core.into();
        assert!(error.to_string().contains("Column not found: ADR"));
    }

    #[test]
    fn test_unknown_category_display() {
        let error = FeatureError::UnknownCategory {
            column: "Meal".to_string(),
            category: "XX".to_string(),
        };
        assert_eq!(error.to_string(), "Unknown category 'XX' in column 'Meal'");
    }
}
