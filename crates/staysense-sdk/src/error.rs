//! SDK error types

use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Feature transform error
    #[error("Feature error: {0}")]
    Feature(#[from] staysense_features::FeatureError),

    /// Tabular data error
    #[error("Data error: {0}")]
    Core(#[from] staysense_core::CoreError),

    /// Classifier contract violation
    #[error("Classifier error: {0}")]
    ClassifierError(String),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;

#[cfg(test)]
mod tests {
    use super::*;
    use staysense_features::FeatureError;

    #[test]
    fn test_config_error() {
        let error = SdkError::ConfigError("Invalid configuration".to_string());
        assert!(error.to_string().contains("Configuration error"));
        assert!(error.to_string().contains("Invalid configuration"));
    }

    #[test]
    fn test_feature_error_conversion() {
        let error: SdkError = FeatureError::NotFitted("Preprocessor".to_string()).into();
        assert_eq!(
            error.to_string(),
            "Feature error: Preprocessor is not fitted; call fit before transform"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let sdk_error: SdkError = io_error.into();
        assert!(sdk_error.to_string().contains("I/O error"));
        assert!(sdk_error.to_string().contains("File not found"));
    }

    #[test]
    fn test_error_debug_format() {
        let error = SdkError::ClassifierError("bad output".to_string());
        let debug_str = format!("{:?}", error);
        assert!(debug_str.contains("ClassifierError"));
    }
}
