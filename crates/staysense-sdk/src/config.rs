//! Configuration types for the preprocessing pipeline

use crate::error::{Result, SdkError};
use serde::{Deserialize, Serialize};
use staysense_features::{HandleUnknown, LogitOddsConfig, QuartileDeviationConfig};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Column groups and transform parameters of the preprocessor
///
/// Every field has a default matching the booking-cancellation model, so
/// a YAML file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Quartile-deviation transform applied before the column split
    #[serde(default)]
    pub quartile: QuartileDeviationConfig,

    /// Columns standardized by the scaler
    #[serde(default = "default_numerical_features")]
    pub numerical_features: Vec<String>,

    /// Low-cardinality columns expanded by one-hot encoding
    #[serde(default = "default_categorical_features")]
    pub categorical_features: Vec<String>,

    /// Policy for one-hot categories unseen during fit
    #[serde(default)]
    pub handle_unknown: HandleUnknown,

    /// High-cardinality columns encoded as logit-odds and prevalence
    #[serde(default)]
    pub logit_odds: LogitOddsConfig,
}

fn to_strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn default_numerical_features() -> Vec<String> {
    to_strings(&[
        "LeadTime",
        "StaysInWeekendNights",
        "StaysInWeekNights",
        "Adults",
        "Children",
        "Babies",
        "RateThirdQuartileDeviation",
        "IsRepeatedGuest",
        "PreviousCancellations",
        "PreviousBookingsNotCanceled",
        "BookingChanges",
        "DaysInWaitingList",
        "TotalOfSpecialRequests",
    ])
}

fn default_categorical_features() -> Vec<String> {
    to_strings(&[
        "DepositType",
        "DistributionChannel",
        "CustomerType",
        "Meal",
        "MarketSegment",
        "Hotel",
    ])
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            quartile: QuartileDeviationConfig::default(),
            numerical_features: default_numerical_features(),
            categorical_features: default_categorical_features(),
            handle_unknown: HandleUnknown::default(),
            logit_odds: LogitOddsConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Parse a YAML document
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading pipeline config from: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Check transform parameters and column group consistency
    pub fn validate(&self) -> Result<()> {
        self.quartile.validate()?;
        if !self.logit_odds.columns.is_empty() {
            self.logit_odds.validate()?;
        }

        let mut seen = HashSet::new();
        for name in self
            .numerical_features
            .iter()
            .chain(&self.categorical_features)
            .chain(&self.logit_odds.columns)
        {
            if !seen.insert(name.as_str()) {
                return Err(SdkError::ConfigError(format!(
                    "column '{}' is assigned to more than one feature group",
                    name
                )));
            }
        }

        // consumed columns are gone before the column split
        let consumed = self.quartile.dropped_columns();
        if let Some(name) = self
            .feature_columns()
            .into_iter()
            .find(|n| consumed.contains(n))
        {
            return Err(SdkError::ConfigError(format!(
                "column '{}' is consumed by the quartile-deviation transform",
                name
            )));
        }
        Ok(())
    }

    /// All columns that reach the column split, in group order
    pub fn feature_columns(&self) -> Vec<&str> {
        self.numerical_features
            .iter()
            .chain(&self.categorical_features)
            .chain(&self.logit_odds.columns)
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.numerical_features.len(), 13);
        assert_eq!(config.categorical_features.len(), 6);
        assert_eq!(config.logit_odds.columns, vec!["Agent", "Company"]);
        assert_eq!(config.logit_odds.min_frequency, 0.02);
        assert_eq!(config.logit_odds.smoothing, 1e-6);
        assert_eq!(config.handle_unknown, HandleUnknown::Error);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
logit_odds:
  columns: [Agent]
  min_frequency: 0.05
handle_unknown: ignore
"#;
        let config = PipelineConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.logit_odds.columns, vec!["Agent"]);
        assert_eq!(config.logit_odds.min_frequency, 0.05);
        assert_eq!(config.logit_odds.smoothing, 1e-6);
        assert_eq!(config.handle_unknown, HandleUnknown::Ignore);
        assert_eq!(config.quartile, QuartileDeviationConfig::default());
        assert_eq!(config.numerical_features.len(), 13);
    }

    #[test]
    fn test_overlapping_groups_rejected() {
        let mut config = PipelineConfig::default();
        config.categorical_features.push("Agent".to_string());
        assert!(matches!(config.validate(), Err(SdkError::ConfigError(_))));
    }

    #[test]
    fn test_consumed_column_rejected() {
        let mut config = PipelineConfig::default();
        config.numerical_features.push("ADR".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("ADR"));
    }

    #[test]
    fn test_invalid_smoothing_rejected() {
        let yaml = r#"
logit_odds:
  columns: [Agent]
  smoothing: 0
"#;
        assert!(matches!(
            PipelineConfig::from_yaml_str(yaml),
            Err(SdkError::Feature(_))
        ));
    }
}
