//! Builder pattern for Preprocessor

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::preprocessor::Preprocessor;
use staysense_features::{HandleUnknown, QuartileDeviationConfig};
use std::path::PathBuf;
use tracing::debug;

/// Builder for Preprocessor
///
/// Explicit settings are applied on top of the base configuration, which
/// is either the defaults, a given [`PipelineConfig`], or a YAML file
/// read at [`build`](Self::build) time.
///
/// # Example
///
/// ```rust,ignore
/// use staysense_sdk::PreprocessorBuilder;
///
/// let preprocessor = PreprocessorBuilder::new()
///     .with_logit_odds_columns(["Agent"])
///     .with_min_frequency(0.05)
///     .build()?;
///
/// // From a config file, overriding one setting
/// let preprocessor = PreprocessorBuilder::new()
///     .with_config_file("config/pipeline.yaml")
///     .with_handle_unknown(HandleUnknown::Ignore)
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct PreprocessorBuilder {
    config: PipelineConfig,
    config_file: Option<PathBuf>,
    numerical_features: Option<Vec<String>>,
    categorical_features: Option<Vec<String>>,
    logit_odds_columns: Option<Vec<String>>,
    min_frequency: Option<f64>,
    smoothing: Option<f64>,
    quartile: Option<QuartileDeviationConfig>,
    handle_unknown: Option<HandleUnknown>,
}

fn owned<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Vec<String> {
    names.into_iter().map(Into::into).collect()
}

impl PreprocessorBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Base Configuration ==========

    /// Start from an existing configuration
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self.config_file = None;
        self
    }

    /// Start from a YAML configuration file
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    // ========== Column Groups ==========

    /// Columns standardized by the scaler
    pub fn with_numerical_features<S: Into<String>>(
        mut self,
        names: impl IntoIterator<Item = S>,
    ) -> Self {
        self.numerical_features = Some(owned(names));
        self
    }

    /// Columns expanded by one-hot encoding
    pub fn with_categorical_features<S: Into<String>>(
        mut self,
        names: impl IntoIterator<Item = S>,
    ) -> Self {
        self.categorical_features = Some(owned(names));
        self
    }

    /// Columns encoded as logit-odds and prevalence; empty disables the encoder
    pub fn with_logit_odds_columns<S: Into<String>>(
        mut self,
        names: impl IntoIterator<Item = S>,
    ) -> Self {
        self.logit_odds_columns = Some(owned(names));
        self
    }

    // ========== Transform Parameters ==========

    pub fn with_min_frequency(mut self, min_frequency: f64) -> Self {
        self.min_frequency = Some(min_frequency);
        self
    }

    pub fn with_smoothing(mut self, smoothing: f64) -> Self {
        self.smoothing = Some(smoothing);
        self
    }

    pub fn with_quartile_config(mut self, config: QuartileDeviationConfig) -> Self {
        self.quartile = Some(config);
        self
    }

    pub fn with_handle_unknown(mut self, handle_unknown: HandleUnknown) -> Self {
        self.handle_unknown = Some(handle_unknown);
        self
    }

    /// Resolve the final configuration without building
    pub fn into_config(self) -> Result<PipelineConfig> {
        let mut config = match &self.config_file {
            Some(path) => PipelineConfig::from_file(path)?,
            None => self.config,
        };

        if let Some(names) = self.numerical_features {
            config.numerical_features = names;
        }
        if let Some(names) = self.categorical_features {
            config.categorical_features = names;
        }
        if let Some(names) = self.logit_odds_columns {
            config.logit_odds.columns = names;
        }
        if let Some(min_frequency) = self.min_frequency {
            config.logit_odds.min_frequency = min_frequency;
        }
        if let Some(smoothing) = self.smoothing {
            config.logit_odds.smoothing = smoothing;
        }
        if let Some(quartile) = self.quartile {
            config.quartile = quartile;
        }
        if let Some(handle_unknown) = self.handle_unknown {
            config.handle_unknown = handle_unknown;
        }

        config.validate()?;
        Ok(config)
    }

    /// Build an unfitted preprocessor
    pub fn build(self) -> Result<Preprocessor> {
        let config = self.into_config()?;
        debug!(
            features = config.feature_columns().len(),
            "Building preprocessor"
        );
        Preprocessor::new(config)
    }
}
