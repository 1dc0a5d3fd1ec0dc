//! Booking preprocessor
//!
//! Chains the quartile-deviation transform with the three column-group
//! transforms and concatenates their outputs in a fixed order: numeric,
//! one-hot, then logit-odds.

use crate::config::PipelineConfig;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use staysense_core::{FeatureMatrix, Frame};
use staysense_features::{
    FeatureError, LogitOddsEncoder, OneHotEncoder, QuartileDeviationTransform,
    Result as FeatureResult, StandardScaler, Transformer,
};
use tracing::{debug, info};

/// Fitted pipeline turning raw booking batches into classifier features
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preprocessor {
    config: PipelineConfig,
    quartile: QuartileDeviationTransform,
    scaler: StandardScaler,
    one_hot: OneHotEncoder,
    /// Absent when no logit-odds columns are configured
    logit_odds: Option<LogitOddsEncoder>,
    fitted: bool,
}

impl Preprocessor {
    /// Create an unfitted preprocessor
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let parts = Parts::from_config(&config)?;
        Ok(Self {
            quartile: parts.quartile,
            scaler: parts.scaler,
            one_hot: parts.one_hot,
            logit_odds: parts.logit_odds,
            config,
            fitted: false,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn quartile(&self) -> &QuartileDeviationTransform {
        &self.quartile
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn one_hot(&self) -> &OneHotEncoder {
        &self.one_hot
    }

    pub fn logit_odds(&self) -> Option<&LogitOddsEncoder> {
        self.logit_odds.as_ref()
    }

    /// Output column order of `transform`
    pub fn feature_names(&self) -> Result<Vec<String>> {
        Ok(self.feature_names_out(&[])?)
    }

    /// Transform a batch into a dense matrix for a classifier
    pub fn transform_matrix(&self, frame: &Frame) -> Result<FeatureMatrix> {
        let features = self.transform(frame)?;
        Ok(FeatureMatrix::from_frame(&features)?)
    }
}

/// The four transforms, built together so `fit` can swap them in at once
struct Parts {
    quartile: QuartileDeviationTransform,
    scaler: StandardScaler,
    one_hot: OneHotEncoder,
    logit_odds: Option<LogitOddsEncoder>,
}

impl Parts {
    fn from_config(config: &PipelineConfig) -> FeatureResult<Self> {
        let logit_odds = if config.logit_odds.columns.is_empty() {
            None
        } else {
            Some(LogitOddsEncoder::new(config.logit_odds.clone())?)
        };

        Ok(Self {
            quartile: QuartileDeviationTransform::new(config.quartile.clone())?,
            scaler: StandardScaler::new(config.numerical_features.iter().cloned()),
            one_hot: OneHotEncoder::new(config.categorical_features.iter().cloned())
                .with_handle_unknown(config.handle_unknown),
            logit_odds,
        })
    }
}

impl Transformer for Preprocessor {
    fn fit(&mut self, frame: &Frame, labels: Option<&[f64]>) -> FeatureResult<()> {
        info!(
            rows = frame.n_rows(),
            columns = frame.n_columns(),
            "Fitting preprocessor"
        );

        // a failed fit leaves the previous state untouched
        let mut parts = Parts::from_config(&self.config)?;
        let enriched = parts.quartile.fit_transform(frame, None)?;
        parts.scaler.fit(&enriched, None)?;
        parts.one_hot.fit(&enriched, None)?;
        if let Some(encoder) = parts.logit_odds.as_mut() {
            encoder.fit(&enriched, labels)?;
        }

        self.quartile = parts.quartile;
        self.scaler = parts.scaler;
        self.one_hot = parts.one_hot;
        self.logit_odds = parts.logit_odds;
        self.fitted = true;

        debug!(
            features = self.feature_names_out(&[])?.len(),
            "Preprocessor fitted"
        );
        Ok(())
    }

    fn transform(&self, frame: &Frame) -> FeatureResult<Frame> {
        if !self.fitted {
            return Err(FeatureError::NotFitted("Preprocessor".to_string()));
        }

        let enriched = self.quartile.transform(frame)?;
        let mut out = self
            .scaler
            .transform(&enriched)?
            .hstack(self.one_hot.transform(&enriched)?)?;
        if let Some(encoder) = &self.logit_odds {
            out = out.hstack(encoder.transform(&enriched)?)?;
        }

        debug!(
            rows = out.n_rows(),
            features = out.n_columns(),
            "Transformed batch"
        );
        Ok(out)
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }

    fn feature_names_out(&self, input_features: &[String]) -> FeatureResult<Vec<String>> {
        if !self.fitted {
            return Err(FeatureError::NotFitted("Preprocessor".to_string()));
        }

        let mut names = self.scaler.feature_names_out(input_features)?;
        names.extend(self.one_hot.feature_names_out(input_features)?);
        if let Some(encoder) = &self.logit_odds {
            names.extend(encoder.feature_names_out(input_features)?);
        }
        Ok(names)
    }
}
