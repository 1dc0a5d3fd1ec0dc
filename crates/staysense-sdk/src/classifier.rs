//! Classifier seam
//!
//! The preprocessor's output is handed to any [`Classifier`]. The bundled
//! [`LinearClassifier`] is a logistic model with named weights, loaded
//! from YAML.

use crate::error::{Result, SdkError};
use serde::{Deserialize, Serialize};
use staysense_core::FeatureMatrix;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// A trained binary classifier
pub trait Classifier: Send + Sync {
    /// One label per matrix row, each 0 (not cancelled) or 1 (cancelled)
    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<u8>>;
}

/// Logistic model over named features
///
/// Features without a weight contribute nothing; a weight for a feature
/// missing from the matrix is an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearClassifier {
    #[serde(default)]
    pub intercept: f64,

    #[serde(default)]
    pub weights: BTreeMap<String, f64>,

    /// Probability at or above which a booking is labeled cancelled
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_threshold() -> f64 {
    0.5
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl LinearClassifier {
    pub fn new(intercept: f64, weights: impl IntoIterator<Item = (String, f64)>) -> Self {
        Self {
            intercept,
            weights: weights.into_iter().collect(),
            threshold: default_threshold(),
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Parse a YAML model document
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let model: Self = serde_yaml::from_str(content)?;
        if !(0.0..=1.0).contains(&model.threshold) {
            return Err(SdkError::ConfigError(format!(
                "threshold must be within [0, 1], got {}",
                model.threshold
            )));
        }
        Ok(model)
    }

    /// Load a YAML model file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading classifier from: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Cancellation probability per row
    pub fn predict_proba(&self, features: &FeatureMatrix) -> Result<Vec<f64>> {
        let positions = self
            .weights
            .iter()
            .map(|(name, weight)| {
                features
                    .feature_index(name)
                    .map(|i| (i, *weight))
                    .ok_or_else(|| {
                        SdkError::ClassifierError(format!(
                            "weighted feature '{}' is absent from the matrix",
                            name
                        ))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        features
            .rows
            .iter()
            .enumerate()
            .map(|(row, values)| {
                let mut z = self.intercept;
                for &(i, weight) in &positions {
                    let value = values[i];
                    if value.is_nan() {
                        return Err(SdkError::ClassifierError(format!(
                            "feature '{}' is missing in row {}",
                            features.names[i], row
                        )));
                    }
                    z += weight * value;
                }
                Ok(sigmoid(z))
            })
            .collect()
    }
}

impl Classifier for LinearClassifier {
    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<u8>> {
        Ok(self
            .predict_proba(features)?
            .into_iter()
            .map(|p| u8::from(p >= self.threshold))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> FeatureMatrix {
        FeatureMatrix {
            names: vec!["LeadTime".to_string(), "Agent_logit_odds".to_string()],
            rows: vec![vec![2.0, 0.0], vec![-2.0, 0.0]],
        }
    }

    #[test]
    fn test_predict() {
        let model = LinearClassifier::new(0.0, [("LeadTime".to_string(), 1.5)]);
        assert_eq!(model.predict(&matrix()).unwrap(), vec![1, 0]);

        let proba = model.predict_proba(&matrix()).unwrap();
        assert!((proba[0] - sigmoid(3.0)).abs() < 1e-12);
        assert!((proba[0] + proba[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_intercept_only() {
        let model = LinearClassifier::new(-1.0, []);
        assert_eq!(model.predict(&matrix()).unwrap(), vec![0, 0]);
        assert_eq!(model.with_threshold(0.0).predict(&matrix()).unwrap(), vec![1, 1]);
    }

    #[test]
    fn test_unknown_weighted_feature() {
        let model = LinearClassifier::new(0.0, [("Company_logit_odds".to_string(), 1.0)]);
        assert!(matches!(
            model.predict(&matrix()),
            Err(SdkError::ClassifierError(_))
        ));
    }

    #[test]
    fn test_missing_cell_rejected() {
        let mut features = matrix();
        features.rows[1][0] = f64::NAN;
        let model = LinearClassifier::new(0.0, [("LeadTime".to_string(), 1.0)]);
        let err = model.predict(&features).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r#"
intercept: -0.4
weights:
  LeadTime: 0.8
  DepositType_Non Refund: 2.1
"#;
        let model = LinearClassifier::from_yaml_str(yaml).unwrap();
        assert_eq!(model.intercept, -0.4);
        assert_eq!(model.threshold, 0.5);
        assert_eq!(model.weights["DepositType_Non Refund"], 2.1);

        assert!(LinearClassifier::from_yaml_str("threshold: 2.0").is_err());
    }
}
