//! Standard scaling for numeric columns

use crate::error::{FeatureError, Result};
use crate::transformer::{require_column, Transformer};
use serde::{Deserialize, Serialize};
use staysense_core::{Column, Frame};
use tracing::{debug, warn};

/// Per-column centering and scaling parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleParams {
    pub mean: f64,
    pub scale: f64,
}

/// Standardizes numeric columns to zero mean and unit variance
///
/// Uses the population standard deviation. Constant columns are only
/// centered. Missing cells are ignored by `fit` and stay missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    columns: Vec<String>,
    params: Option<Vec<ScaleParams>>,
}

impl StandardScaler {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            params: None,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Fitted parameters of one column
    pub fn params(&self, column: &str) -> Result<Option<ScaleParams>> {
        let params = self
            .params
            .as_ref()
            .ok_or_else(|| FeatureError::NotFitted("StandardScaler".to_string()))?;
        Ok(self
            .columns
            .iter()
            .position(|c| c == column)
            .map(|i| params[i]))
    }
}

fn fit_params(name: &str, values: &[Option<f64>]) -> ScaleParams {
    let observed: Vec<f64> = values.iter().flatten().copied().filter(|v| !v.is_nan()).collect();
    if observed.is_empty() {
        warn!(column = %name, "No observed values; column passes through unscaled");
        return ScaleParams {
            mean: 0.0,
            scale: 1.0,
        };
    }

    let n = observed.len() as f64;
    let mean = observed.iter().sum::<f64>() / n;
    let variance = observed.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let std = variance.sqrt();
    ScaleParams {
        mean,
        scale: if std > 0.0 { std } else { 1.0 },
    }
}

impl Transformer for StandardScaler {
    fn fit(&mut self, frame: &Frame, _labels: Option<&[f64]>) -> Result<()> {
        let params = self
            .columns
            .iter()
            .map(|name| {
                let values = require_column(frame, name)?.numbers()?;
                Ok(fit_params(name, &values))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(columns = params.len(), "Fitted standard scaler");
        self.params = Some(params);
        Ok(())
    }

    fn transform(&self, frame: &Frame) -> Result<Frame> {
        let params = self
            .params
            .as_ref()
            .ok_or_else(|| FeatureError::NotFitted("StandardScaler".to_string()))?;

        let mut out = Frame::new();
        for (name, p) in self.columns.iter().zip(params) {
            let scaled: Vec<Option<f64>> = require_column(frame, name)?
                .numbers()?
                .into_iter()
                .map(|cell| cell.map(|v| (v - p.mean) / p.scale))
                .collect();
            out.push_column(Column::new(name.clone(), scaled))?;
        }
        Ok(out)
    }

    fn is_fitted(&self) -> bool {
        self.params.is_some()
    }

    fn feature_names_out(&self, _input_features: &[String]) -> Result<Vec<String>> {
        Ok(self.columns.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_scaling() {
        let frame = Frame::from_columns(vec![
            Column::new("LeadTime", vec![1.0, 2.0, 3.0]),
            Column::new("Babies", vec![0i64, 0, 0]),
        ])
        .unwrap();

        let mut scaler = StandardScaler::new(["LeadTime", "Babies"]);
        let out = scaler.fit_transform(&frame, None).unwrap();

        let std = (2.0f64 / 3.0).sqrt();
        let lead = out.column("LeadTime").unwrap().numbers().unwrap();
        assert!((lead[0].unwrap() + 1.0 / std).abs() < 1e-12);
        assert_eq!(lead[1], Some(0.0));

        // constant column: centered, scale 1
        assert_eq!(
            scaler.params("Babies").unwrap(),
            Some(ScaleParams { mean: 0.0, scale: 1.0 })
        );
    }

    #[test]
    fn test_missing_cells_stay_missing() {
        let frame =
            Frame::from_columns(vec![Column::new("Children", vec![Some(2.0), None, Some(4.0)])])
                .unwrap();
        let mut scaler = StandardScaler::new(["Children"]);
        let out = scaler.fit_transform(&frame, None).unwrap();
        let values = out.column("Children").unwrap().numbers().unwrap();
        assert_eq!(values, vec![Some(-1.0), None, Some(1.0)]);
    }

    #[test]
    fn test_text_column_rejected() {
        let frame = Frame::from_columns(vec![Column::new("Meal", vec!["BB"])]).unwrap();
        let mut scaler = StandardScaler::new(["Meal"]);
        assert!(matches!(
            scaler.fit(&frame, None),
            Err(FeatureError::Core(_))
        ));
    }

    #[test]
    fn test_transform_before_fit() {
        let scaler = StandardScaler::new(["LeadTime"]);
        assert!(!scaler.is_fitted());
        assert!(matches!(
            scaler.transform(&Frame::new()),
            Err(FeatureError::NotFitted(_))
        ));
    }
}
