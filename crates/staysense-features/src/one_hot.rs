//! One-hot encoding for low-cardinality categoricals

use crate::error::{FeatureError, Result};
use crate::transformer::{require_column, Transformer};
use serde::{Deserialize, Serialize};
use staysense_core::{Category, Column, Frame};
use std::collections::BTreeSet;
use tracing::debug;

/// What to do with a category not seen during fit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleUnknown {
    /// Fail the transform
    #[default]
    Error,
    /// Emit an all-zero indicator row
    Ignore,
}

/// Indicator column per (column, category) pair
///
/// Output columns are named `<column>_<category>` and ordered by
/// configured column, then by sorted category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneHotEncoder {
    columns: Vec<String>,
    handle_unknown: HandleUnknown,
    categories: Option<Vec<Vec<Category>>>,
}

impl OneHotEncoder {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            handle_unknown: HandleUnknown::default(),
            categories: None,
        }
    }

    pub fn with_handle_unknown(mut self, handle_unknown: HandleUnknown) -> Self {
        self.handle_unknown = handle_unknown;
        self
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Fitted categories of one column, sorted
    pub fn categories(&self, column: &str) -> Result<Option<&[Category]>> {
        let categories = self.fitted()?;
        Ok(self
            .columns
            .iter()
            .position(|c| c == column)
            .map(|i| categories[i].as_slice()))
    }

    fn fitted(&self) -> Result<&Vec<Vec<Category>>> {
        self.categories
            .as_ref()
            .ok_or_else(|| FeatureError::NotFitted("OneHotEncoder".to_string()))
    }
}

impl Transformer for OneHotEncoder {
    fn fit(&mut self, frame: &Frame, _labels: Option<&[f64]>) -> Result<()> {
        let categories = self
            .columns
            .iter()
            .map(|name| {
                let seen: BTreeSet<Category> = require_column(frame, name)?
                    .categories()?
                    .into_iter()
                    .flatten()
                    .collect();
                Ok(seen.into_iter().collect())
            })
            .collect::<Result<Vec<Vec<Category>>>>()?;

        debug!(
            columns = categories.len(),
            indicators = categories.iter().map(Vec::len).sum::<usize>(),
            "Fitted one-hot encoder"
        );
        self.categories = Some(categories);
        Ok(())
    }

    fn transform(&self, frame: &Frame) -> Result<Frame> {
        let fitted = self.fitted()?;
        let mut out = Frame::new();

        for (name, known) in self.columns.iter().zip(fitted) {
            let cells = require_column(frame, name)?.categories()?;
            let mut indicators = vec![vec![0.0; cells.len()]; known.len()];

            for (row, cell) in cells.iter().enumerate() {
                let position = cell.as_ref().and_then(|c| known.binary_search(c).ok());
                match (position, self.handle_unknown) {
                    (Some(i), _) => indicators[i][row] = 1.0,
                    (None, HandleUnknown::Ignore) => {}
                    (None, HandleUnknown::Error) => {
                        return Err(FeatureError::UnknownCategory {
                            column: name.clone(),
                            category: cell
                                .as_ref()
                                .map(|c| c.to_string())
                                .unwrap_or_else(|| "<missing>".to_string()),
                        })
                    }
                }
            }

            for (category, values) in known.iter().zip(indicators) {
                out.push_column(Column::new(format!("{}_{}", name, category), values))?;
            }
        }
        Ok(out)
    }

    fn is_fitted(&self) -> bool {
        self.categories.is_some()
    }

    fn feature_names_out(&self, _input_features: &[String]) -> Result<Vec<String>> {
        let fitted = self.fitted()?;
        Ok(self
            .columns
            .iter()
            .zip(fitted)
            .flat_map(|(name, known)| known.iter().map(move |c| format!("{}_{}", name, c)))
            .collect())
    }
}
