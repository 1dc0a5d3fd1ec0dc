//! Dense numeric feature matrix
//!
//! The classifier-facing form of a transformed batch: named columns,
//! row-major `f64` values, missing cells as NaN.

use super::column::ColumnData;
use super::frame::Frame;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// Row-major feature matrix
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureMatrix {
    /// Feature names in column order
    pub names: Vec<String>,

    /// One vector per row, aligned with `names`
    pub rows: Vec<Vec<f64>>,
}

impl FeatureMatrix {
    /// Convert a frame of numeric columns
    ///
    /// Text columns are rejected; encode them first.
    pub fn from_frame(frame: &Frame) -> Result<Self> {
        let n_rows = frame.n_rows();
        let mut rows = vec![Vec::with_capacity(frame.n_columns()); n_rows];
        let mut names = Vec::with_capacity(frame.n_columns());

        for column in frame.columns() {
            if let ColumnData::Text(_) = column.data {
                return Err(CoreError::TypeError(format!(
                    "Column '{}' is text and cannot enter a feature matrix",
                    column.name
                )));
            }
            for (row, cell) in rows.iter_mut().zip(column.numbers()?) {
                row.push(cell.unwrap_or(f64::NAN));
            }
            names.push(column.name.clone());
        }

        Ok(Self { names, rows })
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_features(&self) -> usize {
        self.names.len()
    }

    /// Position of a feature by name
    pub fn feature_index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// All values of one feature
    pub fn feature(&self, name: &str) -> Option<Vec<f64>> {
        let index = self.feature_index(name)?;
        Some(self.rows.iter().map(|r| r[index]).collect())
    }
}
