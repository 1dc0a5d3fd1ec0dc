//! The fit/transform contract shared by every feature transform

use crate::error::{FeatureError, Result};
use staysense_core::{Column, CoreError, Frame};

/// A feature transform that learns state from a training batch
///
/// `fit` is the only method that mutates; once it returns, `transform`
/// is a pure read of the fitted tables and may be called concurrently.
pub trait Transformer {
    /// Learn the transform's tables from a training batch
    ///
    /// `labels` holds one binary label per row for supervised transforms;
    /// unsupervised transforms ignore it.
    fn fit(&mut self, frame: &Frame, labels: Option<&[f64]>) -> Result<()>;

    /// Apply the fitted transform
    fn transform(&self, frame: &Frame) -> Result<Frame>;

    /// Whether `fit` has completed
    fn is_fitted(&self) -> bool;

    /// Output column names for a batch with the given input columns
    fn feature_names_out(&self, input_features: &[String]) -> Result<Vec<String>>;

    /// Fit, then transform the same batch
    fn fit_transform(&mut self, frame: &Frame, labels: Option<&[f64]>) -> Result<Frame> {
        self.fit(frame, labels)?;
        self.transform(frame)
    }
}

/// Look up a column, reporting absence as `MissingColumn`
pub(crate) fn require_column<'a>(frame: &'a Frame, name: &str) -> Result<&'a Column> {
    frame.column(name).map_err(|e| match e {
        CoreError::ColumnNotFound(name) => FeatureError::MissingColumn(name),
        other => FeatureError::Core(other),
    })
}
