//! Cancellation prediction
//!
//! Couples a fitted [`Preprocessor`] with a [`Classifier`] and maps the
//! classifier's binary labels onto [`Prediction`].

use crate::booking::BookingRequest;
use crate::classifier::Classifier;
use crate::error::{Result, SdkError};
use crate::preprocessor::Preprocessor;
use serde::{Deserialize, Serialize};
use staysense_core::Frame;
use staysense_features::{FeatureError, Transformer};
use std::fmt;
use tracing::{debug, info};

/// Outcome for one booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Prediction {
    #[serde(rename = "Cancelled")]
    Cancelled,
    #[serde(rename = "Not Cancelled")]
    NotCancelled,
}

impl Prediction {
    /// Map a classifier label; only 0 and 1 are valid
    pub fn from_label(label: u8) -> Result<Self> {
        match label {
            1 => Ok(Prediction::Cancelled),
            0 => Ok(Prediction::NotCancelled),
            other => Err(SdkError::ClassifierError(format!(
                "expected a 0/1 label, got {}",
                other
            ))),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Prediction::Cancelled)
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prediction::Cancelled => write!(f, "Cancelled"),
            Prediction::NotCancelled => write!(f, "Not Cancelled"),
        }
    }
}

/// Fitted preprocessor plus classifier
pub struct CancellationPredictor<C: Classifier> {
    preprocessor: Preprocessor,
    classifier: C,
}

impl<C: Classifier> CancellationPredictor<C> {
    /// Pair a fitted preprocessor with a classifier
    pub fn new(preprocessor: Preprocessor, classifier: C) -> Result<Self> {
        if !preprocessor.is_fitted() {
            return Err(FeatureError::NotFitted("Preprocessor".to_string()).into());
        }
        Ok(Self {
            preprocessor,
            classifier,
        })
    }

    pub fn preprocessor(&self) -> &Preprocessor {
        &self.preprocessor
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Predict every row of a booking batch
    pub fn predict(&self, frame: &Frame) -> Result<Vec<Prediction>> {
        let features = self.preprocessor.transform_matrix(frame)?;
        let labels = self.classifier.predict(&features)?;
        if labels.len() != features.n_rows() {
            return Err(SdkError::ClassifierError(format!(
                "expected {} labels, got {}",
                features.n_rows(),
                labels.len()
            )));
        }

        let predictions = labels
            .into_iter()
            .map(Prediction::from_label)
            .collect::<Result<Vec<_>>>()?;

        let cancelled = predictions.iter().filter(|p| p.is_cancelled()).count();
        info!(rows = predictions.len(), cancelled, "Predicted batch");
        Ok(predictions)
    }

    /// Predict a single booking
    pub fn predict_booking(&self, request: &BookingRequest) -> Result<Prediction> {
        let frame = BookingRequest::to_frame(std::slice::from_ref(request))?;
        let prediction = self
            .predict(&frame)?
            .into_iter()
            .next()
            .ok_or_else(|| SdkError::ClassifierError("no prediction returned".to_string()))?;
        debug!(%prediction, "Predicted booking");
        Ok(prediction)
    }
}
