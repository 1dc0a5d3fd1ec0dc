//! Integration tests for cancellation prediction

mod common;

use common::{booking, scoring_frame, training_frame, training_labels};
use staysense_sdk::{
    BookingRequest, CancellationPredictor, Classifier, FeatureMatrix, LinearClassifier,
    PipelineConfig, Prediction, Preprocessor, Result, SdkError, Transformer,
};
use std::sync::Arc;

fn fitted() -> Preprocessor {
    let mut preprocessor = Preprocessor::new(PipelineConfig::default()).unwrap();
    preprocessor
        .fit(&training_frame(), Some(&training_labels()))
        .unwrap();
    preprocessor
}

/// Cancels exactly the non-refundable deposits
fn deposit_model() -> LinearClassifier {
    LinearClassifier::from_yaml_str(
        r#"
intercept: -4.0
weights:
  DepositType_Non Refund: 8.0
"#,
    )
    .unwrap()
}

/// Returns a fixed label vector whatever the input
struct FixedClassifier(Vec<u8>);

impl Classifier for FixedClassifier {
    fn predict(&self, _features: &FeatureMatrix) -> Result<Vec<u8>> {
        Ok(self.0.clone())
    }
}

#[test]
fn test_predict_batch() {
    let predictor = CancellationPredictor::new(fitted(), deposit_model()).unwrap();
    let predictions = predictor.predict(&scoring_frame()).unwrap();
    assert_eq!(
        predictions,
        vec![
            Prediction::Cancelled,
            Prediction::NotCancelled,
            Prediction::NotCancelled,
        ]
    );
}

#[test]
fn test_predict_single_booking() {
    let predictor = CancellationPredictor::new(fitted(), deposit_model()).unwrap();

    let prediction = predictor
        .predict_booking(&booking("H2", "Non Refund", 9, 120.0, 90.0))
        .unwrap();
    assert_eq!(prediction.to_string(), "Cancelled");

    let prediction = predictor.predict_booking(&BookingRequest::default()).unwrap();
    assert_eq!(prediction.to_string(), "Not Cancelled");
}

#[test]
fn test_predictor_shared_across_threads() {
    let predictor = Arc::new(CancellationPredictor::new(fitted(), deposit_model()).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let predictor = Arc::clone(&predictor);
            std::thread::spawn(move || predictor.predict(&scoring_frame()).unwrap())
        })
        .collect();

    let expected = predictor.predict(&scoring_frame()).unwrap();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_non_binary_label_rejected() {
    let predictor = CancellationPredictor::new(fitted(), FixedClassifier(vec![0, 3, 1])).unwrap();
    assert!(matches!(
        predictor.predict(&scoring_frame()),
        Err(SdkError::ClassifierError(_))
    ));
}

#[test]
fn test_label_count_mismatch_rejected() {
    let predictor = CancellationPredictor::new(fitted(), FixedClassifier(vec![1])).unwrap();
    let err = predictor.predict(&scoring_frame()).unwrap_err();
    assert_eq!(err.to_string(), "Classifier error: expected 3 labels, got 1");
}

#[test]
fn test_weight_for_unknown_feature_rejected() {
    let model = LinearClassifier::new(0.0, [("Meal_FB".to_string(), 1.0)]);
    let predictor = CancellationPredictor::new(fitted(), model).unwrap();
    assert!(matches!(
        predictor.predict(&scoring_frame()),
        Err(SdkError::ClassifierError(_))
    ));
}
