//! StaySense SDK
//!
//! High-level API for turning booking records into classifier features
//! and cancellation predictions.

pub mod booking;
pub mod builder;
pub mod classifier;
pub mod config;
pub mod error;
pub mod predictor;
pub mod preprocessor;

// Re-export main types
pub use booking::{booking_schema, BookingRequest};
pub use builder::PreprocessorBuilder;
pub use classifier::{Classifier, LinearClassifier};
pub use config::PipelineConfig;
pub use error::{Result, SdkError};
pub use predictor::{CancellationPredictor, Prediction};
pub use preprocessor::Preprocessor;

// Re-export commonly used types from dependencies
pub use staysense_core::{FeatureMatrix, Frame, Value};
pub use staysense_features::{
    HandleUnknown, LogitOddsConfig, QuartileDeviationConfig, Transformer,
};
