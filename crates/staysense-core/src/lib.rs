//! StaySense Core - Core types and definitions for the StaySense feature pipeline
//!
//! This crate provides the fundamental types used across the StaySense ecosystem:
//! - Cell values and categorical keys
//! - Columnar record batches (`Frame`)
//! - Schemas for the booking record layout
//! - Numeric feature matrices handed to classifiers
//! - Error types

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use types::{
    Category, Column, ColumnData, FeatureMatrix, FieldType, Frame, Record, Schema, SchemaField,
    Value,
};
