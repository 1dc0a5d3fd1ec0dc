//! Type system for StaySense
//!
//! This module contains the tabular data model including:
//! - Cell values and categories
//! - Columns and frames (record batches)
//! - Schema definitions
//! - Feature matrices

pub mod column;
pub mod frame;
pub mod matrix;
pub mod schema;
pub mod value;

pub use column::{Column, ColumnData};
pub use frame::{Frame, Record};
pub use matrix::FeatureMatrix;
pub use schema::{FieldType, Schema, SchemaField};
pub use value::{Category, Value};
