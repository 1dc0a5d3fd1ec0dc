//! Schema definitions for record batches
//!
//! Schemas define the expected columns of a batch and their semantic types.

use super::frame::Frame;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Field type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Floating point numeric field
    Number,

    /// Integer field (counts, years, integer-coded categoricals)
    Integer,

    /// Categorical string field
    Text,
}

impl FieldType {
    /// Whether a column of type `actual` can be read as this field type
    pub fn accepts(&self, actual: FieldType) -> bool {
        match self {
            FieldType::Number => matches!(actual, FieldType::Number | FieldType::Integer),
            FieldType::Integer => matches!(actual, FieldType::Integer | FieldType::Number),
            FieldType::Text => actual == FieldType::Text,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Number => f.write_str("number"),
            FieldType::Integer => f.write_str("integer"),
            FieldType::Text => f.write_str("text"),
        }
    }
}

/// A field in a schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaField {
    /// Field name
    pub name: String,

    /// Field type
    pub field_type: FieldType,

    /// Whether this field is required
    #[serde(default)]
    pub required: bool,

    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
}

impl SchemaField {
    /// Create a new field
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: false,
            description: None,
        }
    }

    /// Mark field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Ordered list of fields describing a record batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Schema name
    pub name: String,

    /// Fields in column order
    pub fields: Vec<SchemaField>,
}

impl Schema {
    /// Create a new schema
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field
    pub fn add_field(mut self, field: SchemaField) -> Self {
        self.fields.push(field);
        self
    }

    /// Field names in order
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Check that a frame carries every required field with a compatible type
    ///
    /// Optional fields are only type-checked when present.
    pub fn validate(&self, frame: &Frame) -> Result<()> {
        for field in &self.fields {
            match frame.column(&field.name) {
                Ok(column) => {
                    if !field.field_type.accepts(column.field_type()) {
                        return Err(CoreError::TypeError(format!(
                            "Field '{}' expects {}, found {}",
                            field.name,
                            field.field_type,
                            column.field_type()
                        )));
                    }
                }
                Err(_) if !field.required => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Column;

    fn schema() -> Schema {
        Schema::new("booking")
            .add_field(SchemaField::new("ADR", FieldType::Number).required())
            .add_field(SchemaField::new("Meal", FieldType::Text))
    }

    #[test]
    fn test_validate_accepts_integer_for_number() {
        let frame = Frame::from_columns(vec![Column::new("ADR", vec![100i64])]).unwrap();
        assert!(schema().validate(&frame).is_ok());
    }

    #[test]
    fn test_validate_missing_required_field() {
        let frame = Frame::from_columns(vec![Column::new("Meal", vec!["BB"])]).unwrap();
        let err = schema().validate(&frame).unwrap_err();
        assert_eq!(err, CoreError::ColumnNotFound("ADR".to_string()));
    }

    #[test]
    fn test_validate_type_mismatch() {
        let frame = Frame::from_columns(vec![
            Column::new("ADR", vec![100.0]),
            Column::new("Meal", vec![1i64]),
        ])
        .unwrap();
        assert!(matches!(
            schema().validate(&frame),
            Err(CoreError::TypeError(_))
        ));
    }

    #[test]
    fn test_field_type_serialize() {
        let json = serde_json::to_string(&FieldType::Integer).unwrap();
        assert_eq!(json, "\"integer\"");
    }
}
