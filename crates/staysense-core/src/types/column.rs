//! Named, typed columns
//!
//! A column stores one typed vector of optional cells. `None` marks a
//! missing cell.

use super::schema::FieldType;
use super::value::{integral, Category, Value};
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// Typed column storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "values", rename_all = "lowercase")]
pub enum ColumnData {
    Number(Vec<Option<f64>>),
    Integer(Vec<Option<i64>>),
    Text(Vec<Option<String>>),
}

impl ColumnData {
    /// Create empty storage for a field type
    pub fn empty(field_type: &FieldType) -> Self {
        match field_type {
            FieldType::Number => ColumnData::Number(Vec::new()),
            FieldType::Integer => ColumnData::Integer(Vec::new()),
            FieldType::Text => ColumnData::Text(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnData::Number(v) => v.len(),
            ColumnData::Integer(v) => v.len(),
            ColumnData::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn field_type(&self) -> FieldType {
        match self {
            ColumnData::Number(_) => FieldType::Number,
            ColumnData::Integer(_) => FieldType::Integer,
            ColumnData::Text(_) => FieldType::Text,
        }
    }

    /// Number of missing cells
    pub fn null_count(&self) -> usize {
        match self {
            ColumnData::Number(v) => v.iter().filter(|c| c.is_none()).count(),
            ColumnData::Integer(v) => v.iter().filter(|c| c.is_none()).count(),
            ColumnData::Text(v) => v.iter().filter(|c| c.is_none()).count(),
        }
    }

    /// Append a value, coercing it to the column type
    pub fn push(&mut self, value: Value) -> Result<()> {
        match (self, value) {
            (ColumnData::Number(v), Value::Null) => v.push(None),
            (ColumnData::Integer(v), Value::Null) => v.push(None),
            (ColumnData::Text(v), Value::Null) => v.push(None),
            (ColumnData::Number(v), value @ (Value::Number(_) | Value::Integer(_))) => {
                v.push(value.as_f64())
            }
            (ColumnData::Integer(v), Value::Integer(i)) => v.push(Some(i)),
            (ColumnData::Integer(v), Value::Number(n)) => v.push(Some(integral(n)?)),
            (ColumnData::Text(v), Value::String(s)) => v.push(Some(s)),
            (data, value) => {
                return Err(CoreError::TypeError(format!(
                    "Cannot store {:?} in a {} column",
                    value,
                    data.field_type()
                )))
            }
        }
        Ok(())
    }
}

impl From<Vec<f64>> for ColumnData {
    fn from(values: Vec<f64>) -> Self {
        ColumnData::Number(values.into_iter().map(Some).collect())
    }
}

impl From<Vec<Option<f64>>> for ColumnData {
    fn from(values: Vec<Option<f64>>) -> Self {
        ColumnData::Number(values)
    }
}

impl From<Vec<i64>> for ColumnData {
    fn from(values: Vec<i64>) -> Self {
        ColumnData::Integer(values.into_iter().map(Some).collect())
    }
}

impl From<Vec<Option<i64>>> for ColumnData {
    fn from(values: Vec<Option<i64>>) -> Self {
        ColumnData::Integer(values)
    }
}

impl From<Vec<&str>> for ColumnData {
    fn from(values: Vec<&str>) -> Self {
        ColumnData::Text(values.into_iter().map(|s| Some(s.to_string())).collect())
    }
}

impl From<Vec<String>> for ColumnData {
    fn from(values: Vec<String>) -> Self {
        ColumnData::Text(values.into_iter().map(Some).collect())
    }
}

impl From<Vec<Option<String>>> for ColumnData {
    fn from(values: Vec<Option<String>>) -> Self {
        ColumnData::Text(values)
    }
}

/// A named column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name
    pub name: String,

    /// Column cells
    pub data: ColumnData,
}

impl Column {
    /// Create a new column
    pub fn new(name: impl Into<String>, data: impl Into<ColumnData>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn field_type(&self) -> FieldType {
        self.data.field_type()
    }

    /// Cell at `row` as a `Value`
    pub fn value(&self, row: usize) -> Value {
        match &self.data {
            ColumnData::Number(v) => v.get(row).copied().flatten().into(),
            ColumnData::Integer(v) => v.get(row).copied().flatten().into(),
            ColumnData::Text(v) => v.get(row).cloned().flatten().into(),
        }
    }

    /// All cells as optional floats
    ///
    /// Fails for text columns.
    pub fn numbers(&self) -> Result<Vec<Option<f64>>> {
        match &self.data {
            ColumnData::Number(v) => Ok(v.clone()),
            ColumnData::Integer(v) => Ok(v.iter().map(|c| c.map(|i| i as f64)).collect()),
            ColumnData::Text(_) => Err(CoreError::TypeError(format!(
                "Column '{}' is text, expected a numeric column",
                self.name
            ))),
        }
    }

    /// All cells as optional categories
    ///
    /// Fails for number columns holding non-integral values.
    pub fn categories(&self) -> Result<Vec<Option<Category>>> {
        match &self.data {
            ColumnData::Text(v) => Ok(v
                .iter()
                .map(|c| c.as_ref().map(|s| Category::Text(s.clone())))
                .collect()),
            ColumnData::Integer(v) => Ok(v.iter().map(|c| c.map(Category::Code)).collect()),
            ColumnData::Number(v) => v
                .iter()
                .map(|c| c.map(Category::from_f64).transpose())
                .collect::<Result<Vec<_>>>()
                .map_err(|e| {
                    CoreError::TypeError(format!("Column '{}' is not categorical: {}", self.name, e))
                }),
        }
    }
}
