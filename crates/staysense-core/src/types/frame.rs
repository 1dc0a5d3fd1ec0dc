//! Columnar record batches
//!
//! A `Frame` is an ordered set of equally long named columns. Column order
//! is part of the contract: transforms append, drop and select columns
//! without reordering the survivors.

use super::column::{Column, ColumnData};
use super::schema::Schema;
use super::value::Value;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One booking observation keyed by field name
pub type Record = HashMap<String, Value>;

/// Columnar batch of records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    columns: Vec<Column>,
}

impl Frame {
    /// Create an empty frame
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a frame from columns, checking names and lengths
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let mut frame = Self::new();
        for column in columns {
            frame.push_column(column)?;
        }
        Ok(frame)
    }

    /// Build a frame from row records following a schema
    ///
    /// Fields absent from a record become missing cells; record keys not in
    /// the schema are ignored.
    pub fn from_records(schema: &Schema, records: &[Record]) -> Result<Self> {
        let mut columns = Vec::with_capacity(schema.fields.len());
        for field in &schema.fields {
            let mut data = ColumnData::empty(&field.field_type);
            for record in records {
                let value = record.get(&field.name).cloned().unwrap_or(Value::Null);
                data.push(value).map_err(|e| {
                    CoreError::TypeError(format!("Field '{}': {}", field.name, e))
                })?;
            }
            columns.push(Column {
                name: field.name.clone(),
                data,
            });
        }
        Self::from_columns(columns)
    }

    /// Append a column
    pub fn push_column(&mut self, column: Column) -> Result<()> {
        if self.has_column(&column.name) {
            return Err(CoreError::DuplicateColumn(column.name));
        }
        if let Some(first) = self.columns.first() {
            let (expected, actual) = (first.len(), column.len());
            if expected != actual {
                return Err(CoreError::LengthMismatch {
                    column: column.name,
                    expected,
                    actual,
                });
            }
        }
        self.columns.push(column);
        Ok(())
    }

    /// Append a column, builder style
    pub fn with_column(mut self, column: Column) -> Result<Self> {
        self.push_column(column)?;
        Ok(self)
    }

    /// Number of rows (zero for a frame without columns)
    pub fn n_rows(&self) -> usize {
        self.columns.first().map(Column::len).unwrap_or(0)
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows() == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Get a column by name
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| CoreError::ColumnNotFound(name.to_string()))
    }

    /// Copy of the frame without the named columns; absent names are ignored
    pub fn drop_columns<S: AsRef<str>>(&self, names: &[S]) -> Self {
        let columns = self
            .columns
            .iter()
            .filter(|c| !names.iter().any(|n| n.as_ref() == c.name))
            .cloned()
            .collect();
        Self { columns }
    }

    /// Copy of the named columns, in the requested order
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Self> {
        let columns = names
            .iter()
            .map(|n| self.column(n.as_ref()).cloned())
            .collect::<Result<Vec<_>>>()?;
        Self::from_columns(columns)
    }

    /// Concatenate the columns of two frames side by side
    pub fn hstack(mut self, other: Frame) -> Result<Self> {
        if !self.columns.is_empty() && !other.columns.is_empty() && self.n_rows() != other.n_rows() {
            return Err(CoreError::LengthMismatch {
                column: other.columns[0].name.clone(),
                expected: self.n_rows(),
                actual: other.n_rows(),
            });
        }
        for column in other.columns {
            self.push_column(column)?;
        }
        Ok(self)
    }

    /// Row `index` as a record, missing cells included as `Value::Null`
    pub fn row(&self, index: usize) -> Option<Record> {
        if index >= self.n_rows() {
            return None;
        }
        Some(
            self.columns
                .iter()
                .map(|c| (c.name.clone(), c.value(index)))
                .collect(),
        )
    }

    /// All rows as records
    pub fn to_records(&self) -> Vec<Record> {
        (0..self.n_rows()).filter_map(|i| self.row(i)).collect()
    }
}
