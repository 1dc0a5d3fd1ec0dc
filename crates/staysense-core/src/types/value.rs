//! Runtime value types for booking records
//!
//! `Value` is a single cell of a record; `Category` is the hashable,
//! ordered form of a categorical cell used as a lookup key.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cell value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing value
    Null,
    /// Integer value (integer-coded categoricals, counts, years)
    Integer(i64),
    /// Floating point value
    Number(f64),
    /// String value
    String(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of the value; strings and nulls have none
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Number(n) => Some(*n),
            Value::Null | Value::String(_) => None,
        }
    }

    /// Categorical view of the value
    ///
    /// Numbers are only accepted when they are integral, so `2017.0`
    /// and `2017` land in the same bucket.
    pub fn as_category(&self) -> Result<Option<Category>> {
        match self {
            Value::Null => Ok(None),
            Value::Integer(i) => Ok(Some(Category::Code(*i))),
            Value::String(s) => Ok(Some(Category::Text(s.clone()))),
            Value::Number(n) => Category::from_f64(*n).map(Some),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Categorical key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Category {
    /// Integer-coded category (e.g. agent id, arrival year)
    Code(i64),
    /// String category (e.g. distribution channel)
    Text(String),
}

impl Category {
    /// Convert an integral float into a category code
    pub fn from_f64(n: f64) -> Result<Self> {
        integral(n).map(Category::Code)
    }
}

/// Integral float to `i64`
pub(crate) fn integral(n: f64) -> Result<i64> {
    if n.is_finite() && n.fract() == 0.0 && n.abs() <= i64::MAX as f64 {
        Ok(n as i64)
    } else {
        Err(CoreError::TypeError(format!(
            "Expected an integral number, got {}",
            n
        )))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Code(code) => write!(f, "{}", code),
            Category::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Category::Text(s.to_string())
    }
}

impl From<i64> for Category {
    fn from(code: i64) -> Self {
        Category::Code(code)
    }
}
