//! Input column model.
//!
//! A [`Column`] is an ordered sequence of heterogeneous [`Value`]s with an
//! optional name used in diagnostics. The row identifier is the position in
//! the sequence; every mask and coerced array derived from a column keeps
//! that alignment. Columns are never mutated by the validators.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

/// A single cell of a column.
///
/// `Missing` is the designated "no value" marker. A `Float` NaN is treated
/// as missing everywhere, matching the convention of float-backed columns
/// where NaN is the only representable hole.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Missing,
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
}

impl Value {
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Missing => true,
            Value::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(v.to_vec())
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::Timestamp(v)
    }
}

/// Overall storage classification of a column, as opposed to the type of
/// any individual value.
///
/// The numeric and string validators gate on this before running their
/// per-value constraint rules: length or case checks against a uniformly
/// numeric column (or bounds against a mixed one) are undefined, so the
/// whole call short-circuits with a datatype diagnostic instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageClass {
    Int64,
    Float64,
    Object,
}

impl StorageClass {
    pub fn is_numeric(&self) -> bool {
        matches!(self, StorageClass::Int64 | StorageClass::Float64)
    }
}

impl fmt::Display for StorageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StorageClass::Int64 => "int64",
            StorageClass::Float64 => "float64",
            StorageClass::Object => "object",
        };
        write!(f, "{}", label)
    }
}

/// An ordered, positionally indexed sequence of values under validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: Option<String>,
    values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: Some(name.into()),
            values,
        }
    }

    pub fn unnamed(values: Vec<Value>) -> Self {
        Self { name: None, values }
    }

    /// Column name as rendered in diagnostics; empty for unnamed columns.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Classify the column's storage as a whole.
    ///
    /// Uniform integers with no holes are `int64`; integers and floats
    /// (or any missing entries, which force a float-backed storage) are
    /// `float64`; anything else, including an empty mix with strings,
    /// bytes or temporal values, is `object`. An empty or all-missing
    /// column classifies as `float64`.
    pub fn storage_class(&self) -> StorageClass {
        let mut widened = false;
        for value in &self.values {
            match value {
                Value::Int(_) => {}
                Value::Float(_) | Value::Missing => widened = true,
                _ => return StorageClass::Object,
            }
        }
        if widened || self.values.is_empty() {
            StorageClass::Float64
        } else {
            StorageClass::Int64
        }
    }
}
