//! Scalar data model: type tags, schema fields, and cell values.
//!
//! A [`Schema`] declares the target type for each column the loader must
//! align; a [`Value`] is one typed cell in a [`crate::table::Table`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Target scalar type for a schema column.
///
/// This is the full set of type tags a schema may declare. Source documents
/// can carry other scalar shapes (booleans, nested objects); those survive in
/// the table as untyped passthrough columns, they just cannot be declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    /// 64-bit signed integer.
    #[serde(rename = "integer")]
    Int64,
    /// 64-bit floating point number.
    #[serde(rename = "floating-point")]
    Float64,
    /// UTF-8 string.
    #[serde(rename = "text")]
    Utf8,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Int64 => f.write_str("integer"),
            DataType::Float64 => f.write_str("floating-point"),
            DataType::Utf8 => f.write_str("text"),
        }
    }
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Column name. May be a dot path (`user.name`) addressing a
    /// shallow-nested JSON object.
    pub name: String,
    /// Declared target type.
    pub data_type: DataType,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// An ordered list of fields: the contract a loaded table must satisfy.
///
/// Schemas are declared once per logical dataset by a schema-provider
/// function (see [`crate::schemas`]) and are immutable once obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Ordered list of fields. Alignment runs in this order.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate field names in declared order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the declared type of a field by name, if present.
    pub fn data_type_of(&self, name: &str) -> Option<DataType> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.data_type)
    }
}

/// A single cell value in a [`crate::table::Table`].
///
/// `Bool` has no schema type tag; it exists so columns outside the schema can
/// pass boolean source values through unmodified.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean (passthrough columns only).
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
}

impl Value {
    /// Textual rendition used in error messages and when writing untyped
    /// columns to text-only sinks.
    pub fn render(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Int64(v) => v.to_string(),
            Value::Float64(v) => v.to_string(),
            Value::Bool(v) => v.to_string(),
            Value::Utf8(s) => s.clone(),
        }
    }

    /// True for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}
