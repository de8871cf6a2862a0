//! Declared field types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::utils::is_identifier;

/// Declared type of a record field.
///
/// Written in the generator's notation: `string`, `integer`, `number`,
/// `boolean`, `Date`, `Array<T>` (or `T[]`), and a bare identifier naming
/// another registered record type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FieldType {
    /// String type
    String,
    /// Integer type (64-bit)
    Integer,
    /// Number type (double)
    Number,
    /// Boolean type
    Boolean,
    /// Absolute instant, RFC 3339 on the wire
    DateTime,
    /// Sequence whose elements all satisfy the element type
    Array(Box<FieldType>),
    /// Nested record, by registered type name
    Record(String),
}

impl FieldType {
    /// Sequence of `element`
    pub fn array(element: FieldType) -> Self {
        Self::Array(Box::new(element))
    }

    /// Nested record named `name`
    pub fn record(name: impl Into<String>) -> Self {
        Self::Record(name.into())
    }

    /// Name of the record type this type refers to, looking through sequences.
    pub fn record_name(&self) -> Option<&str> {
        match self {
            Self::Record(name) => Some(name),
            Self::Array(element) => element.record_name(),
            _ => None,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Integer => f.write_str("integer"),
            Self::Number => f.write_str("number"),
            Self::Boolean => f.write_str("boolean"),
            Self::DateTime => f.write_str("Date"),
            Self::Array(element) => write!(f, "Array<{}>", element),
            Self::Record(name) => f.write_str(name),
        }
    }
}

impl FromStr for FieldType {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(inner) = s
            .strip_prefix("Array<")
            .and_then(|rest| rest.strip_suffix('>'))
        {
            return Ok(Self::array(inner.parse()?));
        }
        if let Some(inner) = s.strip_suffix("[]") {
            return Ok(Self::array(inner.parse()?));
        }

        match s {
            "string" => Ok(Self::String),
            "integer" => Ok(Self::Integer),
            "number" => Ok(Self::Number),
            "boolean" => Ok(Self::Boolean),
            "Date" | "date-time" => Ok(Self::DateTime),
            name if is_identifier(name) => Ok(Self::Record(name.to_string())),
            other => Err(crate::Error::schema(format!(
                "invalid declared type '{}'",
                other
            ))),
        }
    }
}

impl TryFrom<String> for FieldType {
    type Error = crate::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FieldType> for String {
    fn from(value: FieldType) -> Self {
        value.to_string()
    }
}
