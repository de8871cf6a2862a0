//! Dynamic record values
//!
//! A [`Record`] is the in-memory side of the codec: a type name plus values
//! keyed by logical property name. Typed models convert to and from records
//! through [`IntoFieldValue`] and [`FromFieldValue`].

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::{Error, Result};

/// A decoded field value, already coerced to its declared type
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Number(f64),
    Boolean(bool),
    DateTime(DateTime<Utc>),
    Array(Vec<FieldValue>),
    Record(Record),
}

impl FieldValue {
    /// Short name of the value's kind, used in mismatch errors
    pub fn kind(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Integer(_) => "integer",
            Self::Number(_) => "number",
            Self::Boolean(_) => "boolean",
            Self::DateTime(_) => "date-time",
            Self::Array(_) => "array",
            Self::Record(_) => "record",
        }
    }
}

/// An instance of a registered record type, keyed by logical name.
///
/// Unset optional fields are simply absent from the record.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    type_name: String,
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over set fields in logical-name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Set a field, replacing any previous value
    pub fn insert(&mut self, name: impl Into<String>, value: impl IntoFieldValue) {
        self.fields.insert(name.into(), value.into_field_value());
    }

    /// Set a field only when a value is given
    pub fn insert_opt<T: IntoFieldValue>(&mut self, name: impl Into<String>, value: Option<T>) {
        if let Some(value) = value {
            self.insert(name, value);
        }
    }

    /// Builder-style [`Record::insert`]
    pub fn with(mut self, name: impl Into<String>, value: impl IntoFieldValue) -> Self {
        self.insert(name, value);
        self
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.fields.remove(name)
    }

    /// Take a field that must be set, converting it to `T`
    pub fn take_required<T: FromFieldValue>(&mut self, name: &str) -> Result<T> {
        let value = self
            .remove(name)
            .ok_or_else(|| Error::MissingRequiredField(name.to_string()))?;
        T::from_field_value(value, name)
    }

    /// Take a field that may be unset, converting it to `T`
    pub fn take_optional<T: FromFieldValue>(&mut self, name: &str) -> Result<Option<T>> {
        self.remove(name)
            .map(|value| T::from_field_value(value, name))
            .transpose()
    }
}

/// Conversion of a typed value into a [`FieldValue`]
pub trait IntoFieldValue {
    fn into_field_value(self) -> FieldValue;
}

/// Conversion of a [`FieldValue`] back into a typed value.
///
/// `field` names the value in errors.
pub trait FromFieldValue: Sized {
    fn from_field_value(value: FieldValue, field: &str) -> Result<Self>;
}

impl IntoFieldValue for FieldValue {
    fn into_field_value(self) -> FieldValue {
        self
    }
}

impl FromFieldValue for FieldValue {
    fn from_field_value(value: FieldValue, _field: &str) -> Result<Self> {
        Ok(value)
    }
}

impl IntoFieldValue for Record {
    fn into_field_value(self) -> FieldValue {
        FieldValue::Record(self)
    }
}

impl FromFieldValue for Record {
    fn from_field_value(value: FieldValue, field: &str) -> Result<Self> {
        match value {
            FieldValue::Record(record) => Ok(record),
            other => Err(Error::type_mismatch(field, "record", other.kind())),
        }
    }
}

impl IntoFieldValue for String {
    fn into_field_value(self) -> FieldValue {
        FieldValue::String(self)
    }
}

impl IntoFieldValue for &str {
    fn into_field_value(self) -> FieldValue {
        FieldValue::String(self.to_string())
    }
}

impl FromFieldValue for String {
    fn from_field_value(value: FieldValue, field: &str) -> Result<Self> {
        match value {
            FieldValue::String(s) => Ok(s),
            other => Err(Error::type_mismatch(field, "string", other.kind())),
        }
    }
}

impl IntoFieldValue for i64 {
    fn into_field_value(self) -> FieldValue {
        FieldValue::Integer(self)
    }
}

impl FromFieldValue for i64 {
    fn from_field_value(value: FieldValue, field: &str) -> Result<Self> {
        match value {
            FieldValue::Integer(n) => Ok(n),
            other => Err(Error::type_mismatch(field, "integer", other.kind())),
        }
    }
}

impl IntoFieldValue for f64 {
    fn into_field_value(self) -> FieldValue {
        FieldValue::Number(self)
    }
}

impl FromFieldValue for f64 {
    fn from_field_value(value: FieldValue, field: &str) -> Result<Self> {
        match value {
            FieldValue::Number(n) => Ok(n),
            FieldValue::Integer(n) => Ok(n as f64),
            other => Err(Error::type_mismatch(field, "number", other.kind())),
        }
    }
}

impl IntoFieldValue for bool {
    fn into_field_value(self) -> FieldValue {
        FieldValue::Boolean(self)
    }
}

impl FromFieldValue for bool {
    fn from_field_value(value: FieldValue, field: &str) -> Result<Self> {
        match value {
            FieldValue::Boolean(b) => Ok(b),
            other => Err(Error::type_mismatch(field, "boolean", other.kind())),
        }
    }
}

impl IntoFieldValue for DateTime<Utc> {
    fn into_field_value(self) -> FieldValue {
        FieldValue::DateTime(self)
    }
}

impl FromFieldValue for DateTime<Utc> {
    fn from_field_value(value: FieldValue, field: &str) -> Result<Self> {
        match value {
            FieldValue::DateTime(at) => Ok(at),
            other => Err(Error::type_mismatch(field, "date-time", other.kind())),
        }
    }
}

impl<T: IntoFieldValue> IntoFieldValue for Vec<T> {
    fn into_field_value(self) -> FieldValue {
        FieldValue::Array(self.into_iter().map(IntoFieldValue::into_field_value).collect())
    }
}

impl<T: FromFieldValue> FromFieldValue for Vec<T> {
    fn from_field_value(value: FieldValue, field: &str) -> Result<Self> {
        match value {
            FieldValue::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| T::from_field_value(item, &format!("{}[{}]", field, i)))
                .collect(),
            other => Err(Error::type_mismatch(field, "array", other.kind())),
        }
    }
}
