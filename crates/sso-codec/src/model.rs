//! Typed record models

use crate::schema::FieldMap;
use crate::value::{FieldValue, Record};
use crate::{Error, Result};

/// A typed record with a static field map.
///
/// Implementations bind struct fields to logical names only; wire names and
/// type coercion stay in the field map and the codec.
pub trait Model: Sized {
    /// Name the field map is registered under
    const TYPE_NAME: &'static str;

    /// Field metadata for this type
    fn field_map() -> FieldMap;

    /// Convert into a dynamic record keyed by logical name
    fn into_record(self) -> Record;

    /// Build from a dynamic record keyed by logical name
    fn from_record(record: Record) -> Result<Self>;
}

/// Wrap a model as a nested record value
pub fn model_into_value<M: Model>(model: M) -> FieldValue {
    FieldValue::Record(model.into_record())
}

/// Unwrap a nested record value into a model
pub fn model_from_value<M: Model>(value: FieldValue, field: &str) -> Result<M> {
    match value {
        FieldValue::Record(record) if record.type_name() == M::TYPE_NAME => M::from_record(record),
        FieldValue::Record(record) => Err(Error::type_mismatch(
            field,
            M::TYPE_NAME,
            record.type_name(),
        )),
        other => Err(Error::type_mismatch(field, M::TYPE_NAME, other.kind())),
    }
}
