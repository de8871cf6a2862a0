//! Cursor position for audit log reads

use sso_codec::{
    model_from_value, model_into_value, FieldMap, FieldSpec, FieldType, FieldValue,
    FromFieldValue, IntoFieldValue, Model, Record, Result,
};

/// Seek position: an optional last-seen audit id and a required page size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestAuditReadSeek {
    pub id: Option<i64>,
    pub limit: i64,
}

impl RequestAuditReadSeek {
    pub fn new(limit: i64) -> Self {
        Self { id: None, limit }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

impl Model for RequestAuditReadSeek {
    const TYPE_NAME: &'static str = "RequestAuditReadSeek";

    fn field_map() -> FieldMap {
        FieldMap::new(vec![
            FieldSpec::optional("id", "id", FieldType::Integer),
            FieldSpec::required("limit", "limit", FieldType::Integer),
        ])
    }

    fn into_record(self) -> Record {
        let mut record = Record::new(Self::TYPE_NAME);
        record.insert_opt("id", self.id);
        record.insert("limit", self.limit);
        record
    }

    fn from_record(mut record: Record) -> Result<Self> {
        Ok(Self {
            id: record.take_optional("id")?,
            limit: record.take_required("limit")?,
        })
    }
}

impl IntoFieldValue for RequestAuditReadSeek {
    fn into_field_value(self) -> FieldValue {
        model_into_value(self)
    }
}

impl FromFieldValue for RequestAuditReadSeek {
    fn from_field_value(value: FieldValue, field: &str) -> Result<Self> {
        model_from_value(value, field)
    }
}
