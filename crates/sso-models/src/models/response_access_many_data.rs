//! Access grant of a user to a client

use chrono::{DateTime, Utc};
use sso_codec::{
    model_from_value, model_into_value, FieldMap, FieldSpec, FieldType, FieldValue,
    FromFieldValue, IntoFieldValue, Model, Record, Result,
};

/// One user's access to one client, with its granted scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseAccessManyData {
    pub client_id: String,
    pub created_at: DateTime<Utc>,
    pub enable: bool,
    pub scope: String,
    /// Sent as `static` on the wire
    pub is_static: bool,
    pub updated_at: DateTime<Utc>,
    pub user_id: String,
}

impl Model for ResponseAccessManyData {
    const TYPE_NAME: &'static str = "ResponseAccessManyData";

    fn field_map() -> FieldMap {
        FieldMap::new(vec![
            FieldSpec::required("clientId", "client_id", FieldType::String),
            FieldSpec::required("createdAt", "created_at", FieldType::DateTime),
            FieldSpec::required("enable", "enable", FieldType::Boolean),
            FieldSpec::required("scope", "scope", FieldType::String),
            FieldSpec::required("isStatic", "static", FieldType::Boolean),
            FieldSpec::required("updatedAt", "updated_at", FieldType::DateTime),
            FieldSpec::required("userId", "user_id", FieldType::String),
        ])
    }

    fn into_record(self) -> Record {
        Record::new(Self::TYPE_NAME)
            .with("clientId", self.client_id)
            .with("createdAt", self.created_at)
            .with("enable", self.enable)
            .with("scope", self.scope)
            .with("isStatic", self.is_static)
            .with("updatedAt", self.updated_at)
            .with("userId", self.user_id)
    }

    fn from_record(mut record: Record) -> Result<Self> {
        Ok(Self {
            client_id: record.take_required("clientId")?,
            created_at: record.take_required("createdAt")?,
            enable: record.take_required("enable")?,
            scope: record.take_required("scope")?,
            is_static: record.take_required("isStatic")?,
            updated_at: record.take_required("updatedAt")?,
            user_id: record.take_required("userId")?,
        })
    }
}

impl IntoFieldValue for ResponseAccessManyData {
    fn into_field_value(self) -> FieldValue {
        model_into_value(self)
    }
}

impl FromFieldValue for ResponseAccessManyData {
    fn from_field_value(value: FieldValue, field: &str) -> Result<Self> {
        model_from_value(value, field)
    }
}
