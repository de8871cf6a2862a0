//! Audit log read request

use sso_codec::{FieldMap, FieldSpec, FieldType, Model, Record, Result};

use super::RequestAuditReadSeek;

/// Filters and seek position for reading audit log entries.
///
/// Every filter is optional; an unset filter is left off the wire entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestAuditRead {
    pub audit_type: Option<Vec<String>>,
    pub id: Option<Vec<i64>>,
    pub seek: RequestAuditReadSeek,
    pub subject: Option<Vec<String>>,
    pub user_id: Option<Vec<String>>,
}

impl RequestAuditRead {
    pub fn new(seek: RequestAuditReadSeek) -> Self {
        Self {
            audit_type: None,
            id: None,
            seek,
            subject: None,
            user_id: None,
        }
    }

    pub fn with_audit_type<I, S>(mut self, audit_type: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.audit_type = Some(audit_type.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_id(mut self, id: impl IntoIterator<Item = i64>) -> Self {
        self.id = Some(id.into_iter().collect());
        self
    }

    pub fn with_subject<I, S>(mut self, subject: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subject = Some(subject.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_user_id<I, S>(mut self, user_id: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.user_id = Some(user_id.into_iter().map(Into::into).collect());
        self
    }
}

impl Model for RequestAuditRead {
    const TYPE_NAME: &'static str = "RequestAuditRead";

    fn field_map() -> FieldMap {
        FieldMap::new(vec![
            FieldSpec::optional("auditType", "audit_type", FieldType::array(FieldType::String)),
            FieldSpec::optional("id", "id", FieldType::array(FieldType::Integer)),
            FieldSpec::required(
                "seek",
                "seek",
                FieldType::record(RequestAuditReadSeek::TYPE_NAME),
            ),
            FieldSpec::optional("subject", "subject", FieldType::array(FieldType::String)),
            FieldSpec::optional("userId", "user_id", FieldType::array(FieldType::String)),
        ])
    }

    fn into_record(self) -> Record {
        let mut record = Record::new(Self::TYPE_NAME);
        record.insert_opt("auditType", self.audit_type);
        record.insert_opt("id", self.id);
        record.insert("seek", self.seek);
        record.insert_opt("subject", self.subject);
        record.insert_opt("userId", self.user_id);
        record
    }

    fn from_record(mut record: Record) -> Result<Self> {
        Ok(Self {
            audit_type: record.take_optional("auditType")?,
            id: record.take_optional("id")?,
            seek: record.take_required("seek")?,
            subject: record.take_optional("subject")?,
            user_id: record.take_optional("userId")?,
        })
    }
}
