//! List of access grants

use sso_codec::{FieldMap, FieldSpec, FieldType, Model, Record, Result};

use super::ResponseAccessManyData;

/// List envelope around access grants
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseAccessMany {
    pub data: Vec<ResponseAccessManyData>,
}

impl ResponseAccessMany {
    pub fn new(data: Vec<ResponseAccessManyData>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResponseAccessManyData> {
        self.data.iter()
    }
}

impl IntoIterator for ResponseAccessMany {
    type Item = ResponseAccessManyData;
    type IntoIter = std::vec::IntoIter<ResponseAccessManyData>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResponseAccessMany {
    type Item = &'a ResponseAccessManyData;
    type IntoIter = std::slice::Iter<'a, ResponseAccessManyData>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl Model for ResponseAccessMany {
    const TYPE_NAME: &'static str = "ResponseAccessMany";

    fn field_map() -> FieldMap {
        FieldMap::new(vec![FieldSpec::required(
            "data",
            "data",
            FieldType::array(FieldType::record(ResponseAccessManyData::TYPE_NAME)),
        )])
    }

    fn into_record(self) -> Record {
        Record::new(Self::TYPE_NAME).with("data", self.data)
    }

    fn from_record(mut record: Record) -> Result<Self> {
        Ok(Self {
            data: record.take_required("data")?,
        })
    }
}
