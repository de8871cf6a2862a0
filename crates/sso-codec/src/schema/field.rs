//! Field maps: the per-type metadata tables driving the codec

use serde::{Deserialize, Serialize};

use super::FieldType;

/// One entry of a field map.
///
/// Serialized in the same shape as the generator's attribute tables
/// (`name`, `baseName`, `type`), plus an explicit `required` flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Property name used in memory
    #[serde(rename = "name")]
    pub logical_name: String,
    /// Key used on the wire
    #[serde(rename = "baseName")]
    pub wire_name: String,
    /// Declared type of the value
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Whether the field must be present
    #[serde(default)]
    pub required: bool,
}

impl FieldSpec {
    /// Create a required field entry
    pub fn required(
        logical_name: impl Into<String>,
        wire_name: impl Into<String>,
        field_type: FieldType,
    ) -> Self {
        Self {
            logical_name: logical_name.into(),
            wire_name: wire_name.into(),
            field_type,
            required: true,
        }
    }

    /// Create an optional field entry
    pub fn optional(
        logical_name: impl Into<String>,
        wire_name: impl Into<String>,
        field_type: FieldType,
    ) -> Self {
        Self {
            required: false,
            ..Self::required(logical_name, wire_name, field_type)
        }
    }
}

/// Ordered field metadata for one record type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMap {
    fields: Vec<FieldSpec>,
}

impl FieldMap {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldSpec> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Look up an entry by its in-memory name
    pub fn by_logical_name(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.logical_name == name)
    }

    /// Look up an entry by its wire key
    pub fn by_wire_name(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.wire_name == name)
    }

    /// Wire keys declared by this map, in declaration order
    pub fn wire_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.wire_name.as_str())
    }
}

impl From<Vec<FieldSpec>> for FieldMap {
    fn from(fields: Vec<FieldSpec>) -> Self {
        Self::new(fields)
    }
}

impl FromIterator<FieldSpec> for FieldMap {
    fn from_iter<I: IntoIterator<Item = FieldSpec>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a FieldMap {
    type Item = &'a FieldSpec;
    type IntoIter = std::slice::Iter<'a, FieldSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
