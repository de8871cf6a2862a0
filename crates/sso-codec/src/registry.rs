//! Schema registry: type name to field map.
//!
//! The registry is assembled once through a [`RegistryBuilder`], validated as
//! a whole, and never mutated afterwards. Lookups are plain reads, so a built
//! registry can be shared freely between threads.
//!
//! # Examples
//!
//! ```
//! use sso_codec::{FieldMap, FieldSpec, FieldType, SchemaRegistry};
//!
//! let registry = SchemaRegistry::builder()
//!     .register_field_map(
//!         "Seek",
//!         FieldMap::new(vec![
//!             FieldSpec::optional("id", "id", FieldType::Integer),
//!             FieldSpec::required("limit", "limit", FieldType::Integer),
//!         ]),
//!     )
//!     .build()?;
//!
//! assert_eq!(registry.field_map("Seek")?.len(), 2);
//! assert!(registry.field_map("Other").is_err());
//! # Ok::<(), sso_codec::Error>(())
//! ```

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use log::debug;
use tokio::fs;

use crate::model::Model;
use crate::schema::FieldMap;
use crate::utils::is_identifier;
use crate::{Error, Result};

/// Read-only mapping from record type name to its field map
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    maps: BTreeMap<String, FieldMap>,
}

impl SchemaRegistry {
    /// Start assembling a registry
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Field map registered for `type_name`
    pub fn field_map(&self, type_name: &str) -> Result<&FieldMap> {
        self.maps
            .get(type_name)
            .ok_or_else(|| Error::UnknownType(type_name.to_string()))
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.maps.contains_key(type_name)
    }

    /// Registered type names, sorted
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.maps.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    /// Reopen this registry to add more types
    pub fn into_builder(self) -> RegistryBuilder {
        RegistryBuilder {
            entries: self.maps.into_iter().collect(),
        }
    }

    /// Parse a field-map document (YAML or JSON).
    ///
    /// The document maps each type name to its list of
    /// `{name, baseName, type, required}` entries.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        RegistryBuilder::default().add_document(content)?.build()
    }

    /// Load a field-map document from disk
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        debug!("loading field maps from {}", path.display());
        Self::from_yaml_str(&content).map_err(|e| match e {
            Error::Yaml(e) => Error::schema(format!(
                "Failed to parse field maps at {}: {}",
                path.display(),
                e
            )),
            other => other,
        })
    }
}

/// Collects field maps and validates them together on [`RegistryBuilder::build`]
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: Vec<(String, FieldMap)>,
}

impl RegistryBuilder {
    /// Register the field map of a typed model
    pub fn register<M: Model>(self) -> Self {
        self.register_field_map(M::TYPE_NAME, M::field_map())
    }

    /// Register a field map under an explicit type name
    pub fn register_field_map(mut self, type_name: impl Into<String>, map: FieldMap) -> Self {
        self.entries.push((type_name.into(), map));
        self
    }

    /// Register every field map in a YAML or JSON document
    pub fn add_document(mut self, content: &str) -> Result<Self> {
        let maps: BTreeMap<String, FieldMap> = serde_yaml::from_str(content)?;
        self.entries.extend(maps);
        Ok(self)
    }

    /// Validate all registered field maps and freeze them
    pub fn build(self) -> Result<SchemaRegistry> {
        let mut maps = BTreeMap::new();
        for (type_name, map) in self.entries {
            if !is_identifier(&type_name) {
                return Err(Error::schema(format!("invalid type name '{}'", type_name)));
            }
            validate_field_map(&type_name, &map)?;
            if maps.insert(type_name.clone(), map).is_some() {
                return Err(Error::schema(format!(
                    "type '{}' registered more than once",
                    type_name
                )));
            }
        }

        for map in maps.values() {
            for spec in map {
                if let Some(target) = spec.field_type.record_name() {
                    if !maps.contains_key(target) {
                        return Err(Error::UnknownType(target.to_string()));
                    }
                }
            }
        }

        debug!("schema registry built with {} types", maps.len());
        Ok(SchemaRegistry { maps })
    }
}

fn validate_field_map(type_name: &str, map: &FieldMap) -> Result<()> {
    let mut logical = HashSet::new();
    let mut wire = HashSet::new();
    for spec in map {
        if !is_identifier(&spec.logical_name) {
            return Err(Error::schema(format!(
                "{}: invalid property name '{}'",
                type_name, spec.logical_name
            )));
        }
        if spec.wire_name.is_empty() {
            return Err(Error::schema(format!(
                "{}.{}: empty wire name",
                type_name, spec.logical_name
            )));
        }
        if !logical.insert(spec.logical_name.as_str()) {
            return Err(Error::schema(format!(
                "{}: duplicate property '{}'",
                type_name, spec.logical_name
            )));
        }
        if !wire.insert(spec.wire_name.as_str()) {
            return Err(Error::schema(format!(
                "{}: duplicate wire name '{}'",
                type_name, spec.wire_name
            )));
        }
    }
    Ok(())
}
