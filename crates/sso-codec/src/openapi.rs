//! Field maps derived from OpenAPI documents.
//!
//! Every object schema under `components.schemas` becomes one registered
//! type. Property names are the wire names; logical names are their
//! lowerCamelCase form. Only the shapes the codec understands are mapped:
//! primitives, `date-time` strings, `$ref`s to other component schemas and
//! arrays of any of those. A `$ref` to an object schema becomes a nested
//! record; a `$ref` to a primitive or enum schema takes that schema's type.
//!
//! # Examples
//!
//! ```no_run
//! use sso_codec::openapi::load_openapi;
//!
//! # #[tokio::main]
//! # async fn main() -> sso_codec::Result<()> {
//! let registry = load_openapi("sso.openapi.yaml").await?;
//! for name in registry.type_names() {
//!     println!("{}", name);
//! }
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use log::debug;
use openapiv3::{
    Components, OpenAPI, ReferenceOr, Schema, SchemaKind, StringFormat, Type,
    VariantOrUnknownOrEmpty,
};
use tokio::fs;

use crate::registry::{RegistryBuilder, SchemaRegistry};
use crate::schema::{FieldMap, FieldSpec, FieldType};
use crate::utils::to_lower_camel_case;
use crate::{Error, Result};

const COMPONENT_PREFIX: &str = "#/components/schemas/";
const MAX_REFERENCE_DEPTH: usize = 16;

impl SchemaRegistry {
    /// Build a registry from the component schemas of an OpenAPI document
    pub fn from_openapi(doc: &OpenAPI) -> Result<Self> {
        RegistryBuilder::default().add_openapi(doc)?.build()
    }
}

impl RegistryBuilder {
    /// Register a field map for every object schema in `doc`
    pub fn add_openapi(mut self, doc: &OpenAPI) -> Result<Self> {
        let Some(components) = &doc.components else {
            return Ok(self);
        };

        for (name, schema) in &components.schemas {
            let schema = match schema {
                ReferenceOr::Item(schema) => schema,
                ReferenceOr::Reference { reference } => {
                    debug!("skipping schema alias {} -> {}", name, reference);
                    continue;
                }
            };
            let SchemaKind::Type(Type::Object(object)) = &schema.schema_kind else {
                debug!("skipping non-object schema {}", name);
                continue;
            };

            let fields = object
                .properties
                .iter()
                .map(|(wire_name, property)| -> Result<FieldSpec> {
                    let field_type = property_type(property, components, 0)
                        .map_err(|e| Error::openapi(format!("{}.{}: {}", name, wire_name, e)))?;
                    Ok(FieldSpec {
                        logical_name: to_lower_camel_case(wire_name),
                        wire_name: wire_name.clone(),
                        field_type,
                        required: object.required.contains(wire_name),
                    })
                })
                .collect::<Result<FieldMap>>()?;

            self = self.register_field_map(name.clone(), fields);
        }
        Ok(self)
    }
}

/// Parse an OpenAPI document from JSON or YAML text
pub fn parse_openapi(content: &str) -> Result<OpenAPI> {
    // Try to parse as JSON first
    if let Ok(doc) = serde_json::from_str(content) {
        return Ok(doc);
    }
    Ok(serde_yaml::from_str(content)?)
}

/// Load an OpenAPI document from disk and build a registry from it
pub async fn load_openapi<P: AsRef<Path>>(path: P) -> Result<SchemaRegistry> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).await?;
    let doc = parse_openapi(&content).map_err(|e| {
        Error::openapi(format!(
            "Failed to parse OpenAPI document at {}: {}",
            path.display(),
            e
        ))
    })?;
    debug!("deriving field maps from {}", path.display());
    SchemaRegistry::from_openapi(&doc)
}

fn property_type(
    property: &ReferenceOr<Box<Schema>>,
    components: &Components,
    depth: usize,
) -> std::result::Result<FieldType, String> {
    match property {
        ReferenceOr::Reference { reference } => reference_type(reference, components, depth),
        ReferenceOr::Item(schema) => schema_type(schema, components, depth),
    }
}

fn reference_type(
    reference: &str,
    components: &Components,
    depth: usize,
) -> std::result::Result<FieldType, String> {
    if depth > MAX_REFERENCE_DEPTH {
        return Err(format!("reference chain through '{}' is too deep", reference));
    }
    let name = reference
        .strip_prefix(COMPONENT_PREFIX)
        .ok_or_else(|| format!("unsupported reference '{}'", reference))?;
    match components.schemas.get(name) {
        None => Err(format!("unknown reference '{}'", reference)),
        Some(ReferenceOr::Reference { reference: target }) => {
            reference_type(target, components, depth + 1)
        }
        Some(ReferenceOr::Item(schema)) => match &schema.schema_kind {
            SchemaKind::Type(Type::Object(_)) => Ok(FieldType::record(name)),
            _ => schema_type(schema, components, depth + 1),
        },
    }
}

fn schema_type(
    schema: &Schema,
    components: &Components,
    depth: usize,
) -> std::result::Result<FieldType, String> {
    match &schema.schema_kind {
        // Enumerations carry no extra wire shape; they stay plain strings.
        SchemaKind::Type(Type::String(string)) => match &string.format {
            VariantOrUnknownOrEmpty::Item(StringFormat::DateTime) => Ok(FieldType::DateTime),
            _ => Ok(FieldType::String),
        },
        SchemaKind::Type(Type::Integer(_)) => Ok(FieldType::Integer),
        SchemaKind::Type(Type::Number(_)) => Ok(FieldType::Number),
        SchemaKind::Type(Type::Boolean(_)) => Ok(FieldType::Boolean),
        SchemaKind::Type(Type::Array(array)) => {
            let items = array
                .items
                .as_ref()
                .ok_or_else(|| "array without items".to_string())?;
            Ok(FieldType::array(property_type(items, components, depth)?))
        }
        SchemaKind::Type(Type::Object(_)) => Err("inline object schemas are not supported".into()),
        _ => Err("composed schemas are not supported".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const DOC: &str = r##"
openapi: 3.0.0
info:
  title: Single Sign-On API
  version: v2
paths: {}
components:
  schemas:
    Seek:
      type: object
      required: [limit]
      properties:
        id:
          type: integer
          format: int64
        limit:
          type: integer
    Query:
      type: object
      required: [seek]
      properties:
        audit_type:
          type: array
          items:
            type: string
        seek:
          $ref: "#/components/schemas/Seek"
        created_at:
          type: string
          format: date-time
    Token:
      type: string
    AuditType:
      type: string
      enum: [login, logout]
    AuditTypes:
      type: array
      items:
        $ref: "#/components/schemas/AuditType"
    Page:
      $ref: "#/components/schemas/Seek"
    Event:
      type: object
      required: [kind]
      properties:
        kind:
          $ref: "#/components/schemas/AuditType"
        kinds:
          $ref: "#/components/schemas/AuditTypes"
        page:
          $ref: "#/components/schemas/Page"
"##;

    #[test]
    fn test_from_openapi() -> Result<()> {
        let doc = parse_openapi(DOC)?;
        let registry = SchemaRegistry::from_openapi(&doc)?;
        assert_eq!(
            registry.type_names().collect::<Vec<_>>(),
            vec!["Event", "Query", "Seek"]
        );

        let query = registry.field_map("Query")?;
        assert_eq!(
            query.by_wire_name("audit_type"),
            Some(&FieldSpec::optional(
                "auditType",
                "audit_type",
                FieldType::array(FieldType::String)
            ))
        );
        assert_eq!(
            query.by_wire_name("seek"),
            Some(&FieldSpec::required("seek", "seek", FieldType::record("Seek")))
        );
        assert_eq!(
            query.by_logical_name("createdAt").map(|f| &f.field_type),
            Some(&FieldType::DateTime)
        );
        Ok(())
    }

    #[test]
    fn test_references_to_non_object_schemas() -> Result<()> {
        let registry = SchemaRegistry::from_openapi(&parse_openapi(DOC)?)?;
        let event = registry.field_map("Event")?;

        assert_eq!(
            event.by_wire_name("kind"),
            Some(&FieldSpec::required("kind", "kind", FieldType::String))
        );
        assert_eq!(
            event.by_wire_name("kinds").map(|f| &f.field_type),
            Some(&FieldType::array(FieldType::String))
        );
        assert_eq!(
            event.by_wire_name("page").map(|f| &f.field_type),
            Some(&FieldType::record("Seek"))
        );
        assert!(!registry.contains("AuditType"));
        Ok(())
    }

    #[test]
    fn test_dangling_reference() {
        let doc = DOC.replace(
            "$ref: \"#/components/schemas/AuditType\"\n        kinds",
            "$ref: \"#/components/schemas/Missing\"\n        kinds",
        );
        let doc = parse_openapi(&doc).unwrap();
        let err = SchemaRegistry::from_openapi(&doc).unwrap_err();
        assert!(matches!(err, Error::OpenApi(ref msg) if msg.starts_with("Event.kind")));
    }

    #[test]
    fn test_unsupported_property() {
        let doc = DOC.replace("type: string\n          format: date-time", "type: object");
        let doc = parse_openapi(&doc).unwrap();
        let err = SchemaRegistry::from_openapi(&doc).unwrap_err();
        assert!(matches!(err, Error::OpenApi(ref msg) if msg.starts_with("Query.created_at")));
    }

    #[tokio::test]
    async fn test_load_openapi_json() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("openapi.json");
        let doc = parse_openapi(DOC)?;
        tokio::fs::write(&path, serde_json::to_string_pretty(&doc)?).await?;

        let registry = load_openapi(&path).await?;
        assert!(registry.contains("Seek"));
        assert!(registry.field_map("Seek")?.by_wire_name("limit").unwrap().required);
        Ok(())
    }
}
