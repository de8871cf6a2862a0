//! Metadata-driven encode and decode.
//!
//! [`Codec`] walks a type's field map to translate between a [`Record`] keyed
//! by logical name and a JSON object keyed by wire name. Nothing in here is
//! specific to any record type: nested records and sequences recurse through
//! the same two routines, and every coercion is decided by the declared
//! [`FieldType`].
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use sso_codec::{Codec, FieldMap, FieldSpec, FieldType, SchemaRegistry};
//!
//! let registry = SchemaRegistry::builder()
//!     .register_field_map(
//!         "Grant",
//!         FieldMap::new(vec![
//!             FieldSpec::required("clientId", "client_id", FieldType::String),
//!             FieldSpec::required("isStatic", "static", FieldType::Boolean),
//!         ]),
//!     )
//!     .build()?;
//! let codec = Codec::new(&registry);
//!
//! let record = codec.decode_value(&json!({"client_id": "c1", "static": true}), "Grant")?;
//! assert!(record.contains("isStatic"));
//! assert_eq!(
//!     serde_json::Value::Object(codec.encode(&record)?),
//!     json!({"client_id": "c1", "static": true})
//! );
//! # Ok::<(), sso_codec::Error>(())
//! ```

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use log::trace;
use serde_json::Value as JsonValue;

use crate::config::CodecOptions;
use crate::model::Model;
use crate::registry::SchemaRegistry;
use crate::schema::{FieldMap, FieldType};
use crate::value::{FieldValue, Record};
use crate::{Error, Result};

/// A JSON object as exchanged on the wire
pub type JsonMap = serde_json::Map<String, JsonValue>;

/// Stateless translator between records and wire objects
#[derive(Debug, Clone)]
pub struct Codec<'r> {
    registry: &'r SchemaRegistry,
    options: CodecOptions,
}

impl<'r> Codec<'r> {
    /// Create a codec with default options over `registry`
    pub fn new(registry: &'r SchemaRegistry) -> Self {
        Self {
            registry,
            options: CodecOptions::default(),
        }
    }

    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    pub fn registry(&self) -> &'r SchemaRegistry {
        self.registry
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    /// Field map for `type_name`
    pub fn field_map(&self, type_name: &str) -> Result<&'r FieldMap> {
        self.registry.field_map(type_name)
    }

    /// Encode a record into a wire object
    pub fn encode(&self, record: &Record) -> Result<JsonMap> {
        self.encode_record(record, "")
    }

    /// Encode a typed model into a wire value
    pub fn encode_model<M: Model + Clone>(&self, model: &M) -> Result<JsonValue> {
        self.check_model::<M>()?;
        self.encode(&model.clone().into_record())
            .map(JsonValue::Object)
    }

    /// Decode a wire object into a record of `type_name`
    pub fn decode(&self, wire: &JsonMap, type_name: &str) -> Result<Record> {
        self.decode_record(wire, type_name, "")
    }

    /// Decode any JSON value, which must be an object, into a record of `type_name`
    pub fn decode_value(&self, wire: &JsonValue, type_name: &str) -> Result<Record> {
        match wire {
            JsonValue::Object(map) => self.decode(map, type_name),
            other => Err(Error::type_mismatch(type_name, "object", json_kind(other))),
        }
    }

    /// Decode a wire value into a typed model
    ///
    /// The registry's field map for `M` must be the one `M` declares. A
    /// decoded record that still fails to bind (a nested type registered with
    /// a different map) is reported as a schema error, not as bad input.
    pub fn decode_model<M: Model>(&self, wire: &JsonValue) -> Result<M> {
        self.check_model::<M>()?;
        let record = self.decode_value(wire, M::TYPE_NAME)?;
        M::from_record(record).map_err(|e| {
            Error::schema(format!(
                "registry map for {} does not bind to the model: {}",
                M::TYPE_NAME,
                e
            ))
        })
    }

    fn check_model<M: Model>(&self) -> Result<()> {
        if self.registry.field_map(M::TYPE_NAME)? != &M::field_map() {
            return Err(Error::schema(format!(
                "registry map for {} does not match model",
                M::TYPE_NAME
            )));
        }
        Ok(())
    }

    fn encode_record(&self, record: &Record, prefix: &str) -> Result<JsonMap> {
        let map = self.registry.field_map(record.type_name())?;

        for (name, _) in record.iter() {
            if map.by_logical_name(name).is_none() {
                if self.options.deny_unknown_fields {
                    return Err(Error::UnknownField {
                        type_name: record.type_name().to_string(),
                        field: join(prefix, name),
                    });
                }
                trace!("{}: skipping undeclared property {}", record.type_name(), name);
            }
        }

        let mut out = JsonMap::new();
        for spec in map {
            let path = join(prefix, &spec.wire_name);
            match record.get(&spec.logical_name) {
                Some(value) => {
                    let encoded = self.encode_field(&spec.field_type, value, &path)?;
                    out.insert(spec.wire_name.clone(), encoded);
                }
                None if spec.required => return Err(Error::MissingRequiredField(path)),
                None => trace!("omitting unset optional field {}", path),
            }
        }
        Ok(out)
    }

    fn encode_field(&self, ty: &FieldType, value: &FieldValue, path: &str) -> Result<JsonValue> {
        let encoded = match (ty, value) {
            (FieldType::String, FieldValue::String(s)) => JsonValue::String(s.clone()),
            (FieldType::Integer, FieldValue::Integer(n)) => JsonValue::from(*n),
            (FieldType::Number, FieldValue::Integer(n)) => JsonValue::from(*n),
            (FieldType::Number, FieldValue::Number(n)) => serde_json::Number::from_f64(*n)
                .map(JsonValue::Number)
                .ok_or_else(|| Error::type_mismatch(path, ty, "non-finite number"))?,
            (FieldType::Boolean, FieldValue::Boolean(b)) => JsonValue::Bool(*b),
            (FieldType::DateTime, FieldValue::DateTime(at)) => JsonValue::String(
                at.to_rfc3339_opts(self.options.timestamp_precision.seconds_format(), true),
            ),
            (FieldType::Array(element), FieldValue::Array(items)) => JsonValue::Array(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| self.encode_field(element, item, &index(path, i)))
                    .collect::<Result<Vec<_>>>()?,
            ),
            (FieldType::Record(name), FieldValue::Record(record)) => {
                if record.type_name() != name {
                    return Err(Error::type_mismatch(path, ty, record.type_name()));
                }
                JsonValue::Object(self.encode_record(record, path)?)
            }
            (expected, actual) => {
                return Err(Error::type_mismatch(path, expected, actual.kind()));
            }
        };
        Ok(encoded)
    }

    fn decode_record(&self, wire: &JsonMap, type_name: &str, prefix: &str) -> Result<Record> {
        let map = self.registry.field_map(type_name)?;

        for key in wire.keys() {
            if map.by_wire_name(key).is_none() {
                if self.options.deny_unknown_fields {
                    return Err(Error::UnknownField {
                        type_name: type_name.to_string(),
                        field: join(prefix, key),
                    });
                }
                trace!("{}: ignoring unknown wire key {}", type_name, key);
            }
        }

        let mut record = Record::new(type_name);
        for spec in map {
            let path = join(prefix, &spec.wire_name);
            let value = match wire.get(&spec.wire_name) {
                Some(JsonValue::Null) if self.options.null_as_absent => None,
                other => other,
            };
            match value {
                Some(value) => {
                    let decoded = self.decode_field(&spec.field_type, value, &path)?;
                    record.insert(spec.logical_name.clone(), decoded);
                }
                None if spec.required => return Err(Error::MissingRequiredField(path)),
                None => {}
            }
        }
        Ok(record)
    }

    fn decode_field(&self, ty: &FieldType, value: &JsonValue, path: &str) -> Result<FieldValue> {
        let mismatch = || Error::type_mismatch(path, ty, json_kind(value));
        match ty {
            FieldType::String => value
                .as_str()
                .map(|s| FieldValue::String(s.to_string()))
                .ok_or_else(mismatch),
            FieldType::Integer => value.as_i64().map(FieldValue::Integer).ok_or_else(mismatch),
            FieldType::Number => value.as_f64().map(FieldValue::Number).ok_or_else(mismatch),
            FieldType::Boolean => value.as_bool().map(FieldValue::Boolean).ok_or_else(mismatch),
            FieldType::DateTime => parse_timestamp(value, path).map(FieldValue::DateTime),
            FieldType::Array(element) => {
                let items = value.as_array().ok_or_else(mismatch)?;
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| self.decode_field(element, item, &index(path, i)))
                    .collect::<Result<Vec<_>>>()
                    .map(FieldValue::Array)
            }
            FieldType::Record(name) => {
                let object = value.as_object().ok_or_else(mismatch)?;
                self.decode_record(object, name, path).map(FieldValue::Record)
            }
        }
    }
}

/// Parse a wire timestamp: an RFC 3339 string, a zone-less ISO-8601 string
/// (taken as UTC), or milliseconds since the Unix epoch.
fn parse_timestamp(value: &JsonValue, path: &str) -> Result<DateTime<Utc>> {
    match value {
        JsonValue::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|at| at.with_timezone(&Utc))
            .or_else(|_| {
                NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").map(|at| at.and_utc())
            })
            .map_err(|_| {
                Error::type_mismatch(path, FieldType::DateTime, format!("string '{}'", s))
            }),
        JsonValue::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.floor() as i64))
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
            .ok_or_else(|| Error::type_mismatch(path, FieldType::DateTime, "out-of-range number")),
        other => Err(Error::type_mismatch(
            path,
            FieldType::DateTime,
            json_kind(other),
        )),
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(n) if n.is_f64() => "number",
        JsonValue::Number(n) if n.is_u64() && n.as_i64().is_none() => "out-of-range integer",
        JsonValue::Number(_) => "integer",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

fn index(path: &str, i: usize) -> String {
    format!("{}[{}]", path, i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimestampPrecision;
    use crate::schema::FieldSpec;
    use serde_json::json;

    fn registry() -> SchemaRegistry {
        SchemaRegistry::builder()
            .register_field_map(
                "Seek",
                FieldMap::new(vec![
                    FieldSpec::optional("id", "id", FieldType::Integer),
                    FieldSpec::required("limit", "limit", FieldType::Integer),
                ]),
            )
            .register_field_map(
                "Query",
                FieldMap::new(vec![
                    FieldSpec::optional("auditType", "audit_type", FieldType::array(FieldType::String)),
                    FieldSpec::required("seek", "seek", FieldType::record("Seek")),
                    FieldSpec::optional("pages", "pages", FieldType::array(FieldType::record("Seek"))),
                    FieldSpec::optional("at", "at", FieldType::DateTime),
                    FieldSpec::optional("score", "score", FieldType::Number),
                ]),
            )
            .build()
            .unwrap()
    }

    fn object(value: JsonValue) -> JsonMap {
        match value {
            JsonValue::Object(map) => map,
            _ => panic!("fixture is not an object"),
        }
    }

    #[test]
    fn test_decode_nested() -> Result<()> {
        let registry = registry();
        let codec = Codec::new(&registry);
        let record = codec.decode_value(&json!({"seek": {"id": 5, "limit": 20}}), "Query")?;

        let seek = match record.get("seek") {
            Some(FieldValue::Record(seek)) => seek,
            other => panic!("unexpected seek: {:?}", other),
        };
        assert_eq!(seek.type_name(), "Seek");
        assert_eq!(seek.get("id"), Some(&FieldValue::Integer(5)));
        assert_eq!(seek.get("limit"), Some(&FieldValue::Integer(20)));
        assert!(!record.contains("auditType"));
        Ok(())
    }

    #[test]
    fn test_roundtrip_preserves_wire_object() -> Result<()> {
        let registry = registry();
        let codec = Codec::new(&registry);
        let wire = object(json!({
            "audit_type": ["login"],
            "seek": {"limit": 10},
            "pages": [{"id": 1, "limit": 10}, {"limit": 5}],
            "at": "2024-01-01T00:00:00Z",
            "score": 0.5
        }));
        let record = codec.decode(&wire, "Query")?;
        assert_eq!(codec.encode(&record)?, wire);
        assert_eq!(codec.decode(&codec.encode(&record)?, "Query")?, record);
        Ok(())
    }

    #[test]
    fn test_missing_required_reports_path() {
        let registry = registry();
        let codec = Codec::new(&registry);

        let err = codec.decode_value(&json!({"audit_type": []}), "Query").unwrap_err();
        assert!(matches!(err, Error::MissingRequiredField(ref f) if f == "seek"), "{err}");

        let err = codec
            .decode_value(&json!({"seek": {"limit": 1}, "pages": [{"id": 2}]}), "Query")
            .unwrap_err();
        assert!(
            matches!(err, Error::MissingRequiredField(ref f) if f == "pages[0].limit"),
            "{err}"
        );
    }

    #[test]
    fn test_type_mismatch() {
        let registry = registry();
        let codec = Codec::new(&registry);
        let err = codec
            .decode_value(&json!({"seek": {"limit": "20"}}), "Query")
            .unwrap_err();
        match err {
            Error::TypeMismatch {
                field,
                expected,
                actual,
            } => {
                assert_eq!(field, "seek.limit");
                assert_eq!(expected, "integer");
                assert_eq!(actual, "string");
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = codec
            .decode_value(&json!({"seek": {"limit": 1}, "audit_type": ["a", 3]}), "Query")
            .unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { ref field, .. } if field == "audit_type[1]"));

        let err = codec
            .decode_value(&json!({"seek": {"limit": u64::MAX}}), "Query")
            .unwrap_err();
        assert!(
            matches!(err, Error::TypeMismatch { ref actual, .. } if actual == "out-of-range integer"),
            "{err}"
        );
    }

    #[test]
    fn test_unknown_keys() {
        let registry = registry();
        let wire = json!({"seek": {"limit": 1, "cursor": "x"}, "extra": true});

        let record = Codec::new(&registry).decode_value(&wire, "Query").unwrap();
        assert_eq!(record.len(), 1);

        let strict = Codec::new(&registry).with_options(CodecOptions::strict());
        let err = strict.decode_value(&wire, "Query").unwrap_err();
        assert!(matches!(err, Error::UnknownField { .. }));
    }

    #[test]
    fn test_null_handling() {
        let registry = registry();
        let wire = json!({"seek": {"limit": 1}, "audit_type": null});

        let record = Codec::new(&registry).decode_value(&wire, "Query").unwrap();
        assert!(!record.contains("auditType"));

        let err = Codec::new(&registry)
            .decode_value(&json!({"seek": null}), "Query")
            .unwrap_err();
        assert!(matches!(err, Error::MissingRequiredField(_)));

        let options = CodecOptions {
            null_as_absent: false,
            ..Default::default()
        };
        let err = Codec::new(&registry)
            .with_options(options)
            .decode_value(&wire, "Query")
            .unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { ref actual, .. } if actual == "null"));
    }

    #[test]
    fn test_timestamp_forms() -> Result<()> {
        let registry = registry();
        let codec = Codec::new(&registry);
        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        for at in [
            json!("2024-01-01T00:00:00Z"),
            json!("2024-01-01T02:00:00+02:00"),
            json!("2024-01-01T00:00:00"),
            json!(1_704_067_200_000_i64),
        ] {
            let record = codec.decode_value(&json!({"seek": {"limit": 1}, "at": at}), "Query")?;
            assert_eq!(record.get("at"), Some(&FieldValue::DateTime(expected)));
        }

        let err = codec
            .decode_value(&json!({"seek": {"limit": 1}, "at": "yesterday"}), "Query")
            .unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { ref field, .. } if field == "at"));

        // Fractional epoch milliseconds round down, also before 1970.
        let record = codec.decode_value(&json!({"seek": {"limit": 1}, "at": -1.5}), "Query")?;
        assert_eq!(
            record.get("at"),
            Some(&FieldValue::DateTime(Utc.timestamp_millis_opt(-2).unwrap()))
        );
        let record = codec.decode_value(&json!({"seek": {"limit": 1}, "at": 1.5}), "Query")?;
        assert_eq!(
            record.get("at"),
            Some(&FieldValue::DateTime(Utc.timestamp_millis_opt(1).unwrap()))
        );
        Ok(())
    }

    #[test]
    fn test_timestamp_precision() -> Result<()> {
        let registry = registry();
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let record = Record::new("Query")
            .with("seek", Record::new("Seek").with("limit", 1_i64))
            .with("at", at);

        let auto = Codec::new(&registry).encode(&record)?;
        assert_eq!(auto["at"], json!("2024-01-01T00:00:00Z"));

        let options = CodecOptions {
            timestamp_precision: TimestampPrecision::Millis,
            ..Default::default()
        };
        let millis = Codec::new(&registry).with_options(options).encode(&record)?;
        assert_eq!(millis["at"], json!("2024-01-01T00:00:00.000Z"));

        // Coarser precisions truncate; only `Auto` round-trips every instant.
        let fine = at + chrono::Duration::milliseconds(123);
        let record = record.with("at", fine);
        let seconds = CodecOptions {
            timestamp_precision: TimestampPrecision::Seconds,
            ..Default::default()
        };
        let truncated = Codec::new(&registry).with_options(seconds).encode(&record)?;
        assert_eq!(truncated["at"], json!("2024-01-01T00:00:00Z"));

        let codec = Codec::new(&registry);
        let wire = JsonValue::Object(codec.encode(&record)?);
        assert_eq!(wire["at"], json!("2024-01-01T00:00:00.123Z"));
        assert_eq!(codec.decode_value(&wire, "Query")?, record);
        Ok(())
    }

    #[test]
    fn test_encode_omits_unset_and_checks_required() {
        let registry = registry();
        let codec = Codec::new(&registry);

        let record = Record::new("Query").with("seek", Record::new("Seek").with("limit", 3_i64));
        let wire = codec.encode(&record).unwrap();
        assert_eq!(JsonValue::Object(wire), json!({"seek": {"limit": 3}}));

        let err = codec.encode(&Record::new("Query")).unwrap_err();
        assert!(matches!(err, Error::MissingRequiredField(ref f) if f == "seek"));
    }

    #[test]
    fn test_encode_rejects_wrong_kind() {
        let registry = registry();
        let codec = Codec::new(&registry);

        let record = Record::new("Query").with("seek", Record::new("Seek").with("limit", "ten"));
        let err = codec.encode(&record).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { ref field, .. } if field == "seek.limit"));

        let record = Record::new("Query").with("seek", Record::new("Query"));
        let err = codec.encode(&record).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { ref actual, .. } if actual == "Query"));
    }

    #[test]
    fn test_unknown_type() {
        let registry = registry();
        let codec = Codec::new(&registry);
        assert!(matches!(
            codec.decode_value(&json!({}), "Nope"),
            Err(Error::UnknownType(_))
        ));
        assert!(matches!(
            codec.encode(&Record::new("Nope")),
            Err(Error::UnknownType(_))
        ));
    }

    #[test]
    fn test_decode_value_requires_object() {
        let registry = registry();
        let err = Codec::new(&registry)
            .decode_value(&json!([1, 2]), "Seek")
            .unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { ref actual, .. } if actual == "array"));
    }
}
