//! Single Sign-On API Models
//!
//! Typed request and response records of the Single Sign-On API, each
//! described by a field map in a process-wide [`SchemaRegistry`]. Encoding
//! and decoding go through the generic [`Codec`] from `sso-codec`.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use sso_models::{RequestAuditRead, RequestAuditReadSeek};
//!
//! let request = RequestAuditRead::new(RequestAuditReadSeek::new(20).with_id(5))
//!     .with_subject(["alice"]);
//! let wire = sso_models::to_value(&request)?;
//! assert_eq!(wire, json!({"seek": {"id": 5, "limit": 20}, "subject": ["alice"]}));
//!
//! let decoded: RequestAuditRead = sso_models::from_value(&wire)?;
//! assert_eq!(decoded, request);
//! # Ok::<(), sso_models::Error>(())
//! ```

pub mod models;

use log::debug;
use once_cell::sync::Lazy;
use serde_json::Value as JsonValue;

pub use crate::models::{
    RequestAuditRead, RequestAuditReadSeek, ResponseAccessMany, ResponseAccessManyData,
    ResponseOpenidConfiguration,
};
pub use sso_codec::{Codec, CodecOptions, Error, Model, Result, SchemaRegistry};

static REGISTRY: Lazy<SchemaRegistry> = Lazy::new(|| {
    let registry = builtin_registry().expect("built-in field maps are consistent");
    debug!("registered {} SSO record types", registry.len());
    registry
});

/// Build a fresh registry holding the field maps of every record in this crate.
///
/// Use this to extend the built-in types with additional ones through
/// [`SchemaRegistry::into_builder`].
pub fn builtin_registry() -> Result<SchemaRegistry> {
    SchemaRegistry::builder()
        .register::<RequestAuditRead>()
        .register::<RequestAuditReadSeek>()
        .register::<ResponseAccessMany>()
        .register::<ResponseAccessManyData>()
        .register::<ResponseOpenidConfiguration>()
        .build()
}

/// The process-wide registry of built-in record types
pub fn registry() -> &'static SchemaRegistry {
    &REGISTRY
}

/// A codec with default options over the built-in registry
pub fn codec() -> Codec<'static> {
    Codec::new(registry())
}

/// Encode a record into its wire JSON value
pub fn to_value<M: Model + Clone>(model: &M) -> Result<JsonValue> {
    codec().encode_model(model)
}

/// Decode a record from its wire JSON value
pub fn from_value<M: Model>(value: &JsonValue) -> Result<M> {
    codec().decode_model(value)
}

/// Encode a record into a JSON string
pub fn to_string<M: Model + Clone>(model: &M) -> Result<String> {
    Ok(serde_json::to_string(&to_value(model)?)?)
}

/// Decode a record from a JSON string
pub fn from_str<M: Model>(s: &str) -> Result<M> {
    from_value(&serde_json::from_str(s)?)
}

// Lets transports hand records straight to serde-based clients.
macro_rules! impl_serde_via_codec {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl serde::Serialize for $ty {
                fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
                where
                    S: serde::Serializer,
                {
                    use serde::ser::Error as _;
                    let value = to_value(self).map_err(S::Error::custom)?;
                    serde::Serialize::serialize(&value, serializer)
                }
            }

            impl<'de> serde::Deserialize<'de> for $ty {
                fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
                where
                    D: serde::Deserializer<'de>,
                {
                    use serde::de::Error as _;
                    let value = <JsonValue as serde::Deserialize>::deserialize(deserializer)?;
                    from_value(&value).map_err(D::Error::custom)
                }
            }
        )+
    };
}

impl_serde_via_codec!(
    RequestAuditRead,
    RequestAuditReadSeek,
    ResponseAccessMany,
    ResponseAccessManyData,
    ResponseOpenidConfiguration,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_types() {
        let names: Vec<_> = registry().type_names().collect();
        assert_eq!(
            names,
            vec![
                "RequestAuditRead",
                "RequestAuditReadSeek",
                "ResponseAccessMany",
                "ResponseAccessManyData",
                "ResponseOpenidConfiguration",
            ]
        );
    }

    #[test]
    fn test_field_map_lookup() {
        let map = registry().field_map("ResponseAccessManyData").unwrap();
        let spec = map.by_wire_name("static").unwrap();
        assert_eq!(spec.logical_name, "isStatic");
        assert!(spec.required);
        assert!(matches!(
            registry().field_map("ResponseUser"),
            Err(Error::UnknownType(_))
        ));
    }

    #[test]
    fn test_serde_goes_through_codec() {
        let seek: RequestAuditReadSeek =
            serde_json::from_str(r#"{"limit": 3, "cursor": 1}"#).unwrap();
        assert_eq!(seek, RequestAuditReadSeek::new(3));
        assert_eq!(serde_json::to_string(&seek).unwrap(), r#"{"limit":3}"#);

        let err = serde_json::from_str::<RequestAuditReadSeek>(r#"{"id": 3}"#).unwrap_err();
        assert!(err.to_string().contains("missing required field 'limit'"));
    }

    #[test]
    fn test_records_are_thread_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SchemaRegistry>();
        assert_send_sync::<Codec<'static>>();
        assert_send_sync::<RequestAuditRead>();
        assert_send_sync::<ResponseAccessMany>();
    }
}
