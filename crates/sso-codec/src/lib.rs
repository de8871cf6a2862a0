//! SSO Codec Library
//!
//! This library provides the schema registry and the generic,
//! metadata-driven codec used by the Single Sign-On API records. Record
//! types are described once by a field map (logical name, wire name,
//! declared type, required flag); encoding and decoding are driven purely by
//! that metadata.

pub mod codec;
pub mod config;
pub mod error;
pub mod model;
pub mod openapi;
pub mod registry;
pub mod schema;
pub mod utils;
pub mod value;

pub use crate::{
    codec::{Codec, JsonMap},
    config::{CodecOptions, TimestampPrecision},
    error::{Error, Result},
    model::{model_from_value, model_into_value, Model},
    registry::{RegistryBuilder, SchemaRegistry},
    schema::{FieldMap, FieldSpec, FieldType},
    value::{FieldValue, FromFieldValue, IntoFieldValue, Record},
};
