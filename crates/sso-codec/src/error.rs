//! Error handling for the SSO record codec.
//!
//! This module defines the main error type `Error` used by the registry, the
//! codec and the loaders, along with a convenient `Result` type alias. Codec
//! failures are deterministic functions of the input and the schema, so none
//! of them is worth retrying.
//!
//! # Examples
//!
//! ```
//! use sso_codec::error::{Error, Result};
//!
//! fn lookup(name: &str) -> Result<()> {
//!     Err(Error::UnknownType(name.to_string()))
//! }
//!
//! assert!(matches!(lookup("Nope"), Err(Error::UnknownType(_))));
//! ```

use thiserror::Error;

/// Result type for codec operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for registry, codec and loader operations
#[derive(Debug, Error)]
pub enum Error {
    /// No field map is registered under this type name
    #[error("unknown record type '{0}'")]
    UnknownType(String),

    /// A required field is absent on encode or decode
    #[error("missing required field '{0}'")]
    MissingRequiredField(String),

    /// A present value cannot be coerced to its declared type
    #[error("type mismatch for field '{field}': expected {expected}, found {actual}")]
    TypeMismatch {
        field: String,
        expected: String,
        actual: String,
    },

    /// A wire key that the field map does not declare (strict decoding only)
    #[error("unknown field '{field}' for record type '{type_name}'")]
    UnknownField { type_name: String, field: String },

    /// Invalid field map or registry definition
    #[error("Schema error: {0}")]
    Schema(String),

    /// Invalid codec options
    #[error("Configuration error: {0}")]
    Config(String),

    /// OpenAPI document that cannot be turned into field maps
    #[error("OpenAPI error: {0}")]
    OpenApi(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create a new schema error
    pub fn schema<S: Into<String>>(msg: S) -> Self {
        Self::Schema(msg.into())
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new OpenAPI error
    pub fn openapi<S: Into<String>>(msg: S) -> Self {
        Self::OpenApi(msg.into())
    }

    /// Create a new type mismatch error
    pub fn type_mismatch(
        field: impl Into<String>,
        expected: impl ToString,
        actual: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected: expected.to_string(),
            actual: actual.into(),
        }
    }

    /// Whether this error describes invalid input rather than a programming error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingRequiredField(_) | Self::TypeMismatch { .. } | Self::UnknownField { .. }
        )
    }
}
