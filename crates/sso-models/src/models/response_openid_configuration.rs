//! OpenID Connect discovery document

use sso_codec::{FieldMap, FieldSpec, FieldType, Model, Record, Result};
use url::Url;

/// Identity provider endpoints and supported client authentication methods,
/// as served from `/.well-known/openid-configuration`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseOpenidConfiguration {
    pub authorization_endpoint: String,
    pub issuer: String,
    pub token_endpoint: String,
    pub token_endpoint_auth_methods_supported: Vec<String>,
}

impl ResponseOpenidConfiguration {
    pub fn authorization_url(&self) -> std::result::Result<Url, url::ParseError> {
        Url::parse(&self.authorization_endpoint)
    }

    pub fn issuer_url(&self) -> std::result::Result<Url, url::ParseError> {
        Url::parse(&self.issuer)
    }

    pub fn token_url(&self) -> std::result::Result<Url, url::ParseError> {
        Url::parse(&self.token_endpoint)
    }

    /// Whether the token endpoint accepts `method` (e.g. `client_secret_basic`)
    pub fn supports_auth_method(&self, method: &str) -> bool {
        self.token_endpoint_auth_methods_supported
            .iter()
            .any(|m| m == method)
    }
}

impl Model for ResponseOpenidConfiguration {
    const TYPE_NAME: &'static str = "ResponseOpenidConfiguration";

    fn field_map() -> FieldMap {
        FieldMap::new(vec![
            FieldSpec::required(
                "authorizationEndpoint",
                "authorization_endpoint",
                FieldType::String,
            ),
            FieldSpec::required("issuer", "issuer", FieldType::String),
            FieldSpec::required("tokenEndpoint", "token_endpoint", FieldType::String),
            FieldSpec::required(
                "tokenEndpointAuthMethodsSupported",
                "token_endpoint_auth_methods_supported",
                FieldType::array(FieldType::String),
            ),
        ])
    }

    fn into_record(self) -> Record {
        Record::new(Self::TYPE_NAME)
            .with("authorizationEndpoint", self.authorization_endpoint)
            .with("issuer", self.issuer)
            .with("tokenEndpoint", self.token_endpoint)
            .with(
                "tokenEndpointAuthMethodsSupported",
                self.token_endpoint_auth_methods_supported,
            )
    }

    fn from_record(mut record: Record) -> Result<Self> {
        Ok(Self {
            authorization_endpoint: record.take_required("authorizationEndpoint")?,
            issuer: record.take_required("issuer")?,
            token_endpoint: record.take_required("tokenEndpoint")?,
            token_endpoint_auth_methods_supported: record
                .take_required("tokenEndpointAuthMethodsSupported")?,
        })
    }
}
