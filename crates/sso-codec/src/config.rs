//! Codec options.
//!
//! This module defines [`CodecOptions`], the knobs that adjust how strictly
//! the codec treats incoming wire objects and how it writes timestamps. The
//! options can be created programmatically or loaded from a YAML or TOML
//! file.
//!
//! # Examples
//!
//! ```
//! use sso_codec::config::{CodecOptions, TimestampPrecision};
//!
//! let options = CodecOptions {
//!     deny_unknown_fields: true,
//!     timestamp_precision: TimestampPrecision::Millis,
//!     ..Default::default()
//! };
//! assert!(options.null_as_absent);
//! ```

use std::path::Path;

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use tokio::fs;

/// Options controlling encode and decode behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecOptions {
    /// Treat a wire `null` like an absent key
    pub null_as_absent: bool,

    /// Reject wire keys the field map does not declare
    pub deny_unknown_fields: bool,

    /// Fractional-second precision of encoded timestamps
    pub timestamp_precision: TimestampPrecision,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            null_as_absent: true,
            deny_unknown_fields: false,
            timestamp_precision: TimestampPrecision::default(),
        }
    }
}

/// Fractional-second precision for RFC 3339 output.
///
/// Every variant other than `Auto` is lossy: digits below the chosen
/// precision are truncated on encode, so an instant with finer resolution
/// decodes back to a different value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampPrecision {
    /// Shortest form that keeps the value exact
    #[default]
    Auto,
    /// Whole seconds, sub-second part dropped
    Seconds,
    /// Exactly three fractional digits, truncated
    Millis,
    /// Exactly six fractional digits, truncated
    Micros,
}

impl TimestampPrecision {
    pub fn seconds_format(self) -> SecondsFormat {
        match self {
            Self::Auto => SecondsFormat::AutoSi,
            Self::Seconds => SecondsFormat::Secs,
            Self::Millis => SecondsFormat::Millis,
            Self::Micros => SecondsFormat::Micros,
        }
    }
}

impl CodecOptions {
    /// Strict decoding: nulls are type errors and unknown keys are rejected
    pub fn strict() -> Self {
        Self {
            null_as_absent: false,
            deny_unknown_fields: true,
            ..Default::default()
        }
    }

    /// Load options from a file; `.toml` files are read as TOML, anything else as YAML
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        let options = if is_toml(path) {
            toml::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        Ok(options)
    }

    /// Save options to a file, choosing the format from the extension
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let path = path.as_ref();
        let content = if is_toml(path) {
            toml::to_string(self)
                .map_err(|e| crate::Error::config(format!("Failed to encode options: {}", e)))?
        } else {
            serde_yaml::to_string(self)?
        };
        fs::write(path, content).await?;
        Ok(())
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some("toml")
}
