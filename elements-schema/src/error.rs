//! Error types for schema loading and element validation.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Errors raised while loading the element schema.
///
/// Every variant is fatal for a validation run: without a schema no
/// documentation file can be checked.
#[derive(Debug, Error)]
pub enum SchemaLoadError {
    /// The schema file could not be read.
    #[error("Failed to read schema {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The schema file is not valid JSON.
    #[error("Schema {} is not valid JSON: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The document parsed but is not a usable JSON Schema.
    #[error("Schema {origin} is not a valid JSON Schema: {message}")]
    Compile { origin: String, message: String },
}

/// One constraint an element failed to satisfy.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct ElementViolation {
    /// JSON pointer into the element (empty for the element itself).
    pub instance_path: String,
    /// JSON pointer to the schema keyword that rejected it.
    pub schema_path: String,
    /// Human-readable description from the validator.
    pub message: String,
}

impl ElementViolation {
    #[must_use]
    pub fn new(
        instance_path: impl Into<String>,
        schema_path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            instance_path: instance_path.into(),
            schema_path: schema_path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ElementViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let at = if self.instance_path.is_empty() {
            "/"
        } else {
            self.instance_path.as_str()
        };
        write!(f, "{} (at {at})", self.message)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_display_root() {
        let v = ElementViolation {
            instance_path: String::new(),
            schema_path: "/properties/element/type".to_owned(),
            message: "\"object\" is not of type \"integer\"".to_owned(),
        };
        assert_eq!(v.to_string(), "\"object\" is not of type \"integer\" (at /)");
    }

    #[test]
    fn test_violation_display_nested() {
        let v = ElementViolation {
            instance_path: "/meta/id".to_owned(),
            schema_path: "/definitions/meta/additionalProperties/type".to_owned(),
            message: "\"foo\" is not of type \"object\"".to_owned(),
        };
        assert!(v.to_string().ends_with("(at /meta/id)"));
    }

    #[test]
    fn test_read_error_mentions_path() {
        let err = SchemaLoadError::Read {
            path: PathBuf::from("element-schema.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        let msg = err.to_string();
        assert!(msg.contains("element-schema.json"), "got: {msg}");
        assert!(msg.contains("missing"), "got: {msg}");
    }
}
