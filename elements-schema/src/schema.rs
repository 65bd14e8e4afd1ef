//! Loading and applying the element schema.

use std::fmt;
use std::path::Path;

use jsonschema::Validator;
use serde_json::Value;

use crate::error::{ElementViolation, SchemaLoadError};

/// Origin label used for schemas built from in-memory values.
const IN_MEMORY_ORIGIN: &str = "<in-memory>";

/// The compiled element schema.
///
/// Loaded once per run and only ever lent out by reference; nothing in the
/// validation pipeline mutates it.
pub struct ElementSchema {
    origin: String,
    document: Value,
    validator: Validator,
}

impl fmt::Debug for ElementSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementSchema")
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

impl ElementSchema {
    /// Read, parse and compile the schema at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaLoadError::Read`] if the file cannot be read,
    /// [`SchemaLoadError::Parse`] if it is not JSON, and
    /// [`SchemaLoadError::Compile`] if it is not a valid JSON Schema.
    pub fn load(path: &Path) -> Result<Self, SchemaLoadError> {
        let content = std::fs::read_to_string(path).map_err(|source| SchemaLoadError::Read {
            path: path.to_owned(),
            source,
        })?;
        let document: Value =
            serde_json::from_str(&content).map_err(|source| SchemaLoadError::Parse {
                path: path.to_owned(),
                source,
            })?;

        let schema = Self::compile(path.display().to_string(), document)?;
        tracing::debug!(schema = %schema.origin, "loaded element schema");
        Ok(schema)
    }

    /// Compile an already-parsed schema document.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaLoadError::Compile`] if `document` is not a valid JSON Schema.
    pub fn from_value(document: Value) -> Result<Self, SchemaLoadError> {
        Self::compile(IN_MEMORY_ORIGIN.to_owned(), document)
    }

    fn compile(origin: String, document: Value) -> Result<Self, SchemaLoadError> {
        match jsonschema::validator_for(&document) {
            Ok(validator) => Ok(Self {
                origin,
                document,
                validator,
            }),
            Err(e) => Err(SchemaLoadError::Compile {
                origin,
                message: e.to_string(),
            }),
        }
    }

    /// Where the schema came from: a file path or `<in-memory>`.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// The raw schema document.
    #[must_use]
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Returns `true` if `instance` satisfies the schema.
    #[must_use]
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validator.is_valid(instance)
    }

    /// Validate `instance`, collecting every violation.
    ///
    /// # Errors
    ///
    /// Returns all violations found when `instance` does not satisfy the schema.
    pub fn validate(&self, instance: &Value) -> Result<(), Vec<ElementViolation>> {
        let violations: Vec<ElementViolation> = self
            .validator
            .iter_errors(instance)
            .map(|error| ElementViolation {
                instance_path: error.instance_path().to_string(),
                schema_path: error.schema_path().to_string(),
                message: error.to_string(),
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}
