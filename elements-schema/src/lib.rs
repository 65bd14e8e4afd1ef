//! # elements-schema
//!
//! Loads the API Elements JSON Schema and validates element objects against it.
//!
//! An *element* is any JSON object carrying a key literally named `element`
//! (see [`is_schema_bound`]). Everything else is outside the schema's concern.
//!
//! ```rust,no_run
//! use std::path::Path;
//! use elements_schema::{ElementSchema, is_schema_bound};
//!
//! let schema = ElementSchema::load(Path::new("element-schema.json")).unwrap();
//! let value = serde_json::json!({"element": "string", "content": "hello"});
//! if is_schema_bound(&value) {
//!     schema.validate(&value).unwrap();
//! }
//! ```

pub mod element;
pub mod error;
pub mod schema;

pub use element::{ELEMENT_KEY, element_name, is_schema_bound};
pub use error::{ElementViolation, SchemaLoadError};
pub use schema::ElementSchema;
