//! # elements-docs-validator
//!
//! Keeps API Elements documentation honest: every fenced `json` block in the
//! documentation that holds an element (an object with an `element` key) must
//! validate against the element schema.
//!
//! The pipeline per file is: discover, read, parse markdown, walk the AST,
//! decode `json` blocks, validate elements, stop at the first failure.
//! The schema is loaded once and shared by reference across all files.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use elements_docs_validator::{HarnessConfig, validate_docs};
//!
//! let config = HarnessConfig::default().with_root("/path/to/api-elements");
//! let report = validate_docs(&config).unwrap();
//! println!("Files checked: {}", report.discovered_files);
//! println!("Failed: {}", report.failed_files);
//! println!("OK: {}", report.ok);
//! ```

mod config;
pub mod discovery;
mod error;
pub mod extract;
mod harness;
pub mod markdown;
pub mod output;
mod report;

pub use config::{
    DEFAULT_DOCS_DIR, DEFAULT_EXCLUDED, DEFAULT_PATTERN, DEFAULT_SCHEMA_PATH, HarnessConfig,
};
pub use error::{BlockError, BlockErrorKind, FileError, ScanError, ScanErrorKind};
pub use harness::{DocsHarness, EXCLUDED_REASON, FileOutcome, FileSummary, check_markdown_content};
pub use report::{FailureDetail, FileReport, FileStatus, ValidationReport};

use anyhow::Context;

/// Validate all documentation described by `config`.
///
/// This is the primary public API.
///
/// # Errors
///
/// Returns an error if the schema cannot be loaded or the discovery pattern is
/// invalid. Both abort the run before any file is checked. Per-file failures
/// are reported in the returned `ValidationReport`.
pub fn validate_docs(config: &HarnessConfig) -> anyhow::Result<ValidationReport> {
    let harness = DocsHarness::load(config.clone()).with_context(|| {
        format!(
            "Cannot validate documentation without the element schema ({})",
            config.schema_file_path().display()
        )
    })?;
    let report = harness.run()?;
    Ok(report)
}
