//! Per-file validation driver.
//!
//! A file moves through `pending -> parsed -> walking -> passed | failed`, or
//! straight from `pending` to `skipped` when it is excluded. Excluded files
//! are never opened. Within a file the walk stops at the first rejected block;
//! other files are unaffected.

use std::path::Path;

use elements_schema::{ElementSchema, SchemaLoadError};
use serde::Serialize;

use crate::config::HarnessConfig;
use crate::discovery::{MarkdownFiles, discover_markdown_files, read_file_bounded};
use crate::error::{BlockError, FileError, ScanError};
use crate::extract::{BlockOutcome, validate_node};
use crate::markdown::{self, MarkdownArena};
use crate::report::{FileStatus, ValidationReport};

/// Reason attached to excluded files.
pub const EXCLUDED_REASON: &str =
    "file is excluded because it intentionally contains invalid API Elements";

/// Counts for a file that passed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    /// Fenced `json` blocks that decoded successfully.
    pub json_blocks: usize,
    /// Of those, blocks that were elements and satisfied the schema.
    pub validated_elements: usize,
}

/// Terminal state of one file check.
#[derive(Debug)]
pub enum FileOutcome {
    Passed(FileSummary),
    Failed(FileError),
    Skipped { reason: String },
}

impl FileOutcome {
    #[must_use]
    pub fn status(&self) -> FileStatus {
        match self {
            Self::Passed(_) => FileStatus::Passed,
            Self::Failed(_) => FileStatus::Failed,
            Self::Skipped { .. } => FileStatus::Skipped,
        }
    }
}

/// Validate every JSON element in one markdown document, stopping at the
/// first rejected block.
///
/// # Errors
///
/// Returns the first [`BlockError`] in document order.
pub fn check_markdown_content(
    content: &str,
    schema: &ElementSchema,
) -> Result<FileSummary, BlockError> {
    let arena = MarkdownArena::new();
    let root = markdown::parse(&arena, content);

    let mut summary = FileSummary::default();
    for (node, _event) in markdown::walk(root) {
        match validate_node(node, schema)? {
            BlockOutcome::NotJson => {}
            BlockOutcome::Skipped => summary.json_blocks += 1,
            BlockOutcome::Validated => {
                summary.json_blocks += 1;
                summary.validated_elements += 1;
            }
        }
    }
    Ok(summary)
}

/// A loaded schema plus the configuration needed to check documentation
/// files against it.
///
/// The schema is loaded once and lent to every file check.
#[derive(Debug)]
pub struct DocsHarness {
    config: HarnessConfig,
    schema: ElementSchema,
}

impl DocsHarness {
    /// Load the schema named by `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaLoadError`] if the schema cannot be read, parsed or
    /// compiled. No file can be checked without it.
    pub fn load(config: HarnessConfig) -> Result<Self, SchemaLoadError> {
        let schema = ElementSchema::load(&config.schema_file_path())?;
        Ok(Self::with_schema(config, schema))
    }

    /// Build a harness around an already-loaded schema.
    #[must_use]
    pub fn with_schema(config: HarnessConfig, schema: ElementSchema) -> Self {
        Self { config, schema }
    }

    #[must_use]
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    #[must_use]
    pub fn schema(&self) -> &ElementSchema {
        &self.schema
    }

    /// Documentation files under the configured directory.
    ///
    /// # Errors
    ///
    /// Returns a `ScanError` if the configured pattern is invalid.
    pub fn discover(&self) -> Result<MarkdownFiles, ScanError> {
        discover_markdown_files(&self.config.docs_dir_path(), &self.config.pattern)
    }

    /// Whether `path` is the same file on disk as one of the exclusions.
    ///
    /// Identity is checked at call time, so hard links, symlinks and
    /// exclusions created after construction all match. An exclusion that
    /// does not exist matches nothing.
    #[must_use]
    pub fn is_excluded(&self, path: &Path) -> bool {
        self.config
            .excluded_paths()
            .iter()
            .any(|excluded| same_file::is_same_file(path, excluded).unwrap_or(false))
    }

    /// Check one documentation file.
    #[must_use]
    pub fn check_file(&self, path: &Path) -> FileOutcome {
        if self.is_excluded(path) {
            tracing::debug!(file = %path.display(), "skipped");
            return FileOutcome::Skipped {
                reason: EXCLUDED_REASON.to_owned(),
            };
        }

        let content = match read_file_bounded(path, self.config.max_file_size) {
            Ok(content) => content,
            Err(e) => return FileOutcome::Failed(FileError::Scan(e)),
        };

        match check_markdown_content(&content, &self.schema) {
            Ok(summary) => {
                tracing::debug!(
                    file = %path.display(),
                    json_blocks = summary.json_blocks,
                    validated_elements = summary.validated_elements,
                    "passed"
                );
                FileOutcome::Passed(summary)
            }
            Err(error) => FileOutcome::Failed(FileError::Block {
                file: path.to_owned(),
                error,
            }),
        }
    }

    /// Check every discovered file and aggregate the outcomes.
    ///
    /// # Errors
    ///
    /// Returns a `ScanError` if discovery cannot start. Failures of
    /// individual files are recorded in the report instead.
    pub fn run(&self) -> Result<ValidationReport, ScanError> {
        let mut report = ValidationReport::default();
        for entry in self.discover()? {
            match entry {
                Ok(path) => {
                    let outcome = self.check_file(&path);
                    report.record(path, &outcome);
                }
                Err(e) => {
                    let path = e.file.clone();
                    report.record(path, &FileOutcome::Failed(FileError::Scan(e)));
                }
            }
        }

        tracing::info!(
            discovered = report.discovered_files,
            passed = report.passed_files,
            failed = report.failed_files,
            skipped = report.skipped_files,
            "documentation validated"
        );
        Ok(report)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const VALID_DOC: &str =
        "# String\n\n```json\n{\"element\": \"string\", \"content\": \"hello\"}\n```\n";
    const INVALID_DOC: &str = "# Bad\n\n```json\n{\"element\": 7}\n```\n";

    fn string_schema() -> ElementSchema {
        ElementSchema::from_value(json!({
            "type": "object",
            "properties": {"element": {"type": "string"}}
        }))
        .unwrap()
    }

    fn harness_in(root: &Path) -> DocsHarness {
        DocsHarness::with_schema(HarnessConfig::default().with_root(root), string_schema())
    }

    fn docs_dir(tmp: &TempDir) -> PathBuf {
        let dir = tmp.path().join("docs");
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_check_markdown_content_counts_blocks() {
        let text = concat!(
            "```json\n{\"element\": \"string\"}\n```\n\n",
            "```json\n{\"foo\": \"bar\"}\n```\n\n",
            "```yaml\nelement: string\n```\n",
        );
        let summary = check_markdown_content(text, &string_schema()).unwrap();
        assert_eq!(
            summary,
            FileSummary {
                json_blocks: 2,
                validated_elements: 1
            }
        );
    }

    #[test]
    fn test_check_markdown_content_fails_fast() {
        let text = concat!(
            "```json\n{\"element\": 1}\n```\n\n",
            "```json\n{not valid}\n```\n",
        );
        let err = check_markdown_content(text, &string_schema()).unwrap_err();
        assert_eq!(err.position.line, 1);
    }

    #[test]
    fn test_check_file_passes_valid_document() {
        let tmp = TempDir::new().unwrap();
        let file = docs_dir(&tmp).join("string.md");
        fs::write(&file, VALID_DOC).unwrap();

        let outcome = harness_in(tmp.path()).check_file(&file);
        assert!(
            matches!(outcome, FileOutcome::Passed(s) if s.validated_elements == 1),
            "got: {outcome:?}"
        );
    }

    #[test]
    fn test_check_file_fails_invalid_document() {
        let tmp = TempDir::new().unwrap();
        let file = docs_dir(&tmp).join("bad.md");
        fs::write(&file, INVALID_DOC).unwrap();

        let err = match harness_in(tmp.path()).check_file(&file) {
            FileOutcome::Failed(err) => err,
            other => panic!("expected failure, got: {other:?}"),
        };
        assert_eq!(err.position().map(|p| (p.line, p.column)), Some((3, 1)));
        assert_eq!(err.violations().len(), 1);
    }

    #[test]
    fn test_check_file_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let file = docs_dir(&tmp).join("bad.md");
        fs::write(&file, INVALID_DOC).unwrap();

        let harness = harness_in(tmp.path());
        let first = harness.check_file(&file).status();
        let second = harness.check_file(&file).status();
        assert_eq!(first, FileStatus::Failed);
        assert_eq!(first, second);
    }

    #[test]
    fn test_migration_guide_is_skipped() {
        let tmp = TempDir::new().unwrap();
        let file = docs_dir(&tmp).join("migration.md");
        fs::write(&file, INVALID_DOC).unwrap();

        let outcome = harness_in(tmp.path()).check_file(&file);
        assert!(matches!(outcome, FileOutcome::Skipped { .. }), "got: {outcome:?}");
    }

    #[test]
    fn test_exclusion_matches_by_identity() {
        let tmp = TempDir::new().unwrap();
        docs_dir(&tmp);
        fs::write(tmp.path().join("docs").join("migration.md"), INVALID_DOC).unwrap();

        let harness = harness_in(tmp.path());
        let spelled_differently = tmp.path().join("docs").join(".").join("migration.md");
        assert!(harness.is_excluded(&spelled_differently));

        // Same name, different file.
        let other = tmp.path().join("migration.md");
        fs::write(&other, INVALID_DOC).unwrap();
        assert!(!harness.is_excluded(&other));
        assert_eq!(harness.check_file(&other).status(), FileStatus::Failed);
    }

    #[test]
    fn test_hard_link_to_excluded_file_is_skipped() {
        let tmp = TempDir::new().unwrap();
        let docs = docs_dir(&tmp);
        fs::write(docs.join("migration.md"), INVALID_DOC).unwrap();
        fs::hard_link(docs.join("migration.md"), docs.join("migration-v2.md")).unwrap();

        let report = harness_in(tmp.path()).run().unwrap();
        assert_eq!(report.skipped_files, 2, "got: {:?}", report.files);
        assert!(report.ok);
    }

    #[test]
    fn test_exclusion_created_after_harness_is_honoured() {
        let tmp = TempDir::new().unwrap();
        let harness = harness_in(tmp.path());

        let file = docs_dir(&tmp).join("migration.md");
        fs::write(&file, INVALID_DOC).unwrap();
        assert_eq!(harness.check_file(&file).status(), FileStatus::Skipped);
    }

    #[test]
    fn test_excluded_file_is_never_read() {
        let tmp = TempDir::new().unwrap();
        let file = docs_dir(&tmp).join("migration.md");
        // Not UTF-8: reading it would fail the file.
        fs::write(&file, [0xff, 0xfe, 0x00]).unwrap();

        let outcome = harness_in(tmp.path()).check_file(&file);
        assert_eq!(outcome.status(), FileStatus::Skipped);
    }

    #[test]
    fn test_run_aggregates_outcomes() {
        let tmp = TempDir::new().unwrap();
        let docs = docs_dir(&tmp);
        fs::write(docs.join("string.md"), VALID_DOC).unwrap();
        fs::write(docs.join("bad.md"), INVALID_DOC).unwrap();
        fs::write(docs.join("migration.md"), INVALID_DOC).unwrap();

        let report = harness_in(tmp.path()).run().unwrap();
        assert_eq!(report.discovered_files, 3);
        assert_eq!(report.passed_files, 1);
        assert_eq!(report.failed_files, 1);
        assert_eq!(report.skipped_files, 1);
        assert!(!report.ok);
    }

    #[test]
    fn test_run_without_docs_is_ok() {
        let tmp = TempDir::new().unwrap();
        let report = harness_in(tmp.path()).run().unwrap();
        assert_eq!(report.discovered_files, 0);
        assert!(report.ok);
    }

    #[test]
    fn test_load_requires_schema() {
        let tmp = TempDir::new().unwrap();
        let err = DocsHarness::load(HarnessConfig::default().with_root(tmp.path())).unwrap_err();
        assert!(matches!(err, SchemaLoadError::Read { .. }), "got: {err:?}");
    }
}
