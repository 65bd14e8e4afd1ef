//! Validation report types.

use std::path::PathBuf;

use elements_schema::ElementViolation;
use serde::Serialize;

use crate::harness::FileOutcome;

/// Terminal status of one documentation file.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Passed,
    Failed,
    Skipped,
}

/// Why a file failed, flattened for serialization.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct FailureDetail {
    /// Line number (1-indexed) of the rejected block; 0 when the file could not be read
    pub line: usize,
    /// Column number (1-indexed) of the rejected block; 0 when the file could not be read
    pub column: usize,
    /// Human-readable error description
    pub message: String,
    /// Schema violations, empty for decode and read failures
    pub violations: Vec<ElementViolation>,
}

/// Outcome of one documentation file.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct FileReport {
    pub file: PathBuf,
    pub status: FileStatus,
    pub json_blocks: usize,
    pub validated_elements: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureDetail>,
}

impl FileReport {
    fn from_outcome(file: PathBuf, outcome: &FileOutcome) -> Self {
        let mut report = Self {
            file,
            status: outcome.status(),
            json_blocks: 0,
            validated_elements: 0,
            skip_reason: None,
            failure: None,
        };
        match outcome {
            FileOutcome::Passed(summary) => {
                report.json_blocks = summary.json_blocks;
                report.validated_elements = summary.validated_elements;
            }
            FileOutcome::Failed(error) => {
                let position = error.position();
                report.failure = Some(FailureDetail {
                    line: position.map_or(0, |p| p.line),
                    column: position.map_or(0, |p| p.column),
                    message: error.to_string(),
                    violations: error.violations().to_vec(),
                });
            }
            FileOutcome::Skipped { reason } => report.skip_reason = Some(reason.clone()),
        }
        report
    }

    /// Format the outcome for human-readable output.
    ///
    /// Failures already carry `{file}:{line}:{column}` in their message.
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        match (&self.status, &self.failure, &self.skip_reason) {
            (FileStatus::Failed, Some(failure), _) => failure.message.clone(),
            (FileStatus::Skipped, _, Some(reason)) => {
                format!("{}: skipped ({reason})", self.file.display())
            }
            _ => format!(
                "{}: {} element(s) validated in {} json block(s)",
                self.file.display(),
                self.validated_elements,
                self.json_blocks
            ),
        }
    }
}

/// Result of a validation run.
///
/// An empty documentation directory yields a report with no files that is
/// still `ok`.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct ValidationReport {
    /// Number of documentation files found (including skipped ones).
    pub discovered_files: usize,
    pub passed_files: usize,
    pub failed_files: usize,
    pub skipped_files: usize,
    /// Whether no file failed.
    pub ok: bool,
    /// Per-file outcomes in discovery order.
    pub files: Vec<FileReport>,
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self {
            discovered_files: 0,
            passed_files: 0,
            failed_files: 0,
            skipped_files: 0,
            ok: true,
            files: Vec::new(),
        }
    }
}

impl ValidationReport {
    pub(crate) fn record(&mut self, file: PathBuf, outcome: &FileOutcome) {
        self.discovered_files += 1;
        match outcome.status() {
            FileStatus::Passed => self.passed_files += 1,
            FileStatus::Failed => {
                self.failed_files += 1;
                self.ok = false;
            }
            FileStatus::Skipped => self.skipped_files += 1,
        }
        self.files.push(FileReport::from_outcome(file, outcome));
    }

    /// Total number of elements validated across all passing files.
    #[must_use]
    pub fn validated_elements(&self) -> usize {
        self.files.iter().map(|f| f.validated_elements).sum()
    }

    /// Reports of failed files.
    pub fn failures(&self) -> impl Iterator<Item = &FileReport> {
        self.files
            .iter()
            .filter(|f| f.status == FileStatus::Failed)
    }
}
