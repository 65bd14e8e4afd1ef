//! Error types for documentation validation.

use std::path::PathBuf;

use elements_schema::ElementViolation;
use serde::Serialize;
use thiserror::Error;

use crate::markdown::SourcePosition;

/// The kind of scan-level failure that prevented a file from being validated.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScanErrorKind {
    /// An I/O error occurred while reading the file.
    IoError,
    /// The file exceeded the configured maximum size limit.
    FileTooLarge,
    /// The file content is not valid UTF-8.
    InvalidEncoding,
    /// The discovery pattern could not be parsed.
    InvalidPattern,
    /// A discovered entry could not be inspected.
    GlobError,
}

/// A scan-level error: a file that could not be validated at all.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Error)]
#[error("{}: [scan error] {message}", file.display())]
#[non_exhaustive]
pub struct ScanError {
    /// The file path that could not be scanned.
    pub file: PathBuf,
    /// The kind of failure.
    pub kind: ScanErrorKind,
    /// Human-readable description of the failure.
    pub message: String,
}

impl ScanError {
    pub(crate) fn new(file: impl Into<PathBuf>, kind: ScanErrorKind, message: String) -> Self {
        Self {
            file: file.into(),
            kind,
            message,
        }
    }
}

/// Why a JSON code block was rejected.
#[derive(Debug, Error)]
pub enum BlockErrorKind {
    /// The block is tagged `json` but its content does not decode.
    #[error("invalid JSON: {0}")]
    Decode(serde_json::Error),
    /// The block is an element and violates the element schema.
    #[error("element does not match schema: {}", join_violations(.0))]
    Schema(Vec<ElementViolation>),
}

fn join_violations(violations: &[ElementViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A rejected code block together with where it starts in the markdown source.
#[derive(Debug, Error)]
#[error("line {}, column {}: {kind}", position.line, position.column)]
pub struct BlockError {
    /// Opening fence of the offending block.
    pub position: SourcePosition,
    pub kind: BlockErrorKind,
}

/// Why a documentation file failed.
#[derive(Debug, Error)]
pub enum FileError {
    /// The file could not be read.
    #[error("{0}")]
    Scan(ScanError),
    /// A code block in the file was rejected.
    #[error(
        "{}:{}:{}: {}",
        file.display(),
        error.position.line,
        error.position.column,
        error.kind
    )]
    Block { file: PathBuf, error: BlockError },
}

impl FileError {
    /// Source position of the failure, if it came from a code block.
    #[must_use]
    pub fn position(&self) -> Option<SourcePosition> {
        match self {
            Self::Scan(_) => None,
            Self::Block { error, .. } => Some(error.position),
        }
    }

    /// Schema violations behind the failure, if any.
    #[must_use]
    pub fn violations(&self) -> &[ElementViolation] {
        match self {
            Self::Block {
                error:
                    BlockError {
                        kind: BlockErrorKind::Schema(violations),
                        ..
                    },
                ..
            } => violations,
            _ => &[],
        }
    }
}
