//! JSON code block extraction and element validation.
//!
//! A block takes part only when it is fenced and its info string is exactly
//! `json`. Blocks tagged `json5`, `JSON` or `json schema` are ignored, as are
//! JSON values that are not elements (arrays, scalars, objects without an
//! `element` key).
//!
//! Decoding is strict RFC 8259: `NaN` and `Infinity` are decode errors.

use elements_schema::{ElementSchema, element_name, is_schema_bound};
use serde_json::Value;

use crate::error::{BlockError, BlockErrorKind};
use crate::markdown::{AstNode, SourcePosition, fenced_code_block};

/// Info string selecting blocks for validation.
pub const JSON_INFO_STRING: &str = "json";

/// What happened to a single AST node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockOutcome {
    /// Not a fenced `json` block.
    NotJson,
    /// Valid JSON that is not an element.
    Skipped,
    /// An element that satisfied the schema.
    Validated,
}

/// Inspect one AST node and validate it if it holds an element.
///
/// # Errors
///
/// Returns a [`BlockError`] positioned at the block's opening fence when the
/// block content is not JSON or the element violates `schema`.
pub fn validate_node(
    node: &AstNode<'_>,
    schema: &ElementSchema,
) -> Result<BlockOutcome, BlockError> {
    let Some(block) = fenced_code_block(node) else {
        return Ok(BlockOutcome::NotJson);
    };
    if block.info != JSON_INFO_STRING {
        return Ok(BlockOutcome::NotJson);
    }
    validate_json_block(&block.literal, block.position, schema)
}

/// Decode `literal` and validate it if it is an element.
///
/// # Errors
///
/// Returns a [`BlockError`] at `position` on decode failure or schema violation.
pub fn validate_json_block(
    literal: &str,
    position: SourcePosition,
    schema: &ElementSchema,
) -> Result<BlockOutcome, BlockError> {
    let value: Value =
        serde_json::from_str(literal).map_err(|e| reject(position, BlockErrorKind::Decode(e)))?;

    if !is_schema_bound(&value) {
        tracing::debug!(line = position.line, "json block is not an element, skipping");
        return Ok(BlockOutcome::Skipped);
    }

    schema
        .validate(&value)
        .map_err(|violations| reject(position, BlockErrorKind::Schema(violations)))?;

    tracing::trace!(
        line = position.line,
        element = element_name(&value).unwrap_or_default(),
        "element validated"
    );
    Ok(BlockOutcome::Validated)
}

fn reject(position: SourcePosition, kind: BlockErrorKind) -> BlockError {
    tracing::warn!(
        line = position.line,
        column = position.column,
        "rejected json block: {kind}"
    );
    BlockError { position, kind }
}
