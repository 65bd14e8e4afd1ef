//! Markdown parsing and depth-first AST traversal.
//!
//! Parsing is plain `CommonMark` via `comrak`; no extensions are enabled, so a
//! document is interpreted the way any `CommonMark` renderer would show it.
//!
//! [`walk`] mirrors a classic AST walker: container nodes are produced twice
//! (on [`WalkEvent::Enter`] and [`WalkEvent::Leave`]), leaf nodes once. A
//! consumer that looks at every item therefore sees each code block exactly
//! once.

use std::cell::RefCell;

use comrak::arena_tree::{NodeEdge, Traverse};
use comrak::nodes::{Ast, NodeValue};
use comrak::{Arena, Options, parse_document};
use serde::Serialize;

pub use comrak::nodes::AstNode;

/// Arena owning all nodes of one parsed document.
pub type MarkdownArena<'a> = Arena<AstNode<'a>>;

/// Whether the walker is entering or leaving a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkEvent {
    Enter,
    Leave,
}

/// 1-indexed line and column in the markdown source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourcePosition {
    pub line: usize,
    pub column: usize,
}

/// A fenced code block lifted out of the AST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FencedCodeBlock {
    /// Info string after the opening fence, e.g. `json`.
    pub info: String,
    /// Block content, including its trailing newline.
    pub literal: String,
    /// Position of the opening fence.
    pub position: SourcePosition,
}

/// Parse `text` into a document tree allocated in `arena`.
#[must_use]
pub fn parse<'a>(arena: &'a MarkdownArena<'a>, text: &str) -> &'a AstNode<'a> {
    parse_document(arena, text, &Options::default())
}

/// Walk the tree under `root` in document order, depth-first.
#[must_use]
pub fn walk<'a>(root: &'a AstNode<'a>) -> Walk<'a> {
    Walk {
        edges: root.traverse(),
    }
}

/// Lazy, single-use iterator returned by [`walk`].
pub struct Walk<'a> {
    edges: Traverse<'a, RefCell<Ast>>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (&'a AstNode<'a>, WalkEvent);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.edges.next()? {
                NodeEdge::Start(node) => return Some((node, WalkEvent::Enter)),
                NodeEdge::End(node) => {
                    if is_container(&node.data.borrow().value) {
                        return Some((node, WalkEvent::Leave));
                    }
                }
            }
        }
    }
}

/// Leaf node types never hold children and are walked once.
fn is_container(value: &NodeValue) -> bool {
    !matches!(
        value,
        NodeValue::CodeBlock(_)
            | NodeValue::HtmlBlock(_)
            | NodeValue::ThematicBreak
            | NodeValue::FrontMatter(_)
            | NodeValue::Text(_)
            | NodeValue::Code(_)
            | NodeValue::HtmlInline(_)
            | NodeValue::SoftBreak
            | NodeValue::LineBreak
    )
}

/// Where `node` starts in the source.
#[must_use]
pub fn source_position(node: &AstNode<'_>) -> SourcePosition {
    let start = node.data.borrow().sourcepos.start;
    SourcePosition {
        line: start.line,
        column: start.column,
    }
}

/// The fenced code block at `node`, if it is one. Indented code blocks have
/// no info string and are not returned.
#[must_use]
pub fn fenced_code_block(node: &AstNode<'_>) -> Option<FencedCodeBlock> {
    let ast = node.data.borrow();
    match &ast.value {
        NodeValue::CodeBlock(block) if block.fenced => Some(FencedCodeBlock {
            info: block.info.clone(),
            literal: block.literal.clone(),
            position: source_position(node),
        }),
        _ => None,
    }
}
