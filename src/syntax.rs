//! Syntax module for PromptScript
//!
//! The grammar lives in `syntax/grammar.pest`; [`parser`] turns source text
//! into a pest parse tree and [`crate::ast::builder`] turns that tree into
//! typed nodes.

use serde::{Deserialize, Serialize};

pub mod parser;

pub use parser::{parse, parse_source, parse_tree, Rule};

/// Byte range in the source text.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn from_pest(span: pest::Span<'_>) -> Self {
        Self {
            start: span.start(),
            end: span.end(),
        }
    }
}

/// Whitespace skipped between tokens; the `WHITESPACE` rule in the grammar.
pub fn is_layout_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}
