//! PromptScript Error Handling
//!
//! Syntax errors carry their source text so they can be rendered with miette.
//! Everything outside the parser (file loading, serialization) is wrapped in
//! [`PromptScriptError`].

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceSpan};
use thiserror::Error;

use crate::syntax::Span;

// ============================================================================
// SOURCE CONTEXT
// ============================================================================

/// The text being parsed together with the name used in diagnostics.
#[derive(Debug, Clone)]
pub struct SourceContext {
    pub name: String,
    pub content: String,
}

impl SourceContext {
    pub fn from_file(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Source context for text that did not come from a file.
    pub fn anonymous(content: impl Into<String>) -> Self {
        Self::from_file("<input>", content)
    }

    pub fn to_named_source(&self) -> Arc<NamedSource<String>> {
        Arc::new(NamedSource::new(self.name.clone(), self.content.clone()))
    }
}

// ============================================================================
// SYNTAX ERRORS
// ============================================================================

/// What the parser could not accept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("expected {}, found {found}", join_expected(.expected))]
    UnexpectedToken { expected: Vec<String>, found: String },

    #[error("unexpected end of input, expected {}", join_expected(.expected))]
    UnexpectedEndOfInput { expected: Vec<String> },

    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("unrecognized character '{character}'")]
    UnrecognizedCharacter { character: char },

    #[error("missing blueprint block, found {found}")]
    MissingBlueprint { found: String },

    #[error("empty {block} body, expected {}", join_expected(.expected))]
    EmptyBody { block: String, expected: Vec<String> },

    #[error("malformed {construct}: missing {element}")]
    MissingElement { construct: String, element: String },
}

impl ErrorKind {
    pub const fn code_suffix(&self) -> &'static str {
        match self {
            Self::UnexpectedToken { .. } => "unexpected_token",
            Self::UnexpectedEndOfInput { .. } => "unexpected_eof",
            Self::UnterminatedString => "unterminated_string",
            Self::UnrecognizedCharacter { .. } => "unrecognized_character",
            Self::MissingBlueprint { .. } => "missing_blueprint",
            Self::EmptyBody { .. } => "empty_body",
            Self::MissingElement { .. } => "missing_element",
        }
    }

    fn help(&self) -> Option<&'static str> {
        match self {
            Self::UnterminatedString => Some("add a closing '\"' to end the string"),
            Self::MissingBlueprint { .. } => {
                Some("a program must start with `blueprint Name { ... }`")
            }
            Self::EmptyBody { .. } => Some("a block body needs at least one entry"),
            _ => None,
        }
    }

    fn primary_label(&self) -> &'static str {
        match self {
            Self::UnexpectedToken { .. } => "unexpected token",
            Self::UnexpectedEndOfInput { .. } => "input ends here",
            Self::UnterminatedString => "string starts here",
            Self::UnrecognizedCharacter { .. } => "unrecognized character",
            Self::MissingBlueprint { .. } => "blueprint expected here",
            Self::EmptyBody { .. } => "body closes here",
            Self::MissingElement { .. } => "malformed construct",
        }
    }
}

fn join_expected(expected: &[String]) -> String {
    match expected {
        [] => "a valid token".to_string(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} or {}", init.join(", "), last),
    }
}

/// A fatal parse failure. No partial program accompanies it.
#[derive(Debug, Clone, Error)]
#[error("syntax error at line {line}, column {column}: {kind}")]
pub struct SyntaxError {
    pub kind: ErrorKind,
    /// Byte range in the source text.
    pub span: Span,
    /// 1-based.
    pub line: usize,
    /// 1-based, counted in characters.
    pub column: usize,
    source_code: Arc<NamedSource<String>>,
}

impl SyntaxError {
    pub fn new(
        kind: ErrorKind,
        span: Span,
        (line, column): (usize, usize),
        source: &SourceContext,
    ) -> Self {
        Self {
            kind,
            span,
            line,
            column,
            source_code: source.to_named_source(),
        }
    }

    pub fn source_name(&self) -> &str {
        self.source_code.name()
    }
}

impl Diagnostic for SyntaxError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(format!(
            "promptscript::syntax::{}",
            self.kind.code_suffix()
        )))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.kind
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let label = LabeledSpan::new_with_span(
            Some(self.kind.primary_label().to_string()),
            to_source_span(self.span),
        );
        Some(Box::new(std::iter::once(label)))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&*self.source_code)
    }
}

/// Converts a byte span to a miette span. Empty spans are widened to one byte
/// so the label has something to point at.
pub fn to_source_span(span: Span) -> SourceSpan {
    let len = span.end.saturating_sub(span.start).max(1);
    SourceSpan::new(span.start.into(), len)
}

// ============================================================================
// CRATE ERRORS
// ============================================================================

/// Failures of the layers around the parser: file loading, discovery and
/// serialization of the context.
#[derive(Debug, Error, Diagnostic)]
pub enum PromptScriptError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] SyntaxError),

    #[error("failed to read '{}'", .path.display())]
    #[diagnostic(code(promptscript::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk directory")]
    #[diagnostic(code(promptscript::discovery))]
    Walk(#[from] walkdir::Error),

    #[error("failed to serialize context as JSON")]
    #[diagnostic(code(promptscript::serialize::json))]
    Json(#[from] serde_json::Error),

    #[error("failed to serialize context as YAML")]
    #[diagnostic(code(promptscript::serialize::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

// ============================================================================
// ERROR FORMATTING UTILITIES
// ============================================================================

/// Prints an error with full miette diagnostics to stderr.
pub fn print_error(error: impl Into<miette::Report>) {
    let report: miette::Report = error.into();
    eprintln!("{report:?}");
}
