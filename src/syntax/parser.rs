//! PromptScript Parser
//!
//! Runs the pest grammar over a complete source text and hands the parse tree
//! to the AST builder. Pest failures are converted into [`SyntaxError`]s that
//! say what was expected at the failing position and what was found there.

use pest::error::{Error, ErrorVariant, InputLocation, LineColLocation};
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

use crate::ast::{build_program, Program};
use crate::errors::{ErrorKind, SourceContext, SyntaxError};
use crate::syntax::{is_layout_whitespace, Span};

#[derive(Parser)]
#[grammar = "syntax/grammar.pest"]
struct PromptScriptParser;

// ============================================================================
// PUBLIC API
// ============================================================================

/// Parse PromptScript text that did not come from a named file.
pub fn parse(source_text: &str) -> Result<Program, SyntaxError> {
    parse_source(&SourceContext::anonymous(source_text))
}

/// Parse a complete source into a [`Program`].
pub fn parse_source(source: &SourceContext) -> Result<Program, SyntaxError> {
    let tree = parse_tree(source)?;
    build_program(tree, source)
}

/// Run the grammar only and return the `program` node of the parse tree.
pub fn parse_tree(source: &SourceContext) -> Result<Pair<'_, Rule>, SyntaxError> {
    let mut pairs = PromptScriptParser::parse(Rule::program, &source.content)
        .map_err(|e| convert_parse_error(e, source))?;

    pairs.next().ok_or_else(|| {
        SyntaxError::new(
            ErrorKind::MissingElement {
                construct: "program".into(),
                element: "parse tree".into(),
            },
            Span::default(),
            (1, 1),
            source,
        )
    })
}

// ============================================================================
// ERROR CONVERSION
// ============================================================================

fn convert_parse_error(error: Error<Rule>, source: &SourceContext) -> SyntaxError {
    let offset = match error.location {
        InputLocation::Pos(pos) => pos,
        InputLocation::Span((start, _)) => start,
    };
    let line_col = match error.line_col {
        LineColLocation::Pos(lc) => lc,
        LineColLocation::Span(lc, _) => lc,
    };
    let positives: &[Rule] = match &error.variant {
        ErrorVariant::ParsingError { positives, .. } => positives.as_slice(),
        ErrorVariant::CustomError { .. } => &[],
    };

    let rest = source.content.get(offset..).unwrap_or_default();
    let found = Found::at(rest);
    let kind = classify(positives, &found, rest);
    let span = Span {
        start: offset,
        end: offset + found.len(),
    };

    SyntaxError::new(kind, span, line_col, source)
}

fn classify(positives: &[Rule], found: &Found, rest: &str) -> ErrorKind {
    let expected = describe_expected(positives);

    if positives
        .iter()
        .any(|r| matches!(r, Rule::kw_blueprint | Rule::blueprint))
    {
        return ErrorKind::MissingBlueprint {
            found: found.describe(),
        };
    }

    match *found {
        Found::End => ErrorKind::UnexpectedEndOfInput { expected },
        Found::Quote if is_unterminated_string(rest) => ErrorKind::UnterminatedString,
        Found::Char(c) if !is_token_char(c) => ErrorKind::UnrecognizedCharacter { character: c },
        Found::Char('}') => match empty_block(positives) {
            Some(block) => ErrorKind::EmptyBody {
                block: block.into(),
                expected,
            },
            None => ErrorKind::UnexpectedToken {
                expected,
                found: found.describe(),
            },
        },
        _ => ErrorKind::UnexpectedToken {
            expected,
            found: found.describe(),
        },
    }
}

/// The token sitting at the failing position.
enum Found<'a> {
    End,
    Quote,
    Word(&'a str),
    Char(char),
}

impl<'a> Found<'a> {
    fn at(rest: &'a str) -> Self {
        match rest.chars().next() {
            None => Found::End,
            Some('"') => Found::Quote,
            Some(c) if c.is_ascii_alphanumeric() || c == '_' => {
                let len = rest
                    .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                    .unwrap_or(rest.len());
                Found::Word(&rest[..len])
            }
            Some(c) => Found::Char(c),
        }
    }

    fn len(&self) -> usize {
        match *self {
            Found::End => 0,
            Found::Quote => 1,
            Found::Word(word) => word.len(),
            Found::Char(c) => c.len_utf8(),
        }
    }

    fn describe(&self) -> String {
        match *self {
            Found::End => "end of input".into(),
            Found::Quote => "string literal".into(),
            Found::Word(word) => format!("`{word}`"),
            Found::Char(c) => format!("`{c}`"),
        }
    }
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || is_layout_whitespace(c)
        || matches!(c, '_' | '{' | '}' | '(' | ')' | ':' | ',' | '.' | '-' | '>' | '"')
}

/// `rest` starts with a quote; true when no unescaped closing quote follows.
fn is_unterminated_string(rest: &str) -> bool {
    let mut chars = rest.chars().skip(1);
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '"' => return false,
            _ => {}
        }
    }
    true
}

fn empty_block(positives: &[Rule]) -> Option<&'static str> {
    let all = |pred: fn(&Rule) -> bool| !positives.is_empty() && positives.iter().all(pred);

    if all(|r| matches!(r, Rule::kw_define | Rule::kw_task | Rule::define | Rule::task)) {
        Some("prompt")
    } else if all(|r| matches!(r, Rule::kw_step | Rule::step)) {
        Some("workflow")
    } else if all(|r| {
        matches!(
            r,
            Rule::kw_input
                | Rule::kw_instruction
                | Rule::kw_output
                | Rule::input
                | Rule::instruction
                | Rule::output
        )
    }) {
        Some("task")
    } else {
        None
    }
}

fn describe_expected(positives: &[Rule]) -> Vec<String> {
    let mut expected: Vec<String> = Vec::with_capacity(positives.len());
    for rule in positives {
        let text = describe_rule(*rule).to_string();
        if !expected.contains(&text) {
            expected.push(text);
        }
    }
    expected
}

fn describe_rule(rule: Rule) -> &'static str {
    match rule {
        Rule::EOI => "end of input",
        Rule::identifier => "identifier",
        Rule::string => "string literal",
        Rule::free_text => "text",
        Rule::kw_blueprint | Rule::blueprint => "`blueprint`",
        Rule::kw_prompt | Rule::prompt => "`prompt`",
        Rule::kw_workflow | Rule::workflow => "`workflow`",
        Rule::kw_version | Rule::version => "`version`",
        Rule::kw_author | Rule::author => "`author`",
        Rule::kw_goal | Rule::goal => "`goal`",
        Rule::kw_define | Rule::define => "`define`",
        Rule::kw_task | Rule::task => "`task`",
        Rule::kw_input | Rule::input => "`input`",
        Rule::kw_instruction | Rule::instruction => "`instruction`",
        Rule::kw_output | Rule::output => "`output`",
        Rule::kw_step | Rule::step => "`step`",
        Rule::invocation => "invocation",
        Rule::arguments => "arguments",
        Rule::lbrace => "`{`",
        Rule::rbrace => "`}`",
        Rule::lparen => "`(`",
        Rule::rparen => "`)`",
        Rule::colon => "`:`",
        Rule::comma => "`,`",
        Rule::dot => "`.`",
        Rule::arrow => "`->`",
        _ => "token",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error_kind(source: &str) -> ErrorKind {
        parse(source).unwrap_err().kind
    }

    #[test]
    fn test_minimal_program() {
        let program = parse("blueprint Demo {}").unwrap();
        assert_eq!(program.blueprint.name, "Demo");
        assert!(program.prompts.is_empty());
        assert!(program.workflow.is_none());
    }

    #[test]
    fn test_empty_input_is_missing_blueprint() {
        assert!(matches!(
            error_kind(""),
            ErrorKind::MissingBlueprint { .. }
        ));
        assert!(matches!(
            error_kind("  \n\t"),
            ErrorKind::MissingBlueprint { .. }
        ));
    }

    #[test]
    fn test_keyword_needs_boundary() {
        assert!(matches!(
            error_kind("blueprintDemo {}"),
            ErrorKind::MissingBlueprint { .. }
        ));
    }

    #[test]
    fn test_unterminated_string() {
        assert_eq!(
            error_kind("blueprint Demo {\n  version: \"0.1\n}"),
            ErrorKind::UnterminatedString
        );
    }

    #[test]
    fn test_unrecognized_character() {
        assert_eq!(
            error_kind("blueprint Demo { @ }"),
            ErrorKind::UnrecognizedCharacter { character: '@' }
        );
    }

    #[test]
    fn test_non_breaking_space_is_unrecognized() {
        assert_eq!(
            error_kind("blueprint Demo {\n  goal\u{a0}: \"g\"\n}"),
            ErrorKind::UnrecognizedCharacter { character: '\u{a0}' }
        );
    }

    #[test]
    fn test_unexpected_end_of_input() {
        assert!(matches!(
            error_kind("blueprint Demo {"),
            ErrorKind::UnexpectedEndOfInput { .. }
        ));
    }

    #[test]
    fn test_unexpected_token_lists_expected() {
        match error_kind("blueprint Demo { name: \"x\" }") {
            ErrorKind::UnexpectedToken { expected, found } => {
                assert_eq!(found, "`name`");
                assert!(expected.contains(&"`version`".to_string()));
                assert!(expected.contains(&"`}`".to_string()));
            }
            other => panic!("unexpected error kind: {other:?}"),
        }
    }

    #[test]
    fn test_empty_workflow_body() {
        let source = "blueprint B {}\nworkflow W { }";
        assert!(matches!(
            error_kind(source),
            ErrorKind::EmptyBody { ref block, .. } if block == "workflow"
        ));
    }

    #[test]
    fn test_error_position_is_one_based() {
        let err = parse("blueprint Demo {\n  version: 1\n}").unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.column, 12);
    }

    #[test]
    fn test_parse_tree_root_is_program() {
        let source = SourceContext::anonymous("blueprint Demo {}");
        let tree = parse_tree(&source).unwrap();
        assert_eq!(tree.as_rule(), Rule::program);
    }
}
