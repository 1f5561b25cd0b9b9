//! AST Builder
//!
//! Second phase of parsing: walks the pest parse tree produced by
//! [`crate::syntax::parse_tree`] and constructs typed nodes. The grammar
//! already guarantees the tree's shape; a missing child is still reported as a
//! [`SyntaxError`] instead of panicking.
//!
//! Text handling is uniform: quoted strings lose their surrounding quotes (escape
//! sequences are kept verbatim) and free text is trimmed at both ends of the
//! same whitespace the grammar skips, so other Unicode spaces survive.

use pest::iterators::{Pair, Pairs};

use crate::ast::{
    Blueprint, BlueprintField, Define, Invocation, Program, Prompt, PromptItem, Step, Task,
    TaskField, Workflow,
};
use crate::errors::{ErrorKind, SourceContext, SyntaxError};
use crate::syntax::{is_layout_whitespace, Rule, Span};

/// Build a [`Program`] from the `program` node of a parse tree.
pub fn build_program(pair: Pair<'_, Rule>, source: &SourceContext) -> Result<Program, SyntaxError> {
    AstBuilder { source }.program(pair)
}

struct AstBuilder<'s> {
    source: &'s SourceContext,
}

impl AstBuilder<'_> {
    fn program(&self, pair: Pair<'_, Rule>) -> Result<Program, SyntaxError> {
        let span = pair.as_span();
        let mut blueprint = None;
        let mut prompts = Vec::new();
        let mut workflow = None;

        for child in pair.into_inner() {
            match child.as_rule() {
                Rule::blueprint => blueprint = Some(self.blueprint(child)?),
                Rule::prompt => prompts.push(self.prompt(child)?),
                Rule::workflow => workflow = Some(self.workflow(child)?),
                _ => {}
            }
        }

        let blueprint = blueprint.ok_or_else(|| self.missing("program", "blueprint", span))?;
        Ok(Program {
            blueprint,
            prompts,
            workflow,
        })
    }

    fn blueprint(&self, pair: Pair<'_, Rule>) -> Result<Blueprint, SyntaxError> {
        let span = pair.as_span();
        let mut inner = pair.into_inner();
        let mut blueprint = Blueprint::new(self.identifier(&mut inner, "blueprint", span)?);

        for child in inner {
            let field = match child.as_rule() {
                Rule::version => BlueprintField::Version(self.string_field(child, "version")?),
                Rule::author => BlueprintField::Author(self.string_field(child, "author")?),
                Rule::goal => BlueprintField::Goal(self.string_field(child, "goal")?),
                _ => continue,
            };
            blueprint.apply(field);
        }

        Ok(blueprint)
    }

    fn prompt(&self, pair: Pair<'_, Rule>) -> Result<Prompt, SyntaxError> {
        let span = pair.as_span();
        let mut inner = pair.into_inner();
        let name = self.identifier(&mut inner, "prompt", span)?;

        let mut items = Vec::new();
        for child in inner {
            match child.as_rule() {
                Rule::define => items.push(PromptItem::Define(self.define(child)?)),
                Rule::task => items.push(PromptItem::Task(self.task(child)?)),
                _ => {}
            }
        }

        Ok(Prompt { name, items })
    }

    fn define(&self, pair: Pair<'_, Rule>) -> Result<Define, SyntaxError> {
        let span = pair.as_span();
        let mut inner = pair.into_inner();
        let name = self.identifier(&mut inner, "define", span)?;
        let definition = self.free_text(&mut inner, "define", span)?;
        Ok(Define { name, definition })
    }

    fn task(&self, pair: Pair<'_, Rule>) -> Result<Task, SyntaxError> {
        let span = pair.as_span();
        let mut inner = pair.into_inner();
        let mut task = Task::new(self.identifier(&mut inner, "task", span)?);

        for child in inner {
            let field = match child.as_rule() {
                Rule::input => {
                    let span = child.as_span();
                    TaskField::Input(self.free_text(&mut child.into_inner(), "input", span)?)
                }
                Rule::instruction => {
                    TaskField::Instruction(self.string_field(child, "instruction")?)
                }
                Rule::output => TaskField::Output(self.string_field(child, "output")?),
                _ => continue,
            };
            task.apply(field);
        }

        Ok(task)
    }

    fn workflow(&self, pair: Pair<'_, Rule>) -> Result<Workflow, SyntaxError> {
        let span = pair.as_span();
        let mut inner = pair.into_inner();
        let name = self.identifier(&mut inner, "workflow", span)?;

        let steps = inner
            .filter(|child| child.as_rule() == Rule::step)
            .map(|child| self.step(child))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Workflow { name, steps })
    }

    fn step(&self, pair: Pair<'_, Rule>) -> Result<Step, SyntaxError> {
        let span = pair.as_span();
        let mut inner = pair.into_inner();
        let label = self.identifier(&mut inner, "step", span)?;
        let invocation = inner
            .find(|child| child.as_rule() == Rule::invocation)
            .ok_or_else(|| self.missing("step", "invocation", span))?;

        Ok(Step {
            label,
            invocation: self.invocation(invocation)?,
        })
    }

    fn invocation(&self, pair: Pair<'_, Rule>) -> Result<Invocation, SyntaxError> {
        let span = pair.as_span();
        let mut inner = pair.into_inner();
        let module = self.identifier(&mut inner, "invocation", span)?;
        let function = self.identifier(&mut inner, "invocation", span)?;

        // `arguments` is absent for an empty list.
        let arguments = inner
            .find(|child| child.as_rule() == Rule::arguments)
            .map(|args| {
                args.into_inner()
                    .filter(|arg| arg.as_rule() == Rule::identifier)
                    .map(|arg| arg.as_str().to_string())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Invocation {
            module,
            function,
            arguments,
        })
    }

    // ========================================================================
    // TOKENS
    // ========================================================================

    /// Next identifier among the remaining children.
    fn identifier(
        &self,
        inner: &mut Pairs<'_, Rule>,
        construct: &str,
        span: pest::Span<'_>,
    ) -> Result<String, SyntaxError> {
        inner
            .find(|child| child.as_rule() == Rule::identifier)
            .map(|ident| ident.as_str().to_string())
            .ok_or_else(|| self.missing(construct, "name", span))
    }

    fn string_field(&self, pair: Pair<'_, Rule>, construct: &str) -> Result<String, SyntaxError> {
        let span = pair.as_span();
        pair.into_inner()
            .find(|child| child.as_rule() == Rule::string)
            .map(|string| strip_quotes(string.as_str()).to_string())
            .ok_or_else(|| self.missing(construct, "string value", span))
    }

    fn free_text(
        &self,
        inner: &mut Pairs<'_, Rule>,
        construct: &str,
        span: pest::Span<'_>,
    ) -> Result<String, SyntaxError> {
        inner
            .find(|child| child.as_rule() == Rule::free_text)
            .map(|text| text.as_str().trim_matches(is_layout_whitespace).to_string())
            .ok_or_else(|| self.missing(construct, "text", span))
    }

    fn missing(&self, construct: &str, element: &str, span: pest::Span<'_>) -> SyntaxError {
        SyntaxError::new(
            ErrorKind::MissingElement {
                construct: construct.into(),
                element: element.into(),
            },
            Span::from_pest(span),
            span.start_pos().line_col(),
            self.source,
        )
    }
}

fn strip_quotes(token: &str) -> &str {
    token
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(token)
}
