//! Canonical source printer.
//!
//! Prints a [`Program`] back as PromptScript: two-space indentation, one field
//! per line, blueprint fields in `version`/`author`/`goal` order, prompt items
//! in declaration order. Empty optional fields are left out. Parsing the output
//! yields a program equal to the input.

use std::fmt::{self, Display, Formatter};

use crate::ast::{Blueprint, Define, Program, Prompt, PromptItem, Step, Task, Workflow};

const INDENT: &str = "  ";

/// Render a program as canonical source text.
pub fn format_program(program: &Program) -> String {
    program.to_string()
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.blueprint)?;
        for prompt in &self.prompts {
            writeln!(f)?;
            write!(f, "{}", prompt)?;
        }
        if let Some(workflow) = &self.workflow {
            writeln!(f)?;
            write!(f, "{}", workflow)?;
        }
        Ok(())
    }
}

impl Display for Blueprint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "blueprint {} {{", self.name)?;
        for (key, value) in [
            ("version", &self.version),
            ("author", &self.author),
            ("goal", &self.goal),
        ] {
            if !value.is_empty() {
                writeln!(f, "{INDENT}{key}: \"{value}\"")?;
            }
        }
        writeln!(f, "}}")
    }
}

impl Display for Prompt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "prompt {} {{", self.name)?;
        for item in &self.items {
            match item {
                PromptItem::Define(define) => write!(f, "{define}")?,
                PromptItem::Task(task) => write!(f, "{task}")?,
            }
        }
        writeln!(f, "}}")
    }
}

impl Display for Define {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{INDENT}define {}: {}", self.name, self.definition)
    }
}

impl Display for Task {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{INDENT}task {}:", self.name)?;
        let field_indent = INDENT.repeat(2);

        if !self.input.is_empty() {
            writeln!(f, "{field_indent}input: {}", self.input)?;
        }
        // A task body needs at least one field, so an all-empty task keeps its
        // instruction.
        let all_empty = self.input.is_empty() && self.output.is_empty();
        if !self.instruction.is_empty() || all_empty {
            writeln!(f, "{field_indent}instruction: \"{}\"", self.instruction)?;
        }
        if !self.output.is_empty() {
            writeln!(f, "{field_indent}output: \"{}\"", self.output)?;
        }
        Ok(())
    }
}

impl Display for Workflow {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "workflow {} {{", self.name)?;
        for step in &self.steps {
            write!(f, "{step}")?;
        }
        writeln!(f, "}}")
    }
}

impl Display for Step {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let invocation = &self.invocation;
        writeln!(
            f,
            "{INDENT}step {} -> {}.{}({})",
            self.label,
            invocation.module,
            invocation.function,
            invocation.arguments.join(", ")
        )
    }
}
