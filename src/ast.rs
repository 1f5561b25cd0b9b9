//! Typed syntax tree for PromptScript programs.
//!
//! Every node owns its children; there are no shared or back references.
//! Nodes are plain data and are never mutated after the builder returns them.

use serde::{Deserialize, Serialize};

pub mod builder;

pub use builder::build_program;

/// Root of a parsed source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub blueprint: Blueprint,
    pub prompts: Vec<Prompt>,
    pub workflow: Option<Workflow>,
}

/// Project metadata. Fields that were not declared are empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Blueprint {
    pub name: String,
    pub version: String,
    pub author: String,
    pub goal: String,
}

impl Blueprint {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Assigns a declared field. A repeated key overwrites the earlier value.
    pub fn apply(&mut self, field: BlueprintField) {
        match field {
            BlueprintField::Version(v) => self.version = v,
            BlueprintField::Author(v) => self.author = v,
            BlueprintField::Goal(v) => self.goal = v,
        }
    }
}

/// One `key: "value"` declaration inside a blueprint body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlueprintField {
    Version(String),
    Author(String),
    Goal(String),
}

/// A named group of definitions and tasks.
///
/// `items` keeps the interleaved declaration order; [`Prompt::defines`] and
/// [`Prompt::tasks`] project it into the two ordered sequences consumers use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub name: String,
    pub items: Vec<PromptItem>,
}

impl Prompt {
    pub fn defines(&self) -> impl Iterator<Item = &Define> {
        self.items.iter().filter_map(|item| match item {
            PromptItem::Define(define) => Some(define),
            PromptItem::Task(_) => None,
        })
    }

    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.items.iter().filter_map(|item| match item {
            PromptItem::Task(task) => Some(task),
            PromptItem::Define(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PromptItem {
    Define(Define),
    Task(Task),
}

/// A reusable text fragment scoped to its prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Define {
    pub name: String,
    pub definition: String,
}

/// A unit of work. Undeclared fields are empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    pub input: String,
    pub instruction: String,
    pub output: String,
}

impl Task {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Assigns a declared field. A repeated key overwrites the earlier value.
    pub fn apply(&mut self, field: TaskField) {
        match field {
            TaskField::Input(v) => self.input = v,
            TaskField::Instruction(v) => self.instruction = v,
            TaskField::Output(v) => self.output = v,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskField {
    Input(String),
    Instruction(String),
    Output(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workflow {
    pub name: String,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub label: String,
    pub invocation: Invocation,
}

/// A `module.function(arg, ...)` call. Arguments are identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    pub module: String,
    pub function: String,
    pub arguments: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_blueprint_field_keeps_last_value() {
        let mut blueprint = Blueprint::new("Demo");
        blueprint.apply(BlueprintField::Version("0.1".into()));
        blueprint.apply(BlueprintField::Author("Ada".into()));
        blueprint.apply(BlueprintField::Version("0.2".into()));

        assert_eq!(blueprint.version, "0.2");
        assert_eq!(blueprint.author, "Ada");
        assert_eq!(blueprint.goal, "");
    }

    #[test]
    fn prompt_projections_keep_declaration_order() {
        let prompt = Prompt {
            name: "P".into(),
            items: vec![
                PromptItem::Task(Task::new("first")),
                PromptItem::Define(Define {
                    name: "a".into(),
                    definition: "x".into(),
                }),
                PromptItem::Task(Task::new("second")),
                PromptItem::Define(Define {
                    name: "b".into(),
                    definition: "y".into(),
                }),
            ],
        };

        let tasks: Vec<_> = prompt.tasks().map(|t| t.name.as_str()).collect();
        let defines: Vec<_> = prompt.defines().map(|d| d.name.as_str()).collect();
        assert_eq!(tasks, ["first", "second"]);
        assert_eq!(defines, ["a", "b"]);
    }
}
