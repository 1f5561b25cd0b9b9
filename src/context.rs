//! Context lowering.
//!
//! The context is the AST flattened into plain mappings and sequences so
//! templating and serialization layers never see AST node types. Lowering is a
//! pure, total function of the [`Program`]. The derived `Serialize` impls give
//! the documented JSON/YAML shape.

use serde::{Deserialize, Serialize};

use crate::ast::{Define, Invocation, Program, Prompt, Step, Task, Workflow};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    pub blueprint: BlueprintContext,
    pub prompts: Vec<PromptContext>,
    /// Serialized as `null` when the program has no workflow.
    pub workflow: Option<WorkflowContext>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlueprintContext {
    pub name: String,
    pub version: String,
    pub author: String,
    pub goal: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptContext {
    pub name: String,
    pub defines: Vec<DefineContext>,
    pub tasks: Vec<TaskContext>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefineContext {
    pub name: String,
    pub definition: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskContext {
    pub name: String,
    pub input: String,
    pub instruction: String,
    pub output: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowContext {
    pub name: String,
    pub steps: Vec<StepContext>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepContext {
    pub label: String,
    pub invocation: InvocationContext,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationContext {
    pub module: String,
    pub function: String,
    pub arguments: Vec<String>,
}

/// Lower a program into its context.
pub fn build_context(program: &Program) -> Context {
    let blueprint = &program.blueprint;
    Context {
        blueprint: BlueprintContext {
            name: blueprint.name.clone(),
            version: blueprint.version.clone(),
            author: blueprint.author.clone(),
            goal: blueprint.goal.clone(),
        },
        prompts: program.prompts.iter().map(PromptContext::from).collect(),
        workflow: program.workflow.as_ref().map(WorkflowContext::from),
    }
}

impl From<&Program> for Context {
    fn from(program: &Program) -> Self {
        build_context(program)
    }
}

impl From<&Prompt> for PromptContext {
    fn from(prompt: &Prompt) -> Self {
        Self {
            name: prompt.name.clone(),
            defines: prompt.defines().map(DefineContext::from).collect(),
            tasks: prompt.tasks().map(TaskContext::from).collect(),
        }
    }
}

impl From<&Define> for DefineContext {
    fn from(define: &Define) -> Self {
        Self {
            name: define.name.clone(),
            definition: define.definition.clone(),
        }
    }
}

impl From<&Task> for TaskContext {
    fn from(task: &Task) -> Self {
        Self {
            name: task.name.clone(),
            input: task.input.clone(),
            instruction: task.instruction.clone(),
            output: task.output.clone(),
        }
    }
}

impl From<&Workflow> for WorkflowContext {
    fn from(workflow: &Workflow) -> Self {
        Self {
            name: workflow.name.clone(),
            steps: workflow.steps.iter().map(StepContext::from).collect(),
        }
    }
}

impl From<&Step> for StepContext {
    fn from(step: &Step) -> Self {
        Self {
            label: step.label.clone(),
            invocation: InvocationContext::from(&step.invocation),
        }
    }
}

impl From<&Invocation> for InvocationContext {
    fn from(invocation: &Invocation) -> Self {
        Self {
            module: invocation.module.clone(),
            function: invocation.function.clone(),
            arguments: invocation.arguments.clone(),
        }
    }
}
