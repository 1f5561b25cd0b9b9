//! PromptScript front end.
//!
//! Parses PromptScript source into a typed [`ast::Program`] and lowers it into
//! a serializable [`context::Context`] for downstream templating:
//!
//! ```
//! let source = r#"
//! blueprint Demo {
//!   version: "0.1"
//! }
//! prompt Greeter {
//!   task SayHi:
//!     input: name
//!     instruction: "Print a greeting to name"
//! }
//! "#;
//! let program = promptscript::parse(source).unwrap();
//! let context = promptscript::build_context(&program);
//! assert_eq!(context.blueprint.version, "0.1");
//! assert_eq!(context.prompts[0].tasks[0].input, "name");
//! ```

pub use crate::ast::Program;
pub use crate::context::{build_context, Context};
pub use crate::errors::{ErrorKind, PromptScriptError, SourceContext, SyntaxError};
pub use crate::syntax::{parse, parse_source};

pub mod ast;
pub mod cli;
pub mod context;
pub mod discovery;
pub mod errors;
pub mod format;
pub mod syntax;
