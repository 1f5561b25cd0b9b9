//! Command-line arguments and subcommands for the PromptScript CLI.
//!
//! Uses the `clap` derive API. Logging is configured from `--verbose` unless
//! the `PROMPTSCRIPT_LOG` environment variable holds a filter directive.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "promptscript",
    version,
    about = "Parse PromptScript programs and lower them into a template context."
)]
pub struct PromptScriptArgs {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse a program and print its lowered context.
    Context {
        /// The PromptScript file to lower.
        #[arg(required = true)]
        file: PathBuf,

        /// Serialization format of the context.
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Show the syntax tree of a program.
    Ast {
        /// The PromptScript file to parse.
        #[arg(required = true)]
        file: PathBuf,
    },
    /// Print a program in canonical form.
    Fmt {
        /// The PromptScript file to format.
        #[arg(required = true)]
        file: PathBuf,
    },
    /// Parse a file, or every source file under a directory, and report errors.
    Check {
        /// A file or a directory to search for `.ps` / `.promptscript` files.
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}
