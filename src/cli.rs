//! The PromptScript Command-Line Interface.
//!
//! Entry point for all CLI commands. This is the only layer that logs or
//! prints; the library calls it makes are pure.

use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser;
use tracing::{debug, info, info_span, warn};
use tracing_subscriber::EnvFilter;

use crate::ast::Program;
use crate::cli::args::{Command, OutputFormat, PromptScriptArgs};
use crate::context::build_context;
use crate::discovery::{discover_sources, load_program};
use crate::errors::{print_error, PromptScriptError};
use crate::format::format_program;

pub mod args;
pub mod output;

/// Environment variable holding an `EnvFilter` directive for the CLI logs.
pub const LOG_ENV: &str = "PROMPTSCRIPT_LOG";

/// The main entry point for the CLI.
pub fn run() {
    let args = PromptScriptArgs::parse();
    init_logging(args.verbose);

    match execute(args.command) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            print_error(e);
            process::exit(1);
        }
    }
}

fn init_logging(verbose: u8) {
    let default_directive = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Runs one command. `Ok(false)` means the command ran but found problems.
fn execute(command: Command) -> Result<bool, PromptScriptError> {
    match command {
        Command::Context { file, format } => context_command(&file, format),
        Command::Ast { file } => {
            let program = timed_load(&file)?;
            println!("{program:#?}");
            Ok(true)
        }
        Command::Fmt { file } => {
            let program = timed_load(&file)?;
            print!("{}", format_program(&program));
            Ok(true)
        }
        Command::Check { path } => check_command(&path),
    }
}

fn context_command(file: &Path, format: OutputFormat) -> Result<bool, PromptScriptError> {
    let program = timed_load(file)?;

    let started = Instant::now();
    let context = build_context(&program);
    debug!(elapsed_us = started.elapsed().as_micros() as u64, "lowered context");

    println!("{}", output::render_context(&context, format)?);
    Ok(true)
}

fn check_command(root: &Path) -> Result<bool, PromptScriptError> {
    let _span = info_span!("check", root = %root.display()).entered();

    let files = discover_sources(root)?;
    info!(count = files.len(), "discovered sources");
    if files.is_empty() {
        warn!("no PromptScript sources found");
    }

    let mut failed = 0;
    for file in &files {
        match timed_load(file) {
            Ok(_) => output::print_check_result(file, true),
            Err(e) => {
                failed += 1;
                output::print_check_result(file, false);
                print_error(e);
            }
        }
    }

    output::print_summary(files.len() - failed, failed);
    Ok(failed == 0)
}

fn timed_load(file: &Path) -> Result<Program, PromptScriptError> {
    let started = Instant::now();
    let result = load_program(file);
    match &result {
        Ok(program) => debug!(
            file = %file.display(),
            prompts = program.prompts.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "parsed"
        ),
        Err(e) => debug!(file = %file.display(), error = %e, "parse failed"),
    }
    result
}
