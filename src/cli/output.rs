//! Handles all user-facing output for the CLI.
//!
//! Command results go to stdout; status lines for `check` are colorized when
//! the terminal supports it.

use std::io::Write;
use std::path::Path;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::cli::args::OutputFormat;
use crate::context::Context;
use crate::errors::PromptScriptError;

// ============================================================================
// RENDERING
// ============================================================================

/// Serializes a context in the requested format.
pub fn render_context(context: &Context, format: OutputFormat) -> Result<String, PromptScriptError> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(context)?,
        OutputFormat::Yaml => serde_yaml::to_string(context)?,
    };
    Ok(rendered)
}

// ============================================================================
// STATUS LINES
// ============================================================================

/// Prints `ok` or `error` followed by the file path.
pub fn print_check_result(path: &Path, passed: bool) {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let (label, color) = if passed {
        ("ok", Color::Green)
    } else {
        ("error", Color::Red)
    };
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
    let _ = write!(stdout, "{label:>5}");
    let _ = stdout.reset();
    let _ = writeln!(stdout, " {}", path.display());
}

pub fn print_summary(passed: usize, failed: usize) {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let color = if failed == 0 { Color::Green } else { Color::Red };
    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
    let _ = writeln!(stdout, "{passed} passed, {failed} failed");
    let _ = stdout.reset();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse;

    #[test]
    fn test_yaml_renders_null_workflow() {
        let program = parse("blueprint Demo {\n  author: \"Ada\"\n}").unwrap();
        let context = crate::context::build_context(&program);
        let yaml = render_context(&context, OutputFormat::Yaml).unwrap();
        assert!(yaml.contains("author: Ada"));
        assert!(yaml.contains("workflow: null"));
    }

    #[test]
    fn test_json_is_pretty_printed() {
        let program = parse("blueprint Demo {}").unwrap();
        let context = crate::context::build_context(&program);
        let json = render_context(&context, OutputFormat::Json).unwrap();
        assert!(json.contains("\n  \"blueprint\": {"));
        assert!(json.contains("\"workflow\": null"));
    }
}
