//! Source discovery and loading.
//!
//! The parser itself only sees text; this module finds PromptScript files on
//! disk and reads them with their path as the diagnostic source name.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::ast::Program;
use crate::context::{build_context, Context};
use crate::errors::{PromptScriptError, SourceContext};
use crate::syntax::parse_source;

/// File extensions recognized as PromptScript sources.
pub const SOURCE_EXTENSIONS: &[&str] = &["ps", "promptscript"];

/// Collects the sources under `root`.
///
/// A file path is returned as-is regardless of its extension. A directory is
/// walked recursively for files with a [`SOURCE_EXTENSIONS`] extension. The
/// result is sorted so callers process files in a stable order.
pub fn discover_sources<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>, PromptScriptError> {
    let root = root.as_ref();
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_source_file(entry.path()) {
            continue;
        }
        files.push(entry.into_path());
    }
    files.sort();
    Ok(files)
}

pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

/// Reads a file into a [`SourceContext`] named after its path.
pub fn read_source<P: AsRef<Path>>(path: P) -> Result<SourceContext, PromptScriptError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| PromptScriptError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(SourceContext::from_file(path.display().to_string(), content))
}

pub fn load_program<P: AsRef<Path>>(path: P) -> Result<Program, PromptScriptError> {
    let source = read_source(path)?;
    Ok(parse_source(&source)?)
}

pub fn load_context<P: AsRef<Path>>(path: P) -> Result<Context, PromptScriptError> {
    let program = load_program(path)?;
    Ok(build_context(&program))
}
