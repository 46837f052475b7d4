//! Boundary to the external Cairo compiler.
//!
//! The hashing code never looks at Cairo source. It hands source to a [`ContractCompiler`]
//! and works with the [`CompiledArtifact`] it gets back.

mod starknet_compile;

use std::fmt;
use std::path::PathBuf;

pub use starknet_compile::StarknetCompileCli;
use starknet_hash_types::CompiledArtifact;

use crate::error::CompilationError;

/// What to compile: inline source text, or source files on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompilationSource {
    Code(String),
    Files(Vec<PathBuf>),
}

impl From<&str> for CompilationSource {
    fn from(code: &str) -> Self {
        Self::Code(code.to_string())
    }
}

impl From<String> for CompilationSource {
    fn from(code: String) -> Self {
        Self::Code(code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub path: PathBuf,
    pub line: u32,
    pub column: u32,
}

/// A compiler message, with its location when the compiler reported one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub location: Option<SourceLocation>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => {
                write!(f, "{}:{}:{}: {}", location.path.display(), location.line, location.column, self.message)
            }
            None => f.write_str(&self.message),
        }
    }
}

/// Compiles Cairo source into a contract class.
pub trait ContractCompiler {
    fn compile(
        &self,
        source: &CompilationSource,
        search_paths: &[PathBuf],
    ) -> Result<CompiledArtifact, CompilationError>;
}

impl<C: ContractCompiler + ?Sized> ContractCompiler for &C {
    fn compile(
        &self,
        source: &CompilationSource,
        search_paths: &[PathBuf],
    ) -> Result<CompiledArtifact, CompilationError> {
        (**self).compile(source, search_paths)
    }
}

/// Parses a `path:line:column: message` header. Anything else is not a located diagnostic.
fn parse_location_line(line: &str) -> Option<Diagnostic> {
    let (head, message) = line.split_once(": ")?;
    let mut parts = head.rsplitn(3, ':');
    let column = parts.next()?.parse().ok()?;
    let line_number = parts.next()?.parse().ok()?;
    let path = parts.next().filter(|path| !path.is_empty())?;

    Some(Diagnostic {
        message: message.to_string(),
        location: Some(SourceLocation { path: PathBuf::from(path), line: line_number, column }),
    })
}

/// Splits compiler stderr into diagnostics.
///
/// cairo-lang prints every error as a `path:line:column: message` header followed by the
/// offending source line and a caret marker. Those follow-up lines are kept in the message
/// of the diagnostic they belong to. Lines before the first header become diagnostics of
/// their own.
pub fn parse_diagnostics(output: &str) -> Vec<Diagnostic> {
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let mut in_located = false;

    for line in output.lines().filter(|line| !line.trim().is_empty()) {
        if let Some(diagnostic) = parse_location_line(line) {
            diagnostics.push(diagnostic);
            in_located = true;
            continue;
        }
        match diagnostics.last_mut() {
            Some(last) if in_located => {
                last.message.push('\n');
                last.message.push_str(line);
            }
            _ => diagnostics.push(Diagnostic { message: line.trim().to_string(), location: None }),
        }
    }

    diagnostics
}
