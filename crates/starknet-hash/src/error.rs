use std::path::PathBuf;
use std::time::Duration;

use starknet_hash_types::{ArtifactError, RangeError};

use crate::compiler::Diagnostic;

#[derive(thiserror::Error, Debug)]
pub enum CompilationError {
    #[error("Compilation failed:\n{}", format_diagnostics(.diagnostics))]
    Rejected { diagnostics: Vec<Diagnostic> },

    #[error("Failed to launch compiler {executable:?}: {source}")]
    Launch { executable: PathBuf, source: std::io::Error },

    #[error("Compiler did not finish within {0:?}")]
    Timeout(Duration),

    #[error("Compiler produced an invalid artifact: {0}")]
    InvalidOutput(#[source] ArtifactError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_diagnostics(diagnostics: &[Diagnostic]) -> String {
    diagnostics.iter().map(ToString::to_string).collect::<Vec<_>>().join("\n")
}

#[derive(thiserror::Error, Debug)]
pub enum ContractHashError {
    #[error("One of compiled_contract or compilation_source is required.")]
    MissingInput,

    #[error(transparent)]
    Compilation(#[from] CompilationError),

    #[error(transparent)]
    Range(#[from] RangeError),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error("Failed to serialize contract class for hashing: {0}")]
    Serialization(#[from] serde_json::Error),
}
