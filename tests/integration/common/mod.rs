use std::path::{Path, PathBuf};

use rstest::fixture;
use starknet_hash::compiler::{CompilationSource, ContractCompiler, Diagnostic, SourceLocation};
use starknet_hash::error::CompilationError;
use starknet_hash_types::{CompiledArtifact, FieldElement};

/// Class hash of the hand-written `resources/counter_compiled.json`, computed from Python's
/// `json.dumps(..., sort_keys=True)` output. The fixture carries non-ASCII hint code and
/// hint keys whose string and numeric orders differ.
pub const COUNTER_CLASS_HASH: &str =
    "1405505017445821800151195857171798530550141538287648542533181313800678382167";

/// Same as [`COUNTER_CLASS_HASH`] for `resources/counter_compiled_legacy.json`, which has no
/// `compiler_version`.
pub const COUNTER_LEGACY_CLASS_HASH: &str =
    "2986831596695656902584793434445877887867575802920793587906252459455470834115";

pub const BALANCE_CLASS_HASH: &str = "2805686283900972954281199974176256637529244635330751615468747630576307779907";
pub const BALANCE_WITH_IMPORTS_CLASS_HASH: &str =
    "1571278367887274108382601941710732790050612993558068277262832996016105973699";

#[fixture]
pub fn init_logging() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .format_timestamp(None)
        .try_init();
}

pub fn resources_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../resources")
}

pub fn load_artifact(name: &str) -> CompiledArtifact {
    CompiledArtifact::from_path(resources_dir().join(name))
        .unwrap_or_else(|e| panic!("Failed to load compiled contract {name}: {e}"))
}

pub fn felt(literal: &str) -> FieldElement {
    literal.parse().unwrap()
}

/// Hands back a fixed artifact, whatever the source.
pub struct StaticCompiler {
    pub artifact: CompiledArtifact,
}

impl ContractCompiler for StaticCompiler {
    fn compile(
        &self,
        _source: &CompilationSource,
        _search_paths: &[PathBuf],
    ) -> Result<CompiledArtifact, CompilationError> {
        Ok(self.artifact.clone())
    }
}

/// Rejects every source with the same diagnostic.
pub struct FailingCompiler;

impl FailingCompiler {
    pub fn diagnostic() -> Diagnostic {
        Diagnostic {
            message: "Cannot find module 'inner.inner'.".to_string(),
            location: Some(SourceLocation { path: PathBuf::from("contract.cairo"), line: 4, column: 1 }),
        }
    }
}

impl ContractCompiler for FailingCompiler {
    fn compile(
        &self,
        _source: &CompilationSource,
        _search_paths: &[PathBuf],
    ) -> Result<CompiledArtifact, CompilationError> {
        Err(CompilationError::Rejected { diagnostics: vec![Self::diagnostic()] })
    }
}
