use std::path::PathBuf;
use std::time::Duration;

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use starknet_hash::compiler::{parse_diagnostics, CompilationSource, ContractCompiler, SourceLocation};
use starknet_hash::config::CompilerConfig;
use starknet_hash::{CompilationError, ContractDefinition, ContractHasher, StarknetCompileCli};

use crate::common::{felt, load_artifact, resources_dir, FailingCompiler, StaticCompiler, COUNTER_CLASS_HASH};

#[test]
fn test_hasher_accepts_borrowed_compiler() {
    let compiler = StaticCompiler { artifact: load_artifact("counter_compiled.json") };
    let hasher = ContractHasher::new(&compiler);

    let class_hash = hasher.compute_contract_hash(&ContractDefinition::from_source("%lang starknet")).unwrap();
    assert_eq!(*class_hash, felt(COUNTER_CLASS_HASH));
}

#[test]
fn test_compile_error_display() {
    let error = FailingCompiler.compile(&CompilationSource::from("%lang starknet"), &[]).unwrap_err();
    assert_eq!(error.to_string(), "Compilation failed:\ncontract.cairo:4:1: Cannot find module 'inner.inner'.");
}

#[test]
fn test_parse_cairo_lang_output() {
    let stderr = "\
contract.cairo:4:1: Could not find module 'inner.inner'. Searched in the following paths:
from inner.inner import MockStruct
^********^
";
    let diagnostics = parse_diagnostics(stderr);

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].location,
        Some(SourceLocation { path: PathBuf::from("contract.cairo"), line: 4, column: 1 })
    );
    assert!(diagnostics[0].message.ends_with("^********^"));
}

#[test]
fn test_default_compiler_config() {
    let compiler = StarknetCompileCli::default();
    assert_eq!(compiler.config(), &CompilerConfig::default());
    assert_eq!(compiler.config().timeout, Duration::from_secs(120));
}

#[test]
fn test_missing_compiler_executable() {
    let compiler = StarknetCompileCli::new(CompilerConfig {
        executable: resources_dir().join("no-such-compiler"),
        timeout: Duration::from_secs(5),
    });
    let hasher = ContractHasher::new(compiler);

    let error = hasher.compute_contract_hash(&ContractDefinition::from_source("%lang starknet")).unwrap_err();
    assert_matches!(error, starknet_hash::ContractHashError::Compilation(CompilationError::Launch { .. }));
}
