use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use rstest::rstest;
use starknet_hash::class_hash::{compute_class_hash, compute_hinted_class_hash};
use starknet_hash::compiler::StarknetCompileCli;
use starknet_core::types::contract::legacy::LegacyContractClass;
use starknet_hash::{
    CompilationError, CompilationSource, CompiledArtifact, ContractDefinition, ContractHashError, ContractHasher,
    FieldElement,
};
use starknet_hash_types::abi::FunctionKind;

use crate::common::{
    felt, init_logging, load_artifact, resources_dir, FailingCompiler, StaticCompiler, BALANCE_CLASS_HASH,
    BALANCE_WITH_IMPORTS_CLASS_HASH, COUNTER_CLASS_HASH, COUNTER_LEGACY_CLASS_HASH,
};

#[rstest]
#[case::with_compiler_version(
    "counter_compiled.json",
    "0x3d549b8c5141a6761e373e7583004108099f816a23627582f0906b84f553ef6",
    COUNTER_CLASS_HASH
)]
#[case::pre_compiler_version(
    "counter_compiled_legacy.json",
    "0x2f712f181f1d949bbbe4708acc4c0bec0efe5cfd754f10aac5271d9b517b4b",
    COUNTER_LEGACY_CLASS_HASH
)]
fn test_class_hash_of_compiled_contract(
    #[from(init_logging)] _logging: (),
    #[case] file: &str,
    #[case] expected_hinted_class_hash: &str,
    #[case] expected_class_hash: &str,
) {
    let artifact = load_artifact(file);

    assert_eq!(compute_hinted_class_hash(&artifact).unwrap(), felt(expected_hinted_class_hash));
    assert_eq!(*compute_class_hash(&artifact).unwrap(), felt(expected_class_hash));
}

#[rstest]
fn test_class_hash_matches_starknet_core(#[from(init_logging)] _logging: ()) {
    let class_json = std::fs::read(resources_dir().join("increase_balance_compiled.json")).unwrap();

    let reference: LegacyContractClass = serde_json::from_slice(&class_json).unwrap();
    let expected: FieldElement = reference.class_hash().unwrap().into();

    let artifact = CompiledArtifact::from_bytes(&class_json).unwrap();
    assert_eq!(*compute_class_hash(&artifact).unwrap(), expected);
}

#[rstest]
fn test_class_hash_is_deterministic(#[from(init_logging)] _logging: ()) {
    let hasher = ContractHasher::new(FailingCompiler);
    let definition = ContractDefinition::from_compiled(load_artifact("counter_compiled.json"));

    let first = hasher.compute_contract_hash(&definition).unwrap();
    let second = hasher.compute_contract_hash(&definition).unwrap();
    let reloaded = hasher
        .compute_contract_hash(&ContractDefinition::from_compiled(load_artifact("counter_compiled.json")))
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(first, reloaded);
}

#[test]
fn test_reserialized_artifact_keeps_its_hash() {
    let artifact = load_artifact("counter_compiled.json");
    let reloaded = CompiledArtifact::from_json_str(&artifact.to_json().unwrap()).unwrap();
    assert_eq!(compute_class_hash(&reloaded).unwrap(), compute_class_hash(&artifact).unwrap());
}

#[test]
fn test_no_valid_source() {
    let hasher = ContractHasher::new(FailingCompiler);
    let error = hasher.compute_contract_hash(&ContractDefinition::default()).unwrap_err();

    assert_matches!(error, ContractHashError::MissingInput);
    assert!(error.to_string().contains("One of compiled_contract or compilation_source is required."));
}

#[test]
fn test_source_is_hashed_through_the_compiler() {
    let artifact = load_artifact("counter_compiled.json");
    let hasher = ContractHasher::new(StaticCompiler { artifact });

    let class_hash = hasher.compute_contract_hash(&ContractDefinition::from_source("%lang starknet")).unwrap();
    assert_eq!(*class_hash, felt(COUNTER_CLASS_HASH));
}

#[test]
fn test_compiled_contract_takes_precedence_over_source() {
    let hasher = ContractHasher::new(StaticCompiler { artifact: load_artifact("counter_compiled_legacy.json") });
    let definition = ContractDefinition {
        compilation_source: Some(CompilationSource::from("%lang starknet")),
        ..ContractDefinition::from_compiled(load_artifact("counter_compiled.json"))
    };

    assert_eq!(*hasher.compute_contract_hash(&definition).unwrap(), felt(COUNTER_CLASS_HASH));
}

#[test]
fn test_compilation_error_is_surfaced() {
    let hasher = ContractHasher::new(FailingCompiler);
    let error = hasher.compute_contract_hash(&ContractDefinition::from_source("%lang starknet")).unwrap_err();

    assert_matches!(
        error,
        ContractHashError::Compilation(CompilationError::Rejected { diagnostics }) => {
            assert_eq!(diagnostics, vec![FailingCompiler::diagnostic()]);
        }
    );
}

#[test]
fn test_abi_descriptors_of_compiled_contract() {
    let artifact = load_artifact("counter_compiled.json");
    let descriptors: Vec<_> = artifact.abi_descriptors().into_iter().map(|d| (d.name, d.kind)).collect();

    assert_eq!(
        descriptors,
        vec![
            ("constructor".to_string(), FunctionKind::Constructor),
            ("increase".to_string(), FunctionKind::External),
            ("get_counter".to_string(), FunctionKind::View),
            ("deposit".to_string(), FunctionKind::L1Handler),
            ("counter".to_string(), FunctionKind::StorageVar),
        ]
    );
}

#[rstest]
#[case::balance("balance.cairo", vec![], BALANCE_CLASS_HASH)]
#[case::balance_with_imports("balance_with_imports.cairo", vec!["mock-contracts"], BALANCE_WITH_IMPORTS_CLASS_HASH)]
#[ignore = "Requires starknet-compile (cairo-lang) on PATH"]
fn test_class_hash_from_source(
    #[from(init_logging)] _logging: (),
    #[case] source_file: &str,
    #[case] search_paths: Vec<&str>,
    #[case] expected: &str,
) {
    let source = std::fs::read_to_string(resources_dir().join(source_file)).unwrap();
    let definition = ContractDefinition::from_source(source)
        .with_search_paths(search_paths.into_iter().map(|path| resources_dir().join(path)).collect());

    let hasher = ContractHasher::new(StarknetCompileCli::from_env());
    assert_eq!(*hasher.compute_contract_hash(&definition).unwrap(), felt(expected));
}
